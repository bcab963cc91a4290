use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::core::config::SessionConfig;
use crate::games::hangman::{RoundEnd, Session};
use crate::words::{WordBank, WordSource};

#[derive(Parser)]
#[command(name = "hangterm")]
#[command(about = "A terminal hangman game")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON word list to use instead of the bundled one
    #[arg(short, long, global = true)]
    pub words: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play hangman (the default)
    Play(PlayArgs),
    /// List available languages and categories
    List,
}

#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Word language (asked interactively if omitted)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Word category (asked interactively if omitted)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Incorrect guesses allowed before the round is lost
    #[arg(short, long)]
    pub max_mistakes: Option<u32>,

    /// Offer a hint after this many incorrect guesses in a row (0 disables)
    #[arg(long)]
    pub hint_after: Option<u32>,

    /// Seed for reproducible word picks and hints
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// JSON session config; flags given on the command line take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl PlayArgs {
    pub fn into_config(self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::from_path(path)?,
            None => SessionConfig::default(),
        };
        if let Some(language) = self.language {
            config.language = Some(language);
        }
        if let Some(category) = self.category {
            config.category = Some(category);
        }
        if let Some(max_mistakes) = self.max_mistakes {
            config.max_mistakes = max_mistakes;
        }
        if let Some(hint_after) = self.hint_after {
            config.hint_after = hint_after;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let bank = match &cli.words {
        Some(path) => WordBank::from_path(path)
            .with_context(|| format!("load word list {}", path.display()))?,
        None => WordBank::builtin(),
    };

    match cli.command {
        Some(Commands::List) => {
            println!("Languages:");
            for language in bank.languages() {
                println!("  • {}", language);
            }
            println!("Categories:");
            for category in bank.categories() {
                println!("  • {}", category);
            }
        }
        Some(Commands::Play(args)) => play(&bank, args)?,
        None => play(&bank, PlayArgs::default())?,
    }

    Ok(())
}

fn play(bank: &WordBank, args: PlayArgs) -> Result<()> {
    let config = args.into_config()?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    info!(?config, words = bank.len(), "starting session");

    let mut session = Session::new(bank, rng, config)?;
    let stdin = io::stdin();
    let rounds = session.run(stdin.lock(), io::stdout())?;

    let won = rounds
        .iter()
        .filter(|end| matches!(end, RoundEnd::Won { .. }))
        .count();
    println!("\nRounds won: {}/{}. Goodbye!", won, rounds.len());
    Ok(())
}
