/// Line-oriented terminal play loop driving [`HangmanGame`] rounds.
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::config::SessionConfig;
use crate::core::terminal::{TerminalColor, TerminalContext};
use crate::games::hangman::game::{HangmanGame, HintResult};
use crate::words::{WordSource, WordSourceError};

/// Typed instead of a guess to give up the current round.
pub const QUIT_COMMAND: &str = ":q";

/// How a round ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEnd {
    Won { word: String, mistakes: u32, hints: u32 },
    Lost { word: String },
    Abandoned,
}

/// Decides when to offer a hint.
///
/// Counts incorrect guesses since the last correct guess, hint, or offer. The count resets on
/// every offer, whether the player takes the hint or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintPolicy {
    threshold: u32,
    streak: u32,
}

impl HintPolicy {
    /// A `threshold` of 0 never offers.
    pub fn new(threshold: u32) -> Self {
        Self { threshold, streak: 0 }
    }

    /// Records a guess and returns true when a hint should be offered now.
    pub fn record(&mut self, correct: bool) -> bool {
        if correct {
            self.streak = 0;
            return false;
        }
        self.streak += 1;
        self.threshold > 0 && self.streak >= self.threshold
    }

    pub fn reset(&mut self) {
        self.streak = 0;
    }
}

pub struct Session<'a, S: WordSource, R: Rng> {
    source: &'a S,
    rng: R,
    config: SessionConfig,
}

impl<'a, S: WordSource, R: Rng> Session<'a, S, R> {
    pub fn new(source: &'a S, rng: R, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, rng, config })
    }

    /// Plays rounds until the player declines another one or input runs out.
    pub fn run<I: BufRead, W: Write>(&mut self, mut input: I, out: W) -> Result<Vec<RoundEnd>> {
        let mut term = TerminalContext::new(out);
        let mut rounds = Vec::new();

        term.clear_screen()?;
        term.print_colored_line("HANGMAN", TerminalColor::Cyan)?;

        loop {
            let Some(word) = self.pick_word(&mut input, &mut term)? else {
                break;
            };
            let end = self.play_round(&word, &mut input, &mut term)?;
            info!(?end, "round finished");
            rounds.push(end);

            term.empty_line()?;
            term.prompt("Play again? [y/N] ")?;
            match read_line(&mut input)? {
                Some(answer) if is_yes(&answer) => continue,
                _ => break,
            }
        }

        term.flush()?;
        Ok(rounds)
    }

    /// Plays one round with `word` as the secret.
    pub fn play_round<I: BufRead, W: Write>(
        &mut self,
        word: &str,
        input: &mut I,
        term: &mut TerminalContext<W>,
    ) -> Result<RoundEnd> {
        let mut game = HangmanGame::new(word, self.config.max_mistakes)?;
        let mut policy = HintPolicy::new(self.config.hint_after);
        let mut hints = 0;

        // A secret without letters is solved from the start.
        if let Some(end) = finish(&game, hints, term)? {
            return Ok(end);
        }

        loop {
            term.empty_line()?;
            term.print_line(&format!("Word: {}", game.render_mask()))?;
            term.print_line(&format!("Lives remaining: {}", game.remaining_lives()))?;
            let wrong = game.wrong_letters();
            if !wrong.is_empty() {
                term.print_line(&format!("Wrong: {}", wrong.iter().collect::<String>()))?;
            }
            term.prompt(&format!("Guess a letter ({} to quit): ", QUIT_COMMAND))?;

            let Some(line) = read_line(input)? else {
                return Ok(RoundEnd::Abandoned);
            };
            if line == QUIT_COMMAND {
                term.print_colored_line(
                    &format!("The word was: {}", game.render_secret()),
                    TerminalColor::Yellow,
                )?;
                return Ok(RoundEnd::Abandoned);
            }

            let outcome = match game.submit_guess(&line) {
                Ok(outcome) => outcome,
                Err(e) => {
                    term.print_colored_line(&e.to_string(), TerminalColor::Red)?;
                    continue;
                }
            };

            if outcome.is_correct() {
                term.print_colored_line(
                    &format!("Good guess! '{}' is in the word.", outcome.letter),
                    TerminalColor::Green,
                )?;
            } else {
                term.print_colored_line(
                    &format!("Sorry, '{}' is not in the word.", outcome.letter),
                    TerminalColor::Red,
                )?;
            }

            if let Some(end) = finish(&game, hints, term)? {
                return Ok(end);
            }

            if policy.record(outcome.is_correct()) {
                policy.reset();
                term.prompt("Do you want a hint? [y/N] ")?;
                let accepted = matches!(read_line(input)?, Some(answer) if is_yes(&answer));
                if accepted {
                    if let HintResult::Revealed { letter, .. } = game.request_hint(&mut self.rng) {
                        hints += 1;
                        term.print_colored_line(
                            &format!("Hint: the letter '{}' is in the word.", letter),
                            TerminalColor::Yellow,
                        )?;
                    }
                    if let Some(end) = finish(&game, hints, term)? {
                        return Ok(end);
                    }
                }
            }
        }
    }

    /// Resolves a word from the configured or prompted language and category.
    /// Returns `None` when input runs out before a valid pair is chosen.
    fn pick_word<I: BufRead, W: Write>(
        &mut self,
        input: &mut I,
        term: &mut TerminalContext<W>,
    ) -> Result<Option<String>> {
        loop {
            let language = match &self.config.language {
                Some(language) => language.clone(),
                None => {
                    let options = self.source.languages().join(", ");
                    term.prompt(&format!("Choose language ({}): ", options))?;
                    match read_line(input)? {
                        Some(language) => language,
                        None => return Ok(None),
                    }
                }
            };
            let category = match &self.config.category {
                Some(category) => category.clone(),
                None => {
                    let options = self.source.categories().join(", ");
                    term.prompt(&format!("Choose category ({}): ", options))?;
                    match read_line(input)? {
                        Some(category) => category,
                        None => return Ok(None),
                    }
                }
            };

            match self.source.random_word(&language, &category, &mut self.rng) {
                Ok(word) => return Ok(Some(word)),
                Err(e @ WordSourceError::UnknownCombination { .. }) => {
                    warn!(%language, %category, "unknown word combination");
                    // Re-prompting cannot fix a pair that came from the config.
                    if self.config.language.is_some() && self.config.category.is_some() {
                        return Err(e).context("configured language and category");
                    }
                    term.print_colored_line(
                        &format!("{} You can try again.", e),
                        TerminalColor::Red,
                    )?;
                }
                Err(e) => return Err(e).context("fetch secret word"),
            }
        }
    }
}

fn finish<W: Write>(
    game: &HangmanGame,
    hints: u32,
    term: &mut TerminalContext<W>,
) -> Result<Option<RoundEnd>> {
    if game.is_won() {
        term.print_line(&format!("Word: {}", game.render_mask()))?;
        term.print_colored_line("Congrats! You WON!", TerminalColor::Green)?;
        return Ok(Some(RoundEnd::Won {
            word: game.secret(),
            mistakes: game.mistakes(),
            hints,
        }));
    }
    if game.is_lost() {
        term.print_colored_line(
            &format!("You LOST! The word was: {}", game.render_secret()),
            TerminalColor::Red,
        )?;
        return Ok(Some(RoundEnd::Lost { word: game.secret() }));
    }
    Ok(None)
}

/// Reads one line without its trailing whitespace. `None` at end of input.
fn read_line<I: BufRead>(input: &mut I) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("read player input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_offers_after_threshold_misses() {
        let mut policy = HintPolicy::new(3);
        assert!(!policy.record(false));
        assert!(!policy.record(false));
        assert!(policy.record(false));
    }

    #[test]
    fn policy_streak_broken_by_correct_guess() {
        let mut policy = HintPolicy::new(2);
        assert!(!policy.record(false));
        assert!(!policy.record(true));
        assert!(!policy.record(false));
        assert!(policy.record(false));
    }

    #[test]
    fn policy_reset_after_offer() {
        let mut policy = HintPolicy::new(2);
        policy.record(false);
        assert!(policy.record(false));
        policy.reset();
        assert!(!policy.record(false));
    }

    #[test]
    fn zero_threshold_never_offers() {
        let mut policy = HintPolicy::new(0);
        for _ in 0..10 {
            assert!(!policy.record(false));
        }
    }

    #[test]
    fn yes_answers() {
        assert!(is_yes("y"));
        assert!(is_yes("YES"));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }
}
