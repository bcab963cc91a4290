use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::games::hangman::error::{ConfigError, GuessError};

/// Shown in place of a letter that is still hidden.
pub const PLACEHOLDER: char = '_';

/// One life per gallows stage after the empty one.
pub const DEFAULT_MAX_MISTAKES: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Everything a caller needs to redraw after an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    /// The guess after case normalization.
    pub letter: char,
    pub verdict: Verdict,
    /// Positions uncovered by this guess. Can be zero for a correct letter already shown by hints.
    pub revealed: usize,
    pub masked_word: String,
    pub mistakes: u32,
    pub consecutive_mistakes: u32,
}

impl GuessOutcome {
    pub fn is_correct(&self) -> bool {
        self.verdict == Verdict::Correct
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintResult {
    /// Every position is already revealed.
    NotNeeded,
    Revealed { letter: char, position: usize },
}

/// State of a single hangman round.
///
/// The round never locks itself: once [`is_terminal`](Self::is_terminal) is true further guesses
/// are still accepted and counted, so callers should stop submitting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HangmanGame {
    secret: Vec<char>,
    mask: Vec<Option<char>>,
    guessed: BTreeSet<char>,
    mistakes: u32,
    consecutive_mistakes: u32,
    max_mistakes: u32,
}

/// Lowercases a single character, keeping it unchanged when its lowercase form is not one char.
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

impl HangmanGame {
    pub fn new(secret: &str, max_mistakes: u32) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if max_mistakes == 0 {
            return Err(ConfigError::NoLives);
        }

        let secret: Vec<char> = secret.chars().map(fold_case).collect();
        // Spaces, hyphens and the like are never guessable, so they start out revealed.
        let mask = secret
            .iter()
            .map(|&c| if c.is_alphabetic() { None } else { Some(c) })
            .collect();

        debug!(len = secret.len(), max_mistakes, "new hangman round");

        Ok(Self {
            secret,
            mask,
            guessed: BTreeSet::new(),
            mistakes: 0,
            consecutive_mistakes: 0,
            max_mistakes,
        })
    }

    /// Validates and applies a guess.
    ///
    /// Checks run in order: exactly one character, alphabetic, not guessed before. On error the
    /// game is left untouched.
    pub fn submit_guess(&mut self, input: &str) -> Result<GuessOutcome, GuessError> {
        let mut chars = input.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(GuessError::InvalidLength(input.chars().count())),
        };
        if !letter.is_alphabetic() {
            return Err(GuessError::NotALetter(letter));
        }
        let letter = fold_case(letter);
        if self.guessed.contains(&letter) {
            return Err(GuessError::AlreadyGuessed(letter));
        }

        self.guessed.insert(letter);

        let mut revealed = 0;
        for (slot, &c) in self.mask.iter_mut().zip(&self.secret) {
            if c == letter && slot.is_none() {
                *slot = Some(c);
                revealed += 1;
            }
        }

        let verdict = if self.secret.contains(&letter) {
            self.consecutive_mistakes = 0;
            Verdict::Correct
        } else {
            self.mistakes += 1;
            self.consecutive_mistakes += 1;
            Verdict::Incorrect
        };

        debug!(%letter, ?verdict, revealed, mistakes = self.mistakes, "guess applied");

        Ok(GuessOutcome {
            letter,
            verdict,
            revealed,
            masked_word: self.masked_word(),
            mistakes: self.mistakes,
            consecutive_mistakes: self.consecutive_mistakes,
        })
    }

    /// Reveals one hidden position picked uniformly by `rng`. Never costs a life.
    pub fn request_hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> HintResult {
        let hidden: Vec<usize> = self
            .mask
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(i, _)| i)
            .collect();
        if hidden.is_empty() {
            return HintResult::NotNeeded;
        }

        let position = hidden[rng.random_range(0..hidden.len())];
        let letter = self.secret[position];
        self.mask[position] = Some(letter);
        self.consecutive_mistakes = 0;

        debug!(%letter, position, "hint revealed");

        HintResult::Revealed { letter, position }
    }

    pub fn is_won(&self) -> bool {
        self.mask.iter().all(Option::is_some)
    }

    pub fn is_lost(&self) -> bool {
        self.mistakes >= self.max_mistakes
    }

    pub fn is_terminal(&self) -> bool {
        self.is_won() || self.is_lost()
    }

    /// Compact mask, e.g. `c__`.
    pub fn masked_word(&self) -> String {
        self.mask.iter().map(|slot| slot.unwrap_or(PLACEHOLDER)).collect()
    }

    /// Mask with a space between positions, e.g. `c _ _`.
    pub fn render_mask(&self) -> String {
        spaced(self.mask.iter().map(|slot| slot.unwrap_or(PLACEHOLDER)))
    }

    pub fn secret(&self) -> String {
        self.secret.iter().collect()
    }

    /// Full secret spaced like [`render_mask`](Self::render_mask), for the end-of-round reveal.
    pub fn render_secret(&self) -> String {
        spaced(self.secret.iter().copied())
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn consecutive_mistakes(&self) -> u32 {
        self.consecutive_mistakes
    }

    pub fn max_mistakes(&self) -> u32 {
        self.max_mistakes
    }

    pub fn remaining_lives(&self) -> u32 {
        self.max_mistakes.saturating_sub(self.mistakes)
    }

    pub fn guessed_letters(&self) -> Vec<char> {
        self.guessed.iter().copied().collect()
    }

    pub fn wrong_letters(&self) -> Vec<char> {
        self.guessed
            .iter()
            .copied()
            .filter(|c| !self.secret.contains(c))
            .collect()
    }
}

fn spaced(chars: impl Iterator<Item = char>) -> String {
    chars
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}
