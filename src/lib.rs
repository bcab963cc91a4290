pub mod core {
	pub mod config;
	pub mod terminal;
}

pub mod cli;
pub mod games;
pub mod words;

// Re-export for convenience
pub use crate::games::hangman::{GuessError, GuessOutcome, HangmanGame, HintResult, Verdict};
pub use crate::words::{WordBank, WordSource};
