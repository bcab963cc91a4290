/// Hangman: single-player word guessing with a bounded lives budget.
pub mod error;
pub mod game;
pub mod session;

pub use error::{ConfigError, GuessError};
pub use game::{GuessOutcome, HangmanGame, HintResult, Verdict, DEFAULT_MAX_MISTAKES, PLACEHOLDER};
pub use session::{HintPolicy, RoundEnd, Session};
