use thiserror::Error;

/// Reasons a guess is rejected. A rejected guess never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("You must enter exactly one letter (got {0} characters).")]
    InvalidLength(usize),
    #[error("You must enter a letter, '{0}' is not one.")]
    NotALetter(char),
    #[error("\"{0}\" was already guessed.")]
    AlreadyGuessed(char),
}

/// Invalid parameters for a new round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("the secret word must not be empty")]
    EmptySecret,
    #[error("max mistakes must be at least 1")]
    NoLives,
}
