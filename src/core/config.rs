use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::games::hangman::error::ConfigError;
use crate::games::hangman::game::DEFAULT_MAX_MISTAKES;

/// Incorrect guesses in a row before a hint is offered.
pub const DEFAULT_HINT_AFTER: u32 = 3;

/// Settings for a play session. Missing fields in a config file take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub max_mistakes: u32,
    /// 0 turns hint offers off.
    pub hint_after: u32,
    /// Asked interactively when unset.
    pub language: Option<String>,
    /// Asked interactively when unset.
    pub category: Option<String>,
    /// Fixed RNG seed for reproducible words and hints.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_mistakes: DEFAULT_MAX_MISTAKES,
            hint_after: DEFAULT_HINT_AFTER,
            language: None,
            category: None,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("open config {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_mistakes == 0 {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{ "language": "en" }"#).unwrap();
        assert_eq!(config.max_mistakes, 6);
        assert_eq!(config.hint_after, 3);
        assert_eq!(config.language.as_deref(), Some("en"));
        assert_eq!(config.category, None);
    }

    #[test]
    fn zero_lives_rejected() {
        let config = SessionConfig {
            max_mistakes: 0,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoLives));
    }
}
