/// Word sources: where a round gets its secret from.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// One word with the language and category it belongs to.
///
/// Same shape as the records served by public random-word APIs; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub category: String,
    pub language: String,
}

impl WordEntry {
    pub fn new(language: &str, category: &str, word: &str) -> Self {
        Self {
            word: word.to_string(),
            category: category.to_string(),
            language: language.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("This combination does not exist: language '{language}', category '{category}'.")]
    UnknownCombination { language: String, category: String },
    #[error("failed to read word list")]
    Io(#[from] std::io::Error),
    #[error("failed to parse word list")]
    Parse(#[from] serde_json::Error),
}

/// Provides secret words for a `(language, category)` pair.
pub trait WordSource {
    /// Available languages, without duplicates, in first-seen order.
    fn languages(&self) -> Vec<String>;

    /// Available categories, without duplicates, in first-seen order.
    fn categories(&self) -> Vec<String>;

    /// Picks one word, or fails with [`WordSourceError::UnknownCombination`] when the pair has
    /// no words.
    fn random_word<R: Rng + ?Sized>(
        &self,
        language: &str,
        category: &str,
        rng: &mut R,
    ) -> Result<String, WordSourceError>;
}

const BUILTIN: &[(&str, &str, &str)] = &[
    ("en", "animals", "cat"),
    ("en", "animals", "elephant"),
    ("en", "animals", "giraffe"),
    ("en", "animals", "kangaroo"),
    ("en", "animals", "octopus"),
    ("en", "animals", "penguin"),
    ("en", "animals", "polar bear"),
    ("en", "fruits", "apple"),
    ("en", "fruits", "banana"),
    ("en", "fruits", "blueberry"),
    ("en", "fruits", "pineapple"),
    ("en", "fruits", "passion fruit"),
    ("en", "countries", "canada"),
    ("en", "countries", "portugal"),
    ("en", "countries", "new zealand"),
    ("en", "countries", "guinea-bissau"),
    ("en", "countries", "united kingdom"),
    ("ro", "animals", "pisică"),
    ("ro", "animals", "câine"),
    ("ro", "animals", "păianjen"),
    ("ro", "animals", "liliac"),
    ("ro", "fruits", "măr"),
    ("ro", "fruits", "căpșună"),
    ("ro", "fruits", "portocală"),
];

/// In-memory word list.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    entries: Vec<WordEntry>,
}

impl WordBank {
    /// Builds a bank, dropping entries whose word is blank.
    pub fn from_entries(entries: Vec<WordEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|entry| {
                let keep = !entry.word.trim().is_empty();
                if !keep {
                    warn!(language = %entry.language, category = %entry.category, "skipping blank word entry");
                }
                keep
            })
            .collect();
        Self { entries }
    }

    /// Reads a JSON array of [`WordEntry`] records.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, WordSourceError> {
        let entries: Vec<WordEntry> = serde_json::from_reader(reader)?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, WordSourceError> {
        let file = File::open(path.as_ref())?;
        let bank = Self::from_reader(BufReader::new(file))?;
        info!(path = %path.as_ref().display(), words = bank.len(), "loaded word list");
        Ok(bank)
    }

    /// The small list bundled with the binary.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN
                .iter()
                .map(|&(language, category, word)| WordEntry::new(language, category, word))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn unique_by(&self, field: impl Fn(&WordEntry) -> &str) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for entry in &self.entries {
            let value = field(entry);
            if !seen.iter().any(|s| s == value) {
                seen.push(value.to_string());
            }
        }
        seen
    }
}

impl WordSource for WordBank {
    fn languages(&self) -> Vec<String> {
        self.unique_by(|entry| entry.language.as_str())
    }

    fn categories(&self) -> Vec<String> {
        self.unique_by(|entry| entry.category.as_str())
    }

    fn random_word<R: Rng + ?Sized>(
        &self,
        language: &str,
        category: &str,
        rng: &mut R,
    ) -> Result<String, WordSourceError> {
        let candidates: Vec<&WordEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.language == language && entry.category == category)
            .collect();
        if candidates.is_empty() {
            return Err(WordSourceError::UnknownCombination {
                language: language.to_string(),
                category: category.to_string(),
            });
        }
        let pick = candidates[rng.random_range(0..candidates.len())];
        Ok(pick.word.clone())
    }
}
