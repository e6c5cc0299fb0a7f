//! Core types for the vocabulary deck pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Back text used when a word has no definition.
pub const NO_DEFINITION: &str = "(no definition)";

/// Suffix appended to the source filename to name the package.
pub const PACKAGE_SUFFIX: &str = ".apkg";

/// A single segmented word unit. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Create a token, rejecting the empty string.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One row of the frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
    /// Index of the word's first occurrence in the token sequence.
    pub first_index: usize,
}

/// Word to occurrence count, kept in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    pub(crate) entries: Vec<WordCount>,
    pub(crate) slots: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Occurrence count of a word, if it was seen.
    pub fn count(&self, word: &str) -> Option<usize> {
        self.slots.get(word).map(|&slot| self.entries[slot].count)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts. Equals the number of tokens aggregated.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Entries in first-occurrence order.
    pub fn entries(&self) -> &[WordCount] {
        &self.entries
    }
}

/// Unique words ordered by descending count, ties by first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedVocabulary {
    pub(crate) words: Vec<WordCount>,
}

impl RankedVocabulary {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Ranked entries with their counts.
    pub fn entries(&self) -> &[WordCount] {
        &self.words
    }

    /// Ranked words only.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.word.as_str())
    }
}

/// One candidate returned by a dictionary lookup.
///
/// Field names follow the LEXiTRON-style JSON records used by Thai-English
/// dictionaries. Only `result`, `type` and `relate` feed the definition text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryEntry {
    pub search: String,
    pub result: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub synonym: Vec<String>,
    pub antonym: Vec<String>,
    pub relate: Vec<String>,
    pub sample: String,
    pub tag: Vec<String>,
}

/// Definitions resolved for one run. Missing words read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionSet {
    definitions: HashMap<String, String>,
}

impl DefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: impl Into<String>, definition: impl Into<String>) {
        self.definitions.insert(word.into(), definition.into());
    }

    /// Definition for a word; `""` when unknown.
    pub fn get(&self, word: &str) -> &str {
        self.definitions.get(word).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, word: &str) -> bool {
        self.definitions.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// A single flashcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub front: String,
    pub back: String,
}

/// Ordered set of cards produced for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub name: String,
    pub cards: Vec<Card>,
}

/// What goes on the back of each card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckMode {
    Definitions,
    CountsOnly,
}

impl Default for DeckMode {
    fn default() -> Self {
        Self::Definitions
    }
}

impl DeckMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Definitions => "definitions",
            Self::CountsOnly => "counts-only",
        }
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "definitions" => Some(Self::Definitions),
            "counts-only" => Some(Self::CountsOnly),
            _ => None,
        }
    }

    /// Whether this mode needs a dictionary.
    pub fn needs_dictionary(&self) -> bool {
        matches!(self, Self::Definitions)
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub mode: DeckMode,
    /// Maximum dictionary lookups in flight. 1 means strictly sequential.
    pub concurrency: usize,
    pub lookup_timeout: Duration,
    pub placeholder: String,
    pub output_suffix: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            mode: DeckMode::default(),
            concurrency: 1,
            lookup_timeout: Duration::from_secs(10),
            placeholder: NO_DEFINITION.to_string(),
            output_suffix: PACKAGE_SUFFIX.to_string(),
        }
    }
}

impl PipelineSettings {
    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::PipelineError;

        if self.concurrency == 0 {
            return Err(PipelineError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.lookup_timeout.is_zero() {
            return Err(PipelineError::InvalidConfig(
                "lookup timeout must be greater than zero".to_string(),
            ));
        }
        if self.output_suffix.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "output suffix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
