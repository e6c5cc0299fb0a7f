//! Local dictionary backed by a JSON lexicon file.
//!
//! The file is a JSON array of entries in LEXiTRON style:
//! `[{"search": "ดี", "result": "good", "type": "ADJ", "relate": [...]}, ...]`.
//! Entries are indexed by their `search` headword and keep file order, so
//! the first listed sense of a word is its first candidate.

use std::collections::HashMap;
use std::path::Path;
use vocab_core::{Dictionary, DictionaryEntry, LookupError, PipelineError};

pub struct LexiconDictionary {
    entries: HashMap<String, Vec<DictionaryEntry>>,
    senses: usize,
}

impl LexiconDictionary {
    /// Load the lexicon file. Called once per run.
    pub async fn open(path: &Path) -> Result<Self, PipelineError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            PipelineError::DictionaryUnavailable(format!("{}: {}", path.display(), e))
        })?;
        let lexicon = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            headwords = lexicon.len(),
            senses = lexicon.senses,
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Parse a lexicon from its JSON text.
    pub fn from_json(content: &str) -> Result<Self, PipelineError> {
        let records: Vec<DictionaryEntry> = serde_json::from_str(content)
            .map_err(|e| PipelineError::DictionaryUnavailable(format!("invalid lexicon: {}", e)))?;
        Ok(Self::from_entries(records))
    }

    pub fn from_entries(records: Vec<DictionaryEntry>) -> Self {
        let senses = records.len();
        let mut entries: HashMap<String, Vec<DictionaryEntry>> = HashMap::new();
        for record in records {
            let key = record.search.trim().to_string();
            if key.is_empty() {
                continue;
            }
            entries.entry(key).or_default().push(record);
        }
        Self { entries, senses }
    }

    /// Number of headwords.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All headwords, for building a longest-match segmenter.
    pub fn headwords(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Dictionary for LexiconDictionary {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn search(&self, word: &str) -> Result<Vec<DictionaryEntry>, LookupError> {
        Ok(self.entries.get(word).cloned().unwrap_or_default())
    }
}
