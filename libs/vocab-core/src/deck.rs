//! Deck assembly and package naming.

use crate::error::SerializeError;
use crate::types::{Card, Deck, DeckMode, DefinitionSet, RankedVocabulary, WordCount};
use std::path::{Path, PathBuf};

/// Turns a finished deck into a binary package.
pub trait DeckSerializer: Send + Sync {
    /// Package format identifier, for logs.
    fn format(&self) -> &'static str;

    fn serialize(&self, deck: &Deck) -> Result<Vec<u8>, SerializeError>;
}

/// Back text for the counts-only mode.
pub fn format_count(count: usize) -> String {
    if count == 1 {
        "1 occurrence".to_string()
    } else {
        format!("{} occurrences", count)
    }
}

/// Back side content source.
pub enum CardBacks<'a> {
    /// Definition, or the placeholder when the definition is empty.
    Definitions {
        definitions: &'a DefinitionSet,
        placeholder: &'a str,
    },
    /// Occurrence count of the word.
    Counts,
}

impl CardBacks<'_> {
    pub fn mode(&self) -> DeckMode {
        match self {
            Self::Definitions { .. } => DeckMode::Definitions,
            Self::Counts => DeckMode::CountsOnly,
        }
    }

    fn back_for(&self, entry: &WordCount) -> String {
        match self {
            Self::Definitions {
                definitions,
                placeholder,
            } => {
                let definition = definitions.get(&entry.word);
                if definition.is_empty() {
                    placeholder.to_string()
                } else {
                    definition.to_string()
                }
            }
            Self::Counts => format_count(entry.count),
        }
    }
}

/// One card per ranked word, in rank order.
pub fn build_deck(name: impl Into<String>, vocabulary: &RankedVocabulary, backs: &CardBacks<'_>) -> Deck {
    let cards = vocabulary
        .entries()
        .iter()
        .map(|entry| Card {
            front: entry.word.clone(),
            back: backs.back_for(entry),
        })
        .collect();

    Deck {
        name: name.into(),
        cards,
    }
}

/// Deck name for a source path: its file name.
pub fn deck_name(source: &Path) -> String {
    source
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string_lossy().into_owned())
}

/// Output path: the full source path with `suffix` appended.
pub fn output_path(source: &Path, suffix: &str) -> PathBuf {
    let mut path = source.as_os_str().to_os_string();
    path.push(suffix);
    PathBuf::from(path)
}
