//! Core vocabulary deck library shared by the command-line app.
//!
//! Provides:
//! - Normalizer for extracted document text
//! - Frequency aggregation with deterministic ranking
//! - Definition resolution with per-word failure isolation
//! - Deck assembly and atomic package output
//! - The stage-by-stage pipeline tying them together

pub mod deck;
pub mod error;
pub mod frequency;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod resolver;
pub mod types;

pub use deck::{build_deck, format_count, output_path, CardBacks, DeckSerializer};
pub use error::{ExtractionError, LookupError, PipelineError, Result, SerializeError};
pub use frequency::{aggregate, count_words, rank};
pub use normalize::normalize;
pub use pipeline::{
    DocumentKind, Extractor, FailedStage, Pipeline, PipelineReport, PipelineStage, Segmenter,
};
pub use resolver::{format_definition, DefinitionResolver, Dictionary, ResolutionStats};
pub use types::{
    Card, Deck, DeckMode, DefinitionSet, DictionaryEntry, FrequencyTable, PipelineSettings,
    RankedVocabulary, Token, WordCount, NO_DEFINITION, PACKAGE_SUFFIX,
};
