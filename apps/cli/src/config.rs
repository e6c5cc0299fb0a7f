//! Command-line and environment configuration.
//!
//! Values come from flags first, then environment variables (a `.env` file
//! is loaded before parsing), then defaults.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use vocab_core::{DeckMode, PipelineError, PipelineSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Definitions,
    CountsOnly,
}

impl From<ModeArg> for DeckMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Definitions => DeckMode::Definitions,
            ModeArg::CountsOnly => DeckMode::CountsOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SegmenterArg {
    Icu,
    LongestMatch,
}

#[derive(Debug, Parser)]
#[command(
    name = "vocab-deck",
    version,
    about = "Build a frequency-ranked Anki vocabulary deck from a PDF or DOCX document"
)]
pub struct Cli {
    /// Source document (.pdf or .docx)
    pub path: Option<PathBuf>,

    /// Further positional arguments are accepted and ignored
    #[arg(hide = true)]
    pub ignored: Vec<String>,

    /// Card back content
    #[arg(long, value_enum, env = "VOCAB_DECK_MODE", default_value = "definitions")]
    pub mode: ModeArg,

    /// JSON lexicon file used for definitions
    #[arg(long, env = "VOCAB_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Dictionary service base URL, used when no lexicon file is given
    #[arg(long, env = "VOCAB_DICTIONARY_URL")]
    pub dictionary_url: Option<String>,

    /// Word segmentation strategy
    #[arg(long, value_enum, env = "VOCAB_SEGMENTER", default_value = "icu")]
    pub segmenter: SegmenterArg,

    /// Maximum dictionary lookups in flight
    #[arg(long, env = "VOCAB_CONCURRENCY", default_value_t = 1)]
    pub concurrency: usize,

    /// Per-lookup timeout in seconds
    #[arg(long, env = "VOCAB_LOOKUP_TIMEOUT_SECS", default_value_t = 10)]
    pub lookup_timeout_secs: u64,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Where definitions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    Lexicon(PathBuf),
    Service(String),
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: PathBuf,
    pub settings: PipelineSettings,
    pub dictionary: Option<DictionarySource>,
    pub segmenter: SegmenterArg,
}

impl Cli {
    /// Resolve flags into a run configuration.
    pub fn into_config(self) -> Result<Config, PipelineError> {
        let source = self
            .path
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(PipelineError::MissingFilename)?;

        let settings = PipelineSettings {
            mode: self.mode.into(),
            concurrency: self.concurrency,
            lookup_timeout: Duration::from_secs(self.lookup_timeout_secs),
            ..Default::default()
        };
        settings.validate()?;

        let dictionary = match (self.dictionary, self.dictionary_url) {
            (Some(path), _) => Some(DictionarySource::Lexicon(path)),
            (None, Some(url)) => Some(DictionarySource::Service(url)),
            (None, None) => None,
        };

        if settings.mode.needs_dictionary() && dictionary.is_none() {
            return Err(PipelineError::InvalidConfig(
                "definitions mode needs --dictionary or --dictionary-url".to_string(),
            ));
        }
        if self.segmenter == SegmenterArg::LongestMatch
            && !matches!(dictionary, Some(DictionarySource::Lexicon(_)))
        {
            return Err(PipelineError::InvalidConfig(
                "the longest-match segmenter needs a --dictionary lexicon file".to_string(),
            ));
        }

        Ok(Config {
            source,
            settings,
            dictionary,
            segmenter: self.segmenter,
        })
    }
}
