//! Dictionary backends.

pub mod http;
pub mod lexicon;

pub use http::HttpDictionary;
pub use lexicon::LexiconDictionary;

use vocab_core::{Dictionary, DictionaryEntry, LookupError};

/// Dictionary selected at startup.
pub enum AnyDictionary {
    Lexicon(LexiconDictionary),
    Http(HttpDictionary),
}

impl Dictionary for AnyDictionary {
    fn name(&self) -> &str {
        match self {
            Self::Lexicon(d) => d.name(),
            Self::Http(d) => d.name(),
        }
    }

    async fn search(&self, word: &str) -> Result<Vec<DictionaryEntry>, LookupError> {
        match self {
            Self::Lexicon(d) => d.search(word).await,
            Self::Http(d) => d.search(word).await,
        }
    }
}
