//! Segmentation backends.

pub mod icu;
pub mod longest_match;

pub use icu::IcuSegmenter;
pub use longest_match::LongestMatchSegmenter;

use vocab_core::{Segmenter, Token};

/// Segmenter selected at startup.
pub enum AnySegmenter {
    Icu(IcuSegmenter),
    LongestMatch(LongestMatchSegmenter),
}

impl Segmenter for AnySegmenter {
    fn segment(&self, text: &str) -> Vec<Token> {
        match self {
            Self::Icu(s) => s.segment(text),
            Self::LongestMatch(s) => s.segment(text),
        }
    }
}
