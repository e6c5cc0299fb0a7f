//! Word segmentation backed by ICU4X.

use icu_segmenter::WordSegmenter;
use vocab_core::{Segmenter, Token};

/// ICU word segmenter with compiled dictionary data for Thai and other
/// scripts written without spaces.
pub struct IcuSegmenter {
    inner: WordSegmenter,
}

impl IcuSegmenter {
    pub fn new() -> Self {
        Self {
            inner: WordSegmenter::new_dictionary(),
        }
    }
}

impl Default for IcuSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter for IcuSegmenter {
    fn segment(&self, text: &str) -> Vec<Token> {
        let breakpoints: Vec<usize> = self.inner.segment_str(text).collect();
        breakpoints
            .windows(2)
            .map(|w| &text[w[0]..w[1]])
            .filter(|segment| is_word(segment))
            .filter_map(Token::new)
            .collect()
    }
}

/// Whitespace and punctuation runs are not words.
pub(crate) fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}
