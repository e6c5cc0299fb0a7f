//! Text normalization for extracted document text.
//!
//! Extraction output is split into lines and each line is kept only when
//! every character is on the allow-list. Lines mixing in any other script
//! are dropped whole. Kept lines are joined with no separator and all tab
//! characters are removed.

/// Punctuation and whitespace accepted alongside Thai and digits.
const ALLOWED_PUNCTUATION: &[char] = &['/', '\\', ' ', '.', '\n', '\t'];

/// Thai vowels, tone marks and signs accepted in a line.
const ALLOWED_THAI_MARKS: &[char] = &[
    'ะ', 'ั', 'า', 'ำ', 'ิ', 'ี', 'ึ', 'ื', 'ุ', 'ู', 'ฺ', '฿', 'เ', 'แ', 'โ', 'ใ', 'ไ', 'ๅ',
    'ๆ', '็', '่', '้', '๊', '๋', '์', 'ํ', 'ฯ',
];

/// Whether a character may appear in a retained line.
pub fn is_allowed(c: char) -> bool {
    c.is_ascii_digit()
        || ALLOWED_PUNCTUATION.contains(&c)
        // consonants ก..ฮ
        || ('\u{0E01}'..='\u{0E2E}').contains(&c)
        // digits ๐..๙
        || ('\u{0E50}'..='\u{0E59}').contains(&c)
        || ALLOWED_THAI_MARKS.contains(&c)
}

/// Whether every character of a line is allowed. The empty line passes.
pub fn is_allowed_line(line: &str) -> bool {
    line.chars().all(is_allowed)
}

/// Filter raw extracted text down to allow-listed lines, joined and tab-free.
pub fn normalize(raw: &str) -> String {
    raw.lines()
        .filter(|line| is_allowed_line(line))
        .flat_map(|line| line.chars())
        .filter(|&c| c != '\t')
        .collect()
}
