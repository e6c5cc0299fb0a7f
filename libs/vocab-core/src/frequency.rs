//! Frequency aggregation over a token stream.

use crate::types::{FrequencyTable, RankedVocabulary, Token, WordCount};
use std::collections::HashMap;

/// Count occurrences of each distinct token, recording first-occurrence order.
pub fn count_words(tokens: &[Token]) -> FrequencyTable {
    let mut entries: Vec<WordCount> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for (index, token) in tokens.iter().enumerate() {
        match slots.get(token.as_str()) {
            Some(&slot) => entries[slot].count += 1,
            None => {
                slots.insert(token.as_str().to_string(), entries.len());
                entries.push(WordCount {
                    word: token.as_str().to_string(),
                    count: 1,
                    first_index: index,
                });
            }
        }
    }

    FrequencyTable { entries, slots }
}

/// Order the table's words by descending count.
///
/// Equal counts keep first-occurrence order, so the result does not depend
/// on hash map iteration.
pub fn rank(table: &FrequencyTable) -> RankedVocabulary {
    let mut words = table.entries.clone();
    words.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.first_index.cmp(&b.first_index))
    });
    RankedVocabulary { words }
}

/// Count and rank in one step.
pub fn aggregate(tokens: &[Token]) -> (FrequencyTable, RankedVocabulary) {
    let table = count_words(tokens);
    let ranked = rank(&table);
    (table, ranked)
}
