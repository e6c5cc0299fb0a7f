//! Greedy longest-match segmentation over a word list.
//!
//! At each position the longest listed word wins. Characters that start no
//! listed word are grouped into a single unknown token that ends where the
//! next listed word begins. Whitespace separates tokens and is dropped.

use std::collections::HashMap;
use vocab_core::{Segmenter, Token};

struct Node {
    children: HashMap<char, usize>,
    terminal: bool,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            terminal: false,
        }
    }
}

/// Character trie over the known words.
pub struct LongestMatchSegmenter {
    nodes: Vec<Node>,
    words: usize,
}

impl LongestMatchSegmenter {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
            words: 0,
        }
    }

    /// Build from a word list. Blank entries are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segmenter = Self::new();
        for word in words {
            segmenter.insert(word.as_ref().trim());
        }
        segmenter
    }

    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        let mut node_idx = 0;
        for c in word.chars() {
            let next_idx = if let Some(&id) = self.nodes[node_idx].children.get(&c) {
                id
            } else {
                let new_id = self.nodes.len();
                self.nodes.push(Node::new());
                self.nodes[node_idx].children.insert(c, new_id);
                new_id
            };
            node_idx = next_idx;
        }
        if !self.nodes[node_idx].terminal {
            self.nodes[node_idx].terminal = true;
            self.words += 1;
        }
    }

    /// Number of distinct words in the trie.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Length in chars of the longest listed word starting at `chars[start]`.
    fn longest_at(&self, chars: &[char], start: usize) -> Option<usize> {
        let mut node_idx = 0;
        let mut best = None;
        for (offset, c) in chars[start..].iter().enumerate() {
            match self.nodes[node_idx].children.get(c) {
                Some(&next) => {
                    node_idx = next;
                    if self.nodes[node_idx].terminal {
                        best = Some(offset + 1);
                    }
                }
                None => break,
            }
        }
        best
    }
}

impl Default for LongestMatchSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter for LongestMatchSegmenter {
    fn segment(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut unknown = String::new();
        let mut pos = 0;

        while pos < chars.len() {
            if chars[pos].is_whitespace() {
                flush(&mut unknown, &mut tokens);
                pos += 1;
                continue;
            }
            match self.longest_at(&chars, pos) {
                Some(len) => {
                    flush(&mut unknown, &mut tokens);
                    let word: String = chars[pos..pos + len].iter().collect();
                    tokens.extend(Token::new(word));
                    pos += len;
                }
                None => {
                    unknown.push(chars[pos]);
                    pos += 1;
                }
            }
        }
        flush(&mut unknown, &mut tokens);
        tokens
    }
}

fn flush(unknown: &mut String, tokens: &mut Vec<Token>) {
    if !unknown.is_empty() {
        tokens.extend(Token::new(std::mem::take(unknown)));
    }
}
