//! Definition resolution against a dictionary backend.
//!
//! Every word in the ranked vocabulary gets a definition. A lookup that
//! fails, times out, or returns nothing degrades to the empty string for
//! that word only; nothing here can abort the pipeline.

use crate::error::LookupError;
use crate::types::{DefinitionSet, DictionaryEntry, RankedVocabulary};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Dictionary backend.
///
/// The handle must be fully initialized before it is passed to the resolver.
/// Lookups take `&self` and must not change state visible to other lookups.
pub trait Dictionary: Send + Sync + 'static {
    /// Backend identifier, for logs.
    fn name(&self) -> &str;

    /// Candidate translations for a word, in backend order.
    fn search(
        &self,
        word: &str,
    ) -> impl Future<Output = Result<Vec<DictionaryEntry>, LookupError>> + Send;
}

/// Format lookup candidates as a definition string.
///
/// Type and related words come from the first candidate; translations from
/// all of them. Returns `None` when there are no candidates.
pub fn format_definition(entries: &[DictionaryEntry]) -> Option<String> {
    let first = entries.first()?;
    let results = entries
        .iter()
        .map(|e| e.result.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut definition = format!("[{}] {}", first.kind, results);
    if !first.relate.is_empty() {
        definition.push_str(&format!(" ({})", first.relate.join(", ")));
    }
    Some(definition)
}

/// Counts from one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub resolved: usize,
    pub unresolved: usize,
}

/// Resolves definitions for a ranked vocabulary.
pub struct DefinitionResolver<D: Dictionary> {
    dictionary: Arc<D>,
    concurrency: usize,
    timeout: Duration,
}

impl<D: Dictionary> DefinitionResolver<D> {
    /// Create a sequential resolver with the given per-lookup timeout.
    pub fn new(dictionary: Arc<D>, timeout: Duration) -> Self {
        Self {
            dictionary,
            concurrency: 1,
            timeout,
        }
    }

    /// Allow up to `limit` lookups in flight. Output is unchanged.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    /// Resolve every word in the vocabulary.
    pub async fn resolve(&self, vocabulary: &RankedVocabulary) -> (DefinitionSet, ResolutionStats) {
        let words: Vec<String> = vocabulary.words().map(str::to_string).collect();

        let definitions = if self.concurrency <= 1 {
            self.resolve_sequential(&words).await
        } else {
            self.resolve_pooled(&words).await
        };

        let mut set = DefinitionSet::new();
        let mut stats = ResolutionStats::default();
        for (word, definition) in words.into_iter().zip(definitions) {
            if definition.is_empty() {
                stats.unresolved += 1;
            } else {
                stats.resolved += 1;
            }
            set.insert(word, definition);
        }

        tracing::info!(
            dictionary = self.dictionary.name(),
            resolved = stats.resolved,
            unresolved = stats.unresolved,
            "definitions resolved"
        );
        (set, stats)
    }

    async fn resolve_sequential(&self, words: &[String]) -> Vec<String> {
        let mut definitions = Vec::with_capacity(words.len());
        for word in words {
            definitions.push(lookup(&*self.dictionary, word, self.timeout).await);
        }
        definitions
    }

    async fn resolve_pooled(&self, words: &[String]) -> Vec<String> {
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for (index, word) in words.iter().cloned().enumerate() {
            let dictionary = Arc::clone(&self.dictionary);
            let permits = Arc::clone(&permits);
            let timeout = self.timeout;
            tasks.spawn(async move {
                // the semaphore is never closed
                let _permit = permits.acquire_owned().await.ok();
                let definition = lookup(&*dictionary, &word, timeout).await;
                (index, definition)
            });
        }

        let mut definitions = vec![String::new(); words.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, definition)) => definitions[index] = definition,
                // a panicked lookup leaves its slot empty
                Err(e) => tracing::warn!("lookup task failed: {}", e),
            }
        }
        definitions
    }
}

/// One isolated lookup. Every failure becomes the empty definition.
async fn lookup<D: Dictionary>(dictionary: &D, word: &str, timeout: Duration) -> String {
    let outcome = match tokio::time::timeout(timeout, dictionary.search(word)).await {
        Ok(Ok(entries)) => format_definition(&entries).ok_or_else(|| LookupError::NotFound(word.to_string())),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(LookupError::Timeout(timeout)),
    };

    match outcome {
        Ok(definition) => {
            tracing::debug!(word, %definition, "resolved");
            definition
        }
        Err(e) => {
            tracing::debug!(word, error = %e, "no definition");
            String::new()
        }
    }
}
