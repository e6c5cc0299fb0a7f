//! Document → deck pipeline.
//!
//! Stages run strictly in order:
//! Extracting → Normalizing → Segmenting → Aggregating → Resolving → Building → Done.
//! Only Extracting, Segmenting and Building can end in `Failed`; per-word
//! dictionary failures are absorbed during Resolving.

use crate::deck::{build_deck, deck_name, output_path, CardBacks, DeckSerializer};
use crate::error::{ExtractionError, PipelineError, Result};
use crate::frequency::aggregate;
use crate::normalize::normalize;
use crate::output::write_package;
use crate::resolver::{DefinitionResolver, Dictionary, ResolutionStats};
use crate::types::{DeckMode, DefinitionSet, PipelineSettings, Token};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Accepted source document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detect the kind from the filename suffix (text after the last `.`,
    /// case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let suffix = filename_suffix(path);
        match suffix.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            _ => Err(PipelineError::UnsupportedFileType(suffix)),
        }
    }
}

fn filename_suffix(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.rsplit('.').next().unwrap_or_default().to_lowercase()
}

/// Pulls raw text out of a source document.
pub trait Extractor: Send + Sync {
    fn extract(
        &self,
        path: &Path,
        kind: DocumentKind,
    ) -> impl Future<Output = std::result::Result<String, ExtractionError>> + Send;
}

/// Splits normalized text into word tokens, preserving order.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<Token>;
}

/// Current pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Extracting,
    Normalizing,
    Segmenting,
    Aggregating,
    Resolving,
    Building,
    Done,
    Failed { stage: FailedStage },
}

/// Stages that may fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    Extracting,
    Segmenting,
    Building,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub output_path: PathBuf,
    pub deck_name: String,
    pub mode: DeckMode,
    pub token_count: usize,
    pub unique_words: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub card_count: usize,
}

/// Linear pipeline over injected collaborators.
pub struct Pipeline<E, S, D, P>
where
    E: Extractor,
    S: Segmenter,
    D: Dictionary,
    P: DeckSerializer,
{
    extractor: E,
    segmenter: S,
    dictionary: Option<Arc<D>>,
    serializer: P,
    settings: PipelineSettings,
    stage: PipelineStage,
}

impl<E, S, D, P> Pipeline<E, S, D, P>
where
    E: Extractor,
    S: Segmenter,
    D: Dictionary,
    P: DeckSerializer,
{
    pub fn new(extractor: E, segmenter: S, serializer: P, settings: PipelineSettings) -> Self {
        Self {
            extractor,
            segmenter,
            dictionary: None,
            serializer,
            settings,
            stage: PipelineStage::Idle,
        }
    }

    /// Attach an initialized dictionary handle. Required in definitions mode.
    pub fn with_dictionary(mut self, dictionary: Arc<D>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Current stage.
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Run the whole pipeline for one source document.
    pub async fn run(&mut self, source: &Path) -> Result<PipelineReport> {
        self.settings.validate()?;
        if self.settings.mode.needs_dictionary() && self.dictionary.is_none() {
            return Err(PipelineError::InvalidConfig(
                "definitions mode requires a dictionary".to_string(),
            ));
        }

        // Extracting
        self.enter(PipelineStage::Extracting);
        let raw = match self.extract(source).await {
            Ok(raw) => raw,
            Err(e) => return Err(self.fail(FailedStage::Extracting, e)),
        };

        // Normalizing
        self.enter(PipelineStage::Normalizing);
        let text = normalize(&raw);
        tracing::debug!(raw_len = raw.len(), normalized_len = text.len(), "text normalized");

        // Segmenting
        self.enter(PipelineStage::Segmenting);
        let tokens = self.segmenter.segment(&text);

        // Aggregating
        self.enter(PipelineStage::Aggregating);
        let (table, vocabulary) = aggregate(&tokens);
        tracing::info!(tokens = tokens.len(), unique = table.len(), "words aggregated");

        // Resolving
        self.enter(PipelineStage::Resolving);
        let (definitions, stats) = self.resolve(&vocabulary).await;

        // Building
        self.enter(PipelineStage::Building);
        let name = deck_name(source);
        let backs = match self.settings.mode {
            DeckMode::Definitions => CardBacks::Definitions {
                definitions: &definitions,
                placeholder: &self.settings.placeholder,
            },
            DeckMode::CountsOnly => CardBacks::Counts,
        };
        let deck = build_deck(name.clone(), &vocabulary, &backs);
        let out = output_path(source, &self.settings.output_suffix);

        let bytes = match self.serializer.serialize(&deck) {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.fail(FailedStage::Building, e.into())),
        };
        tracing::info!(
            format = self.serializer.format(),
            cards = deck.cards.len(),
            bytes = bytes.len(),
            "deck serialized"
        );
        if let Err(e) = write_package(&out, bytes).await {
            return Err(self.fail(FailedStage::Building, e));
        }

        self.enter(PipelineStage::Done);
        Ok(PipelineReport {
            output_path: out,
            deck_name: name,
            mode: self.settings.mode,
            token_count: tokens.len(),
            unique_words: table.len(),
            resolved: stats.resolved,
            unresolved: stats.unresolved,
            card_count: deck.cards.len(),
        })
    }

    async fn extract(&self, source: &Path) -> Result<String> {
        let kind = DocumentKind::from_path(source)?;
        tracing::info!(path = %source.display(), ?kind, "extracting text");
        Ok(self.extractor.extract(source, kind).await?)
    }

    async fn resolve(
        &self,
        vocabulary: &crate::types::RankedVocabulary,
    ) -> (DefinitionSet, ResolutionStats) {
        match (self.settings.mode, &self.dictionary) {
            (DeckMode::Definitions, Some(dictionary)) => {
                DefinitionResolver::new(Arc::clone(dictionary), self.settings.lookup_timeout)
                    .with_concurrency(self.settings.concurrency)
                    .resolve(vocabulary)
                    .await
            }
            _ => (DefinitionSet::new(), ResolutionStats::default()),
        }
    }

    fn enter(&mut self, stage: PipelineStage) {
        tracing::info!(from = ?self.stage, to = ?stage, "stage");
        self.stage = stage;
    }

    fn fail(&mut self, stage: FailedStage, error: PipelineError) -> PipelineError {
        tracing::error!(?stage, %error, "pipeline failed");
        self.stage = PipelineStage::Failed { stage };
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SerializeError;
    use crate::resolver::tests::StubDictionary;
    use crate::types::Deck;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct TextExtractor(std::result::Result<String, String>);

    impl Extractor for TextExtractor {
        async fn extract(
            &self,
            _path: &Path,
            _kind: DocumentKind,
        ) -> std::result::Result<String, ExtractionError> {
            self.0.clone().map_err(ExtractionError::Pdf)
        }
    }

    struct WhitespaceSegmenter;

    impl Segmenter for WhitespaceSegmenter {
        fn segment(&self, text: &str) -> Vec<Token> {
            text.split(' ').filter_map(Token::new).collect()
        }
    }

    /// Records the deck and emits its cards as lines.
    #[derive(Default)]
    struct RecordingSerializer {
        deck: Mutex<Option<Deck>>,
        fail: bool,
    }

    impl DeckSerializer for RecordingSerializer {
        fn format(&self) -> &'static str {
            "lines"
        }

        fn serialize(&self, deck: &Deck) -> std::result::Result<Vec<u8>, SerializeError> {
            if self.fail {
                return Err(SerializeError::Database("disk full".to_string()));
            }
            *self.deck.lock().unwrap() = Some(deck.clone());
            let body: Vec<String> = deck
                .cards
                .iter()
                .map(|c| format!("{}\t{}", c.front, c.back))
                .collect();
            Ok(body.join("\n").into_bytes())
        }
    }

    type TestPipeline = Pipeline<TextExtractor, WhitespaceSegmenter, StubDictionary, RecordingSerializer>;

    fn pipeline(text: &str, settings: PipelineSettings) -> TestPipeline {
        Pipeline::new(
            TextExtractor(Ok(text.to_string())),
            WhitespaceSegmenter,
            RecordingSerializer::default(),
            settings,
        )
    }

    #[test]
    fn detects_document_kind() {
        assert_eq!(DocumentKind::from_path(Path::new("a/b.PDF")).unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_path(Path::new("b.docx")).unwrap(), DocumentKind::Docx);
        assert!(matches!(
            DocumentKind::from_path(Path::new("report.txt")),
            Err(PipelineError::UnsupportedFileType(s)) if s == "txt"
        ));
        assert!(matches!(
            DocumentKind::from_path(Path::new("archive.pdf.zip")),
            Err(PipelineError::UnsupportedFileType(s)) if s == "zip"
        ));
    }

    #[tokio::test]
    async fn builds_definition_deck() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("lesson.pdf");
        let dictionary = StubDictionary::default().with("ดี", "ADJ", &["good"], &[]);

        let mut pipeline = pipeline("ดี ไม่ดี ดี ดี ไม่ดี", PipelineSettings::default())
            .with_dictionary(Arc::new(dictionary));
        let report = pipeline.run(&source).await.unwrap();

        assert_eq!(pipeline.stage(), PipelineStage::Done);
        assert_eq!(report.output_path, dir.path().join("lesson.pdf.apkg"));
        assert_eq!(report.token_count, 5);
        assert_eq!(report.unique_words, 2);
        assert_eq!(report.resolved, 1);
        assert_eq!(report.unresolved, 1);
        assert_eq!(report.card_count, 2);

        let written = std::fs::read_to_string(&report.output_path).unwrap();
        assert_eq!(written, "ดี\t[ADJ] good\nไม่ดี\t(no definition)");
    }

    #[tokio::test]
    async fn counts_only_needs_no_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("lesson.docx");
        let settings = PipelineSettings {
            mode: DeckMode::CountsOnly,
            ..Default::default()
        };

        let mut pipeline = pipeline("ก ข ก", settings);
        let report = pipeline.run(&source).await.unwrap();

        let written = std::fs::read_to_string(&report.output_path).unwrap();
        assert_eq!(written, "ก\t2 occurrences\nข\t1 occurrence");
        assert_eq!(report.mode, DeckMode::CountsOnly);
    }

    #[tokio::test]
    async fn definitions_mode_without_dictionary_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut pipeline = pipeline("ก", PipelineSettings::default());

        let result = pipeline.run(&dir.path().join("a.pdf")).await;

        assert!(matches!(result, Err(PipelineError::InvalidConfig(_))));
        assert_eq!(pipeline.stage(), PipelineStage::Idle);
    }

    #[tokio::test]
    async fn unsupported_suffix_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("report.txt");
        let settings = PipelineSettings {
            mode: DeckMode::CountsOnly,
            ..Default::default()
        };

        let mut pipeline = pipeline("ก", settings);
        let result = pipeline.run(&source).await;

        assert!(matches!(result, Err(PipelineError::UnsupportedFileType(_))));
        assert_eq!(
            pipeline.stage(),
            PipelineStage::Failed { stage: FailedStage::Extracting }
        );
        assert!(!dir.path().join("report.txt.apkg").exists());
    }

    #[tokio::test]
    async fn extraction_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.pdf");
        let mut pipeline: TestPipeline = Pipeline::new(
            TextExtractor(Err("corrupt xref table".to_string())),
            WhitespaceSegmenter,
            RecordingSerializer::default(),
            PipelineSettings::default(),
        )
        .with_dictionary(Arc::new(StubDictionary::default()));

        let result = pipeline.run(&source).await;

        assert!(matches!(result, Err(PipelineError::Extraction(_))));
        assert_eq!(
            pipeline.stage(),
            PipelineStage::Failed { stage: FailedStage::Extracting }
        );
    }

    #[tokio::test]
    async fn serialization_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("lesson.pdf");
        let mut pipeline: TestPipeline = Pipeline::new(
            TextExtractor(Ok("ก".to_string())),
            WhitespaceSegmenter,
            RecordingSerializer {
                fail: true,
                ..Default::default()
            },
            PipelineSettings::default(),
        )
        .with_dictionary(Arc::new(StubDictionary::default()));

        let result = pipeline.run(&source).await;

        assert!(matches!(result, Err(PipelineError::Serialization(_))));
        assert_eq!(
            pipeline.stage(),
            PipelineStage::Failed { stage: FailedStage::Building }
        );
        assert!(!dir.path().join("lesson.pdf.apkg").exists());
    }

    #[tokio::test]
    async fn dictionary_failures_never_fail_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("lesson.pdf");
        let dictionary = StubDictionary::default()
            .with("ก", "N", &["a"], &[])
            .failing_on("ก")
            .failing_on("ข");

        let mut pipeline = pipeline("ก ข", PipelineSettings::default())
            .with_dictionary(Arc::new(dictionary));
        let report = pipeline.run(&source).await.unwrap();

        assert_eq!(report.resolved, 0);
        assert_eq!(report.unresolved, 2);
        assert_eq!(pipeline.stage(), PipelineStage::Done);
    }

    #[tokio::test]
    async fn normalizer_runs_before_segmentation() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("lesson.pdf");
        let settings = PipelineSettings {
            mode: DeckMode::CountsOnly,
            ..Default::default()
        };

        // the English line is dropped, the tab is stripped
        let mut pipeline = pipeline("ก ข\nhello ก\n\tก", settings);
        let report = pipeline.run(&source).await.unwrap();

        let deck = pipeline.serializer.deck.lock().unwrap().clone().unwrap();
        let fronts: Vec<&str> = deck.cards.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["ก", "ขก"]);
        assert_eq!(report.token_count, 2);
    }
}
