pub mod apkg;
pub mod config;
pub mod dictionary;
pub mod extract;
pub mod segment;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{DocumentKind, Pipeline, PipelineError, PipelineReport};

use crate::apkg::ApkgSerializer;
use crate::config::{Cli, Config, DictionarySource, SegmenterArg};
use crate::dictionary::{AnyDictionary, HttpDictionary, LexiconDictionary};
use crate::extract::FileExtractor;
use crate::segment::{AnySegmenter, IcuSegmenter, LongestMatchSegmenter};

/// Parse arguments, set up logging, and run one document through the pipeline.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // argument errors are fatal like any other; help and version are not
        Err(e) if e.use_stderr() => {
            let message = e.to_string();
            anyhow::bail!("{}", message.trim_start_matches("error: ").trim_end());
        }
        Err(e) => e.exit(),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| cli.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if !cli.ignored.is_empty() {
        tracing::warn!(ignored = ?cli.ignored, "extra arguments ignored");
    }

    let config = cli.into_config()?;
    let report = build_deck(config).await?;

    tracing::info!(
        tokens = report.token_count,
        unique = report.unique_words,
        resolved = report.resolved,
        unresolved = report.unresolved,
        cards = report.card_count,
        mode = report.mode.as_str(),
        "deck complete"
    );
    println!("Package has been generated: {}", report.output_path.display());
    Ok(())
}

/// Open collaborators for `config` and run the pipeline.
pub async fn build_deck(config: Config) -> Result<PipelineReport, PipelineError> {
    // reject unknown formats before loading a dictionary
    DocumentKind::from_path(&config.source)?;

    let wants_dictionary =
        config.settings.mode.needs_dictionary() || config.segmenter == SegmenterArg::LongestMatch;
    let dictionary = match &config.dictionary {
        Some(source) if wants_dictionary => Some(open_dictionary(source, &config).await?),
        _ => None,
    };

    let segmenter = match (config.segmenter, dictionary.as_deref()) {
        (SegmenterArg::LongestMatch, Some(AnyDictionary::Lexicon(lexicon))) => {
            let segmenter = LongestMatchSegmenter::from_words(lexicon.headwords());
            tracing::info!(words = segmenter.len(), "longest-match segmenter ready");
            AnySegmenter::LongestMatch(segmenter)
        }
        (SegmenterArg::LongestMatch, _) => {
            return Err(PipelineError::InvalidConfig(
                "the longest-match segmenter needs a lexicon file".to_string(),
            ))
        }
        (SegmenterArg::Icu, _) => AnySegmenter::Icu(IcuSegmenter::new()),
    };

    let mut pipeline = Pipeline::new(
        FileExtractor,
        segmenter,
        ApkgSerializer,
        config.settings.clone(),
    );
    if let Some(dictionary) = dictionary {
        pipeline = pipeline.with_dictionary(dictionary);
    }
    pipeline.run(&config.source).await
}

async fn open_dictionary(
    source: &DictionarySource,
    config: &Config,
) -> Result<Arc<AnyDictionary>, PipelineError> {
    let dictionary = match source {
        DictionarySource::Lexicon(path) => {
            AnyDictionary::Lexicon(LexiconDictionary::open(path).await?)
        }
        DictionarySource::Service(url) => {
            let http = HttpDictionary::new(url, config.settings.lookup_timeout)?;
            http.check_connectivity().await?;
            AnyDictionary::Http(http)
        }
    };
    Ok(Arc::new(dictionary))
}
