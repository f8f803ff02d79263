use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use fin_core::{
    DatasetStore, Error, LinkDeduplicator, PipelineConfig, Result, SearchTerm, SentimentScorer,
    SourceCatalog,
};
use fin_inference::SentimentClassifier;
use fin_storage::{load_search_terms, load_sources, RetentionArchiver, RetentionOutcome};
use tracing::info;

use crate::collector::{ArticleCollector, SkipCounts};
use crate::dates::{BestEffortDateParser, DateParser};
use crate::resolver::UrlResolver;
use crate::scrapers::{
    ArticleExtractor, ContentExtractor, GoogleNewsDecoder, GoogleNewsSearch, NewsSearch,
    RedirectDecoder,
};

/// Totals for one full pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub terms: usize,
    pub hits: usize,
    pub collected: usize,
    pub skipped: SkipCounts,
    pub retention: RetentionOutcome,
}

/// Runs every search term through collection, then applies retention to
/// the merged dataset.
pub struct PipelineRunner {
    config: PipelineConfig,
    search: Arc<dyn NewsSearch>,
    resolver: UrlResolver,
    extractor: Arc<dyn ContentExtractor>,
    classifier: SentimentClassifier,
    dates: Arc<dyn DateParser>,
    store: Arc<dyn DatasetStore>,
}

impl fmt::Debug for PipelineRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineRunner")
            .field("config", &self.config)
            .field("search", &self.search.name())
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

impl PipelineRunner {
    pub fn new(
        config: PipelineConfig,
        search: Arc<dyn NewsSearch>,
        decoder: Arc<dyn RedirectDecoder>,
        extractor: Arc<dyn ContentExtractor>,
        scorer: Arc<dyn SentimentScorer>,
        store: Arc<dyn DatasetStore>,
    ) -> Self {
        Self {
            config,
            search,
            resolver: UrlResolver::new(decoder),
            extractor,
            classifier: SentimentClassifier::new(scorer),
            dates: Arc::new(BestEffortDateParser),
            store,
        }
    }

    /// Google News search and decoding plus the generic article extractor.
    pub fn with_defaults(
        config: PipelineConfig,
        scorer: Arc<dyn SentimentScorer>,
        store: Arc<dyn DatasetStore>,
    ) -> Result<Self> {
        let search = Arc::new(GoogleNewsSearch::new(&config)?);
        let decoder = Arc::new(GoogleNewsDecoder::new(&config)?);
        let extractor = Arc::new(ArticleExtractor::new()?);
        Ok(Self::new(config, search, decoder, extractor, scorer, store))
    }

    pub async fn load_catalog(&self) -> Result<SourceCatalog> {
        let catalog = load_sources(&self.config.sources_path).await?;
        if catalog.is_empty() {
            return Err(Error::ConfigMissing(format!(
                "no approved sources in {}",
                self.config.sources_path.display()
            )));
        }
        Ok(catalog)
    }

    pub async fn load_terms(&self) -> Result<Vec<SearchTerm>> {
        let terms = load_search_terms(&self.config.terms_path).await?;
        if terms.is_empty() {
            return Err(Error::ConfigMissing(format!(
                "no search terms in {}",
                self.config.terms_path.display()
            )));
        }
        Ok(terms)
    }

    pub async fn decode(&self, encoded: &str) -> Result<String> {
        self.resolver.decode(encoded).await
    }

    pub async fn run(&self) -> Result<RunReport> {
        self.run_at(Local::now().naive_local()).await
    }

    /// Both inputs are checked before anything is fetched or written.
    pub async fn run_at(&self, now: NaiveDateTime) -> Result<RunReport> {
        let catalog = self.load_catalog().await?;
        let terms = self.load_terms().await?;
        info!(
            "📋 Loaded {} approved sources and {} search terms",
            catalog.len(),
            terms.len()
        );

        let archiver = RetentionArchiver::new(self.store.clone(), self.config.retention_days);
        let existing = archiver.load_existing().await?;
        let seen = LinkDeduplicator::from_records(&existing);
        info!("📚 {} articles already in the current window", existing.len());

        let collector = ArticleCollector {
            search: self.search.as_ref(),
            resolver: &self.resolver,
            extractor: self.extractor.as_ref(),
            classifier: &self.classifier,
            dates: self.dates.as_ref(),
            catalog: &catalog,
            seen: &seen,
            config: &self.config,
        };

        let mut hits = 0;
        let mut skipped = SkipCounts::default();
        let mut collected = Vec::new();
        for term in &terms {
            let report = collector.collect(term, now).await;
            hits += report.hits;
            skipped.merge(&report.skipped);
            collected.extend(report.records);
        }
        let collected_count = collected.len();
        info!(
            "📰 Collected {} new articles from {} results ({} skipped)",
            collected_count,
            hits,
            skipped.total()
        );

        let retention = archiver.apply(existing, collected, now).await?;

        Ok(RunReport {
            terms: terms.len(),
            hits,
            collected: collected_count,
            skipped,
            retention,
        })
    }
}
