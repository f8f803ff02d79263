pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use catalog::{LinkDeduplicator, SourceCatalog};
pub use config::{ExtractorConfig, Indicator, PipelineConfig, ScorerOptions};
pub use error::{Error, Result};
pub use models::SentimentScorer;
pub use storage::DatasetStore;
pub use types::{ArticleRecord, ExtractedContent, SearchHit, SearchTerm, Sentiment};
