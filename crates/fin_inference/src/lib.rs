pub mod classifier;
pub mod models;

pub use classifier::{classify, SentimentClassifier};
pub use models::create_model;

pub mod prelude {
    pub use super::classifier::{classify, SentimentClassifier};
    pub use super::models::{create_model, LexiconModel};
    pub use fin_core::{Result, ScorerOptions, Sentiment, SentimentScorer};
}
