use std::sync::Arc;

use anyhow::anyhow;
use fin_core::{Error, Result, SentimentScorer};
use tracing::info;

pub mod lexicon;
pub mod lexicons;

pub use lexicon::LexiconModel;

pub const AVAILABLE_MODELS: &[&str] = &["lexicon"];

/// Build the scorer named on the command line.
pub fn create_model(name: &str) -> Result<Arc<dyn SentimentScorer>> {
    match name.trim().to_lowercase().as_str() {
        "lexicon" | "finvader" => {
            let model = LexiconModel::new();
            info!("🧠 Using sentiment model {}", model.name());
            Ok(Arc::new(model))
        }
        other => Err(Error::External(anyhow!(
            "Unknown sentiment model '{}'. Available models: {}",
            other,
            AVAILABLE_MODELS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_model() {
        assert_eq!(create_model("lexicon").unwrap().name(), "lexicon");
        assert_eq!(create_model(" FinVADER ").unwrap().name(), "lexicon");
        assert!(create_model("gpt").is_err());
    }
}
