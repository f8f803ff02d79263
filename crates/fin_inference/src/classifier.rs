use std::fmt;
use std::sync::Arc;

use fin_core::{ScorerOptions, Sentiment, SentimentScorer};

pub const NEGATIVE_THRESHOLD: f64 = -0.05;
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Buckets a compound score. Both thresholds are inclusive toward their
/// non-neutral label, so neutral is the open interval (-0.05, 0.05).
pub fn classify(score: f64) -> Sentiment {
    if score <= NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else if score >= POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

pub struct SentimentClassifier {
    scorer: Arc<dyn SentimentScorer>,
}

impl fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    /// Scores `text` and returns the bucket together with the raw polarity.
    pub fn score_and_classify(&self, text: &str, options: &ScorerOptions) -> (Sentiment, f64) {
        let polarity = self.scorer.score(text, options);
        (classify(polarity), polarity)
    }
}
