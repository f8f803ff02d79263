use crate::config::ScorerOptions;

pub trait SentimentScorer: Send + Sync {
    fn name(&self) -> &str;

    /// Score a piece of text. Compound scores fall in [-1, 1].
    fn score(&self, text: &str, options: &ScorerOptions) -> f64;
}
