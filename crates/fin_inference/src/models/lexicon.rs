use std::collections::{HashMap, HashSet};
use std::fmt;

use fin_core::{Indicator, ScorerOptions, SentimentScorer};

use super::lexicons::{
    BOOSTERS, GENERAL, HENRY_NEGATIVE, HENRY_POSITIVE, HENRY_WEIGHT, NEGATIONS, SENTIBIGNOMICS,
};

const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCREMENT: f64 = 0.293;
const NORMALIZATION_ALPHA: f64 = 15.0;
const NEGATION_WINDOW: usize = 3;

/// Rule-based scorer over a general lexicon plus two optional financial
/// lexicons. Finance lexicons take precedence over the general one.
pub struct LexiconModel {
    general: HashMap<&'static str, f64>,
    sentibignomics: HashMap<&'static str, f64>,
    henry_positive: HashSet<&'static str>,
    henry_negative: HashSet<&'static str>,
}

impl fmt::Debug for LexiconModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconModel")
            .field("general", &self.general.len())
            .field("sentibignomics", &self.sentibignomics.len())
            .field("henry", &(self.henry_positive.len() + self.henry_negative.len()))
            .finish()
    }
}

impl Default for LexiconModel {
    fn default() -> Self {
        Self::new()
    }
}

struct Token {
    word: String,
    negation: bool,
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|chunk| {
            let lower = chunk.to_lowercase();
            let trimmed = lower.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
            if trimmed.is_empty() {
                return None;
            }
            let word: String = trimmed.chars().filter(|c| *c != '\'').collect();
            let negation = trimmed.ends_with("n't") || NEGATIONS.contains(&word.as_str());
            Some(Token { word, negation })
        })
        .collect()
}

fn normalize(sum: f64) -> f64 {
    let score = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
    score.clamp(-1.0, 1.0)
}

impl LexiconModel {
    pub fn new() -> Self {
        Self {
            general: GENERAL.iter().copied().collect(),
            sentibignomics: SENTIBIGNOMICS.iter().copied().collect(),
            henry_positive: HENRY_POSITIVE.iter().copied().collect(),
            henry_negative: HENRY_NEGATIVE.iter().copied().collect(),
        }
    }

    fn lookup(&self, word: &str, options: &ScorerOptions) -> f64 {
        if options.use_sentibignomics {
            if let Some(valence) = self.sentibignomics.get(word) {
                return *valence;
            }
        }
        if options.use_henry {
            if self.henry_positive.contains(word) {
                return HENRY_WEIGHT;
            }
            if self.henry_negative.contains(word) {
                return -HENRY_WEIGHT;
            }
        }
        self.general.get(word).copied().unwrap_or(0.0)
    }

    /// Per-token valences after booster and negation adjustments.
    fn valences(&self, text: &str, options: &ScorerOptions) -> Vec<f64> {
        let tokens = tokenize(text);
        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let mut valence = self.lookup(&token.word, options);
                if valence == 0.0 {
                    return 0.0;
                }
                if i > 0 && BOOSTERS.contains(&tokens[i - 1].word.as_str()) {
                    valence += BOOSTER_INCREMENT * valence.signum();
                }
                let window = &tokens[i.saturating_sub(NEGATION_WINDOW)..i];
                if window.iter().any(|t| t.negation) {
                    valence *= NEGATION_SCALAR;
                }
                valence
            })
            .collect()
    }

    /// Share of positive, negative and neutral weight, each in [0, 1].
    fn proportions(valences: &[f64]) -> (f64, f64, f64) {
        let mut positive = 0.0;
        let mut negative = 0.0;
        let mut neutral = 0.0;
        for v in valences {
            if *v > 0.0 {
                positive += v + 1.0;
            } else if *v < 0.0 {
                negative += v - 1.0;
            } else {
                neutral += 1.0;
            }
        }
        let total = positive + negative.abs() + neutral;
        if total == 0.0 {
            return (0.0, 0.0, 0.0);
        }
        (positive / total, negative.abs() / total, neutral / total)
    }
}

impl SentimentScorer for LexiconModel {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn score(&self, text: &str, options: &ScorerOptions) -> f64 {
        let valences = self.valences(text, options);
        match options.indicator {
            Indicator::Compound => normalize(valences.iter().sum()),
            Indicator::Positive => Self::proportions(&valences).0,
            Indicator::Negative => Self::proportions(&valences).1,
            Indicator::Neutral => Self::proportions(&valences).2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(text: &str) -> f64 {
        LexiconModel::new().score(text, &ScorerOptions::default())
    }

    #[test]
    fn test_positive_text() {
        let score = compound("Profits surged to a record high and the outlook is strong.");
        assert!(score >= 0.05, "score was {score}");
        assert!(score <= 1.0);
    }

    #[test]
    fn test_negative_text() {
        let score = compound("Shares plunged after the company reported heavy losses and weak demand.");
        assert!(score <= -0.05, "score was {score}");
        assert!(score >= -1.0);
    }

    #[test]
    fn test_neutral_text() {
        assert_eq!(compound("The meeting is scheduled for Tuesday."), 0.0);
        assert_eq!(compound(""), 0.0);
    }

    #[test]
    fn test_negation_flips_valence() {
        assert!(compound("Results were good") > 0.0);
        assert!(compound("Results were not good") < 0.0);
        assert!(compound("Results weren't good") < 0.0);
    }

    #[test]
    fn test_booster_strengthens() {
        assert!(compound("a very strong quarter") > compound("a strong quarter"));
    }

    #[test]
    fn test_lexicon_flags() {
        let model = LexiconModel::new();
        let text = "The fund should outperform";
        let none = ScorerOptions {
            use_sentibignomics: false,
            use_henry: false,
            indicator: Indicator::Compound,
        };
        let henry_only = ScorerOptions { use_henry: true, ..none };
        assert_eq!(model.score(text, &none), 0.0);
        assert!(model.score(text, &henry_only) > 0.0);
        assert!(model.score(text, &ScorerOptions::default()) > model.score(text, &henry_only));
    }

    #[test]
    fn test_proportion_indicators() {
        let model = LexiconModel::new();
        let text = "Profits rose but losses widened";
        let pick = |indicator| model.score(text, &ScorerOptions { indicator, ..ScorerOptions::default() });
        let (pos, neg, neu) = (
            pick(Indicator::Positive),
            pick(Indicator::Negative),
            pick(Indicator::Neutral),
        );
        assert!(pos > 0.0 && neg > 0.0 && neu > 0.0);
        assert!((pos + neg + neu - 1.0).abs() < 1e-9);
    }
}
