//! Offline stand-ins for the network collaborators.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use fin_core::{
    Error, ExtractedContent, ExtractorConfig, Result, ScorerOptions, SearchHit, SentimentScorer,
};

use crate::scrapers::{ContentExtractor, NewsSearch, RedirectDecoder};

pub fn hit(title: &str, encoded: &str, source: &str, date: Option<&str>) -> SearchHit {
    SearchHit {
        title: title.to_string(),
        encoded_link: encoded.to_string(),
        source: source.to_string(),
        pub_date_text: date.map(str::to_string),
    }
}

/// A summary of exactly `chars` characters.
pub fn text_of_len(chars: usize) -> String {
    "Shares rallied after strong earnings. "
        .chars()
        .cycle()
        .take(chars)
        .collect()
}

/// Serves canned hits per term. Unknown terms fail like an unreachable feed.
#[derive(Default)]
pub struct FakeSearch {
    results: HashMap<String, Vec<SearchHit>>,
    pub queries: Mutex<Vec<(String, u32)>>,
}

impl FakeSearch {
    pub fn with_hits(mut self, term: &str, hits: Vec<SearchHit>) -> Self {
        self.results.insert(term.to_string(), hits);
        self
    }
}

#[async_trait]
impl NewsSearch for FakeSearch {
    fn name(&self) -> &str {
        "fake"
    }

    async fn search(&self, term: &str, lookback_days: u32) -> Result<Vec<SearchHit>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((term.to_string(), lookback_days));
        }
        self.results
            .get(term)
            .cloned()
            .ok_or_else(|| Error::Parse(format!("feed unavailable for {}", term)))
    }
}

#[derive(Default)]
pub struct FakeDecoder {
    links: HashMap<String, String>,
}

impl FakeDecoder {
    pub fn with_link(mut self, encoded: &str, decoded: &str) -> Self {
        self.links.insert(encoded.to_string(), decoded.to_string());
        self
    }
}

#[async_trait]
impl RedirectDecoder for FakeDecoder {
    async fn decode(&self, encoded: &str) -> Result<String> {
        self.links
            .get(encoded)
            .cloned()
            .ok_or_else(|| Error::Decode(format!("no mapping for {}", encoded)))
    }
}

#[derive(Default)]
pub struct FakeExtractor {
    pages: HashMap<String, String>,
    images: HashMap<String, String>,
}

impl FakeExtractor {
    pub fn with_page(mut self, url: &str, summary: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), summary.into());
        self
    }

    pub fn with_image(mut self, url: &str, image: &str) -> Self {
        self.images.insert(url.to_string(), image.to_string());
        self
    }
}

#[async_trait]
impl ContentExtractor for FakeExtractor {
    async fn extract(&self, url: &str, _config: &ExtractorConfig) -> Result<ExtractedContent> {
        let summary = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Extraction(format!("404 for {}", url)))?;
        Ok(ExtractedContent {
            summary,
            keywords: vec!["shares".to_string(), "earnings".to_string()],
            top_image: self.images.get(url).cloned(),
        })
    }
}

pub struct FixedScorer(pub f64);

impl SentimentScorer for FixedScorer {
    fn name(&self) -> &str {
        "fixed"
    }

    fn score(&self, _text: &str, _options: &ScorerOptions) -> f64 {
        self.0
    }
}
