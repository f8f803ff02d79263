use std::time::Duration;

use async_trait::async_trait;
use fin_core::config::pick_user_agent;
use fin_core::{Error, PipelineConfig, Result, SearchHit};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::scrapers::NewsSearch;

/// Google News RSS search.
#[derive(Debug, Clone)]
pub struct GoogleNewsSearch {
    client: Client,
    user_agents: Vec<String>,
    timeout: Duration,
}

impl GoogleNewsSearch {
    const SEARCH_URL: &'static str = "https://news.google.com/rss/search";

    pub fn new(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            user_agents: config.user_agents.clone(),
            timeout: config.search_timeout,
        })
    }

    pub fn search_url(term: &str, lookback_days: u32) -> Result<Url> {
        let query = format!("{} when:{}d", term.trim(), lookback_days);
        Url::parse_with_params(Self::SEARCH_URL, &[("q", query)])
            .map_err(|e| Error::InvalidUrl(e.to_string()))
    }
}

/// Hits from an RSS document, in feed order. Items without a link are dropped.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<SearchHit>> {
    let channel = rss::Channel::read_from(bytes)
        .map_err(|e| Error::Parse(format!("Failed to parse Google News RSS: {}", e)))?;

    Ok(channel
        .items()
        .iter()
        .filter_map(|item| {
            let encoded_link = item.link()?.trim().to_string();
            if encoded_link.is_empty() {
                return None;
            }
            Some(SearchHit {
                title: item.title().unwrap_or_default().trim().to_string(),
                encoded_link,
                source: item
                    .source()
                    .and_then(|s| s.title())
                    .unwrap_or_default()
                    .trim()
                    .to_lowercase(),
                pub_date_text: item.pub_date().map(|d| d.trim().to_string()),
            })
        })
        .collect())
}

#[async_trait]
impl NewsSearch for GoogleNewsSearch {
    fn name(&self) -> &str {
        "Google News"
    }

    async fn search(&self, term: &str, lookback_days: u32) -> Result<Vec<SearchHit>> {
        let url = Self::search_url(term, lookback_days)?;
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, pick_user_agent(&self.user_agents))
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;

        parse_feed(&body)
    }
}
