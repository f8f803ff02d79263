use std::time::Duration;

use async_trait::async_trait;
use fin_core::{Error, PipelineConfig, Result};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use scraper::Html;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::scrapers::{utils, RedirectDecoder};

/// Signature and timestamp Google embeds in each article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodingParams {
    pub signature: String,
    pub timestamp: String,
}

/// Resolves `news.google.com` article links through Google's batch endpoint.
/// Consecutive decodes are spaced at least `interval` apart.
#[derive(Debug)]
pub struct GoogleNewsDecoder {
    client: Client,
    user_agent: String,
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl GoogleNewsDecoder {
    const BASE_URL: &'static str = "https://news.google.com";
    const BATCH_URL: &'static str = "https://news.google.com/_/DotsSplashUi/data/batchexecute";

    pub fn new(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(config.decode_timeout).build()?,
            user_agent: config.extractor.user_agent.clone(),
            interval: config.decode_interval,
            last_request: Mutex::new(None),
        })
    }

    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(at) = *last {
            let elapsed = at.elapsed();
            if elapsed < self.interval {
                sleep(self.interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn fetch_params(&self, article_id: &str) -> Result<DecodingParams> {
        let candidates = [
            format!("{}/articles/{}", Self::BASE_URL, article_id),
            format!("{}/rss/articles/{}", Self::BASE_URL, article_id),
        ];

        let mut last_error = None;
        for url in &candidates {
            match self.fetch_page(url).await {
                Ok(html) => match parse_decoding_params(&html) {
                    Some(params) => return Ok(params),
                    None => last_error = Some(Error::Decode(format!("No decoding params at {}", url))),
                },
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| Error::Decode("No decoding params".to_string())))
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

/// The base64 article id from `/articles/<id>` or `/read/<id>` links.
pub fn article_id(encoded: &str) -> Result<String> {
    let url = utils::parse_url(encoded.trim())?;
    if url.host_str() != Some("news.google.com") {
        return Err(Error::Decode(format!("Not a Google News URL: {}", encoded)));
    }
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();
    match segments.as_slice() {
        [.., kind, id] if *kind == "articles" || *kind == "read" => Ok(id.to_string()),
        _ => Err(Error::Decode(format!("No article id in {}", encoded))),
    }
}

pub fn parse_decoding_params(html: &str) -> Option<DecodingParams> {
    let document = Html::parse_document(html);
    let selector = utils::selector("c-wiz > div[jscontroller]").ok()?;
    let div = document.select(&selector).next()?;
    let signature = div.value().attr("data-n-a-sg")?.to_string();
    let timestamp = div.value().attr("data-n-a-ts")?.to_string();
    if signature.is_empty() || timestamp.is_empty() || !timestamp.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(DecodingParams { signature, timestamp })
}

/// Body of the `f.req` form field for one `garturlreq` call.
pub fn batch_request(article_id: &str, params: &DecodingParams) -> String {
    let inner = format!(
        r#"["garturlreq",[["X","X",["X","X"],null,null,1,1,"US:en",null,1,null,null,null,null,null,0,1],"X","X",1,[1,1,1],1,1,null,0,0,null,0],"{}",{},"{}"]"#,
        article_id, params.timestamp, params.signature
    );
    json!([[["Fbv4je", inner]]]).to_string()
}

/// Pulls the decoded URL out of a batchexecute response.
pub fn parse_batch_response(body: &str) -> Result<String> {
    let chunk = body
        .split("\n\n")
        .nth(1)
        .ok_or_else(|| Error::Decode("Unexpected batch response layout".to_string()))?;
    let outer: Value = serde_json::from_str(chunk)
        .map_err(|e| Error::Decode(format!("Malformed batch response: {}", e)))?;
    let payload = outer[0][2]
        .as_str()
        .ok_or_else(|| Error::Decode("Batch response has no payload".to_string()))?;
    let inner: Value = serde_json::from_str(payload)
        .map_err(|e| Error::Decode(format!("Malformed batch payload: {}", e)))?;
    inner[1]
        .as_str()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| Error::Decode("Batch payload has no decoded URL".to_string()))
}

#[async_trait]
impl RedirectDecoder for GoogleNewsDecoder {
    async fn decode(&self, encoded: &str) -> Result<String> {
        let id = article_id(encoded)?;
        self.throttle().await;

        let params = self.fetch_params(&id).await?;
        debug!("Decoding {} (ts {})", id, params.timestamp);

        let response = self
            .client
            .post(Self::BATCH_URL)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded;charset=UTF-8")
            .header(USER_AGENT, &self.user_agent)
            .form(&[("f.req", batch_request(&id, &params))])
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        parse_batch_response(&body)
    }
}
