use std::fmt;
use std::sync::Arc;

use fin_core::{Error, Result, SourceCatalog};
use url::Url;

use crate::scrapers::RedirectDecoder;

pub const ALLOWED_DOMAIN_SUFFIXES: &[&str] = &[".com", ".org", ".net", ".edu"];

pub fn has_allowed_suffix(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return false;
    };
    match parsed.host_str() {
        Some(host) => {
            let host = host.trim_end_matches('.').to_lowercase();
            ALLOWED_DOMAIN_SUFFIXES.iter().any(|suffix| host.ends_with(suffix))
        }
        None => false,
    }
}

/// An article is kept only when its source is approved and its URL lives
/// on one of the allowed top-level domains.
pub fn is_valid_source(source_name: &str, url: &str, approved: &SourceCatalog) -> bool {
    approved.contains(source_name) && has_allowed_suffix(url)
}

/// Turns search-engine redirect links into canonical article URLs.
pub struct UrlResolver {
    decoder: Arc<dyn RedirectDecoder>,
}

impl fmt::Debug for UrlResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlResolver").finish_non_exhaustive()
    }
}

impl UrlResolver {
    pub fn new(decoder: Arc<dyn RedirectDecoder>) -> Self {
        Self { decoder }
    }

    /// Any failure is reported as a decode error so the caller can skip the article.
    pub async fn decode(&self, encoded: &str) -> Result<String> {
        let decoded = match self.decoder.decode(encoded).await {
            Ok(url) => url,
            Err(Error::Decode(msg)) => return Err(Error::Decode(msg)),
            Err(e) => return Err(Error::Decode(format!("{}: {}", encoded, e))),
        };
        let decoded = decoded.trim();
        if decoded.is_empty() {
            return Err(Error::Decode(format!("Empty decoded URL for {}", encoded)));
        }
        Ok(decoded.to_string())
    }

    pub fn is_valid_source(&self, source_name: &str, url: &str, approved: &SourceCatalog) -> bool {
        is_valid_source(source_name, url, approved)
    }
}
