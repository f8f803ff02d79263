use async_trait::async_trait;
use fin_core::{ExtractedContent, ExtractorConfig, Result, SearchHit};

pub mod article;
pub mod google;
pub mod nlp;

pub use article::ArticleExtractor;
pub use google::{GoogleNewsDecoder, GoogleNewsSearch};

#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// Returns the name of the search backend
    fn name(&self) -> &str;

    /// Raw hits for `term` published within the last `lookback_days`
    async fn search(&self, term: &str, lookback_days: u32) -> Result<Vec<SearchHit>>;
}

#[async_trait]
pub trait RedirectDecoder: Send + Sync {
    /// Resolves an encoded redirect link to the article URL
    async fn decode(&self, encoded: &str) -> Result<String>;
}

#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Downloads the article at `url` and pulls out its summary and keywords
    async fn extract(&self, url: &str, config: &ExtractorConfig) -> Result<ExtractedContent>;
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use fin_core::{Error, Result};
    use scraper::{ElementRef, Html, Selector};
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    pub fn selector(css: &str) -> Result<Selector> {
        Selector::parse(css).map_err(|e| Error::Parse(format!("Invalid selector {}: {:?}", css, e)))
    }

    pub fn element_text(el: ElementRef<'_>) -> String {
        el.text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn extract_text(document: &Html, css: &str) -> Result<Option<String>> {
        let selector = selector(css)?;
        Ok(document
            .select(&selector)
            .map(element_text)
            .find(|text| !text.is_empty()))
    }

    pub fn extract_texts(document: &Html, css: &str) -> Result<Vec<String>> {
        let selector = selector(css)?;
        Ok(document
            .select(&selector)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect())
    }

    pub fn extract_attr(document: &Html, css: &str, attr: &str) -> Result<Option<String>> {
        let selector = selector(css)?;
        Ok(document
            .select(&selector)
            .filter_map(|el| el.value().attr(attr))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::utils;
    use scraper::Html;

    #[test]
    fn test_parse_url() {
        assert!(utils::parse_url("https://example.com").is_ok());
        assert!(utils::parse_url("invalid-url").is_err());
    }

    #[test]
    fn test_extract_text() {
        let html = r#"
            <div class="title">  Test
                Title </div>
            <div class="content">Test Content</div>
        "#;
        let document = Html::parse_document(html);

        assert_eq!(
            utils::extract_text(&document, ".title").unwrap(),
            Some("Test Title".to_string())
        );
        assert_eq!(utils::extract_text(&document, ".invalid").unwrap(), None);
        assert!(utils::extract_text(&document, "[[").is_err());
    }

    #[test]
    fn test_extract_texts() {
        let html = r#"
            <div class="item">Item 1</div>
            <div class="item"> </div>
            <div class="item">Item 2</div>
        "#;
        let document = Html::parse_document(html);

        let texts = utils::extract_texts(&document, ".item").unwrap();
        assert_eq!(texts, vec!["Item 1", "Item 2"]);
    }

    #[test]
    fn test_extract_attr() {
        let html = r#"<meta property="og:image" content=" https://cdn.example.com/a.jpg ">"#;
        let document = Html::parse_document(html);
        assert_eq!(
            utils::extract_attr(&document, "meta[property='og:image']", "content").unwrap(),
            Some("https://cdn.example.com/a.jpg".to_string())
        );
    }
}
