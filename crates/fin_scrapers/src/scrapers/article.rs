use async_trait::async_trait;
use fin_core::{Error, ExtractedContent, ExtractorConfig, Result};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use scraper::Html;

use crate::scrapers::nlp::{self, KEYWORD_COUNT, SUMMARY_SENTENCES};
use crate::scrapers::{utils, ContentExtractor};

/// Generic article downloader: body paragraphs, keywords and an extractive
/// summary from any news page.
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    client: Client,
}

impl ArticleExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
        })
    }
}

/// Parses an article page. Fails when no body text can be found.
pub fn extract_from_html(html: &str, fetch_images: bool) -> Result<ExtractedContent> {
    let document = Html::parse_document(html);

    let title = match utils::extract_attr(&document, "meta[property='og:title']", "content")? {
        Some(title) => title,
        None => utils::extract_text(&document, "h1")?
            .or(utils::extract_text(&document, "title")?)
            .unwrap_or_default(),
    };

    let mut paragraphs = utils::extract_texts(&document, "article p")?;
    if paragraphs.is_empty() {
        paragraphs = utils::extract_texts(&document, "p")?;
    }
    let text = paragraphs.join("\n");
    if text.trim().is_empty() {
        return Err(Error::Extraction("No article text found".to_string()));
    }

    let keywords = nlp::keywords(&format!("{}\n{}", title, text), KEYWORD_COUNT);
    let mut summary = nlp::summarize(&title, &text, SUMMARY_SENTENCES);
    if summary.is_empty() {
        summary = text;
    }

    let top_image = if fetch_images {
        match utils::extract_attr(&document, "meta[property='og:image']", "content")? {
            Some(image) => Some(image),
            None => utils::extract_attr(&document, "img[src]", "src")?,
        }
    } else {
        None
    };

    Ok(ExtractedContent {
        summary,
        keywords,
        top_image,
    })
}

#[async_trait]
impl ContentExtractor for ArticleExtractor {
    async fn extract(&self, url: &str, config: &ExtractorConfig) -> Result<ExtractedContent> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &config.user_agent)
            .timeout(config.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Extraction(format!("{} returned {}", url, status)));
        }
        let html = response.text().await?;

        extract_from_html(&html, config.fetch_images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head>
            <title>Ignored page title</title>
            <meta property="og:title" content="Chipmakers rally on record demand">
            <meta property="og:image" content="https://cdn.example.com/chips.jpg">
          </head>
          <body>
            <p>Subscribe to our newsletter.</p>
            <article>
              <p>Chipmakers rallied on Tuesday after record demand for data center chips.</p>
              <p>Analysts said chip demand should stay strong through next year.</p>
            </article>
          </body>
        </html>"#;

    #[test]
    fn test_extract_prefers_article_paragraphs() {
        let content = extract_from_html(PAGE, false).unwrap();
        assert!(content.summary.contains("Chipmakers rallied on Tuesday"));
        assert!(!content.summary.contains("newsletter"));
        assert!(content.keywords.contains(&"demand".to_string()));
        assert_eq!(content.top_image, None);
    }

    #[test]
    fn test_extract_images_when_enabled() {
        let content = extract_from_html(PAGE, true).unwrap();
        assert_eq!(content.top_image.as_deref(), Some("https://cdn.example.com/chips.jpg"));
    }

    #[test]
    fn test_extract_falls_back_to_all_paragraphs() {
        let html = "<html><body><h1>Gold</h1><p>Gold prices climbed as the dollar weakened.</p></body></html>";
        let content = extract_from_html(html, true).unwrap();
        assert_eq!(content.summary, "Gold prices climbed as the dollar weakened.");
        assert_eq!(content.top_image, None);
    }

    #[test]
    fn test_extract_without_text_fails() {
        let html = "<html><body><div>Only a div</div></body></html>";
        assert!(matches!(extract_from_html(html, false), Err(Error::Extraction(_))));
    }
}
