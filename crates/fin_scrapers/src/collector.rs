use std::fmt;

use chrono::NaiveDateTime;
use fin_core::{
    ArticleRecord, Error, LinkDeduplicator, PipelineConfig, SearchHit, SearchTerm, SourceCatalog,
};
use fin_inference::SentimentClassifier;

use crate::dates::DateParser;
use crate::logging::Logger;
use crate::resolver::UrlResolver;
use crate::scrapers::{ContentExtractor, NewsSearch};

/// Why a search hit did not become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    Decode,
    Duplicate,
    Source,
    Extraction,
    ContentTooShort,
}

impl SkipReason {
    pub const ALL: [SkipReason; 5] = [
        SkipReason::Decode,
        SkipReason::Duplicate,
        SkipReason::Source,
        SkipReason::Extraction,
        SkipReason::ContentTooShort,
    ];
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::Decode => "decode",
            SkipReason::Duplicate => "duplicate",
            SkipReason::Source => "source",
            SkipReason::Extraction => "extraction",
            SkipReason::ContentTooShort => "too short",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub decode: usize,
    pub duplicate: usize,
    pub source: usize,
    pub extraction: usize,
    pub content_too_short: usize,
}

impl SkipCounts {
    fn slot(&mut self, reason: SkipReason) -> &mut usize {
        match reason {
            SkipReason::Decode => &mut self.decode,
            SkipReason::Duplicate => &mut self.duplicate,
            SkipReason::Source => &mut self.source,
            SkipReason::Extraction => &mut self.extraction,
            SkipReason::ContentTooShort => &mut self.content_too_short,
        }
    }

    pub fn record(&mut self, reason: SkipReason) {
        *self.slot(reason) += 1;
    }

    pub fn get(&self, reason: SkipReason) -> usize {
        match reason {
            SkipReason::Decode => self.decode,
            SkipReason::Duplicate => self.duplicate,
            SkipReason::Source => self.source,
            SkipReason::Extraction => self.extraction,
            SkipReason::ContentTooShort => self.content_too_short,
        }
    }

    pub fn total(&self) -> usize {
        SkipReason::ALL.iter().map(|r| self.get(*r)).sum()
    }

    pub fn merge(&mut self, other: &SkipCounts) {
        for reason in SkipReason::ALL {
            *self.slot(reason) += other.get(reason);
        }
    }
}

impl fmt::Display for SkipCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = SkipReason::ALL
            .iter()
            .map(|r| format!("{} {}", self.get(*r), r))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// What one search term produced.
#[derive(Debug, Clone)]
pub struct TermReport {
    pub term: SearchTerm,
    pub hits: usize,
    pub records: Vec<ArticleRecord>,
    pub skipped: SkipCounts,
}

struct Skip {
    reason: SkipReason,
    detail: String,
}

impl Skip {
    fn new(reason: SkipReason, detail: impl fmt::Display) -> Self {
        Self {
            reason,
            detail: detail.to_string(),
        }
    }
}

/// Turns one search term into article records, one hit at a time.
pub struct ArticleCollector<'a> {
    pub search: &'a dyn NewsSearch,
    pub resolver: &'a UrlResolver,
    pub extractor: &'a dyn ContentExtractor,
    pub classifier: &'a SentimentClassifier,
    pub dates: &'a dyn DateParser,
    pub catalog: &'a SourceCatalog,
    pub seen: &'a LinkDeduplicator,
    pub config: &'a PipelineConfig,
}

impl<'a> ArticleCollector<'a> {
    /// A failed search is logged and counts as zero hits.
    pub async fn collect(&self, term: &SearchTerm, scraped_at: NaiveDateTime) -> TermReport {
        let logger = Logger::new()
            .with_prefix(format!("[{}]", term.topic_id))
            .with_prefix(format!("{}:", term.search_term));

        let hits = match self
            .search
            .search(&term.search_term, self.config.lookback_days)
            .await
        {
            Ok(hits) => hits,
            Err(e) => {
                logger.error(&format!("❌ {} search failed: {}", self.search.name(), e));
                Vec::new()
            }
        };
        logger.info(&format!("🔍 {} results from {}", hits.len(), self.search.name()));

        let mut report = TermReport {
            term: term.clone(),
            hits: hits.len(),
            records: Vec::new(),
            skipped: SkipCounts::default(),
        };

        for hit in &hits {
            match self.process_hit(term, hit, scraped_at, &logger).await {
                Ok(record) => {
                    logger.debug(&format!("🆕 {} - {}", record.title, record.link));
                    report.records.push(record);
                }
                Err(skip) => {
                    logger.warn(&format!("⏭️ Skipping '{}' ({}): {}", hit.title, skip.reason, skip.detail));
                    report.skipped.record(skip.reason);
                }
            }
        }

        logger.info(&format!(
            "✅ {} new articles, {} skipped ({})",
            report.records.len(),
            report.skipped.total(),
            report.skipped
        ));
        report
    }

    async fn process_hit(
        &self,
        term: &SearchTerm,
        hit: &SearchHit,
        scraped_at: NaiveDateTime,
        logger: &Logger,
    ) -> std::result::Result<ArticleRecord, Skip> {
        let link = self
            .resolver
            .decode(&hit.encoded_link)
            .await
            .map_err(|e| Skip::new(SkipReason::Decode, e))?;

        if self.seen.contains(&link) {
            return Err(Skip::new(SkipReason::Duplicate, &link));
        }

        if !self.resolver.is_valid_source(&hit.source, &link, self.catalog) {
            return Err(Skip::new(
                SkipReason::Source,
                format!("{} ({}) is not an approved source", hit.source, link),
            ));
        }

        let content = self
            .extractor
            .extract(&link, &self.config.extractor)
            .await
            .map_err(|e| Skip::new(SkipReason::Extraction, format!("{}: {}", link, e)))?;

        if let Some(image) = &content.top_image {
            logger.info(&format!("🖼️ Top image for {}: {}", link, image));
        }

        let summary = content.summary;
        let length = summary.chars().count();
        if length < self.config.min_summary_chars {
            let e = Error::ContentTooShort {
                length,
                minimum: self.config.min_summary_chars,
            };
            return Err(Skip::new(SkipReason::ContentTooShort, e));
        }

        let (sentiment, polarity) = self
            .classifier
            .score_and_classify(&summary, &self.config.scorer);

        let published_date = match hit.pub_date_text.as_deref().and_then(|t| self.dates.parse(t)) {
            Some(date) => date,
            None => {
                let e = Error::DateParse(hit.pub_date_text.clone().unwrap_or_default());
                logger.debug(&format!("📅 {}, using today", e));
                scraped_at.date()
            }
        };

        Ok(ArticleRecord {
            topic_id: term.topic_id.clone(),
            search_term: term.search_term.clone(),
            title: hit.title.trim().to_string(),
            summary,
            keywords: content.keywords,
            published_date,
            link,
            source: hit.source.trim().to_lowercase(),
            sentiment,
            polarity,
            scraped_at,
        })
    }
}
