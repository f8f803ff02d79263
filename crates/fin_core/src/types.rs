use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Three-way sentiment bucket derived from a compound polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
        };
        f.write_str(label)
    }
}

/// One row of the search-terms table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTerm {
    pub topic_id: String,
    pub search_term: String,
}

/// A raw search result before its link has been decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub encoded_link: String,
    pub source: String,
    pub pub_date_text: Option<String>,
}

/// Body text and keywords pulled out of a downloaded article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    pub summary: String,
    pub keywords: Vec<String>,
    pub top_image: Option<String>,
}

/// An ingested article as persisted in the current window and archives.
///
/// Field order is the on-disk column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub topic_id: String,
    pub search_term: String,
    pub title: String,
    pub summary: String,
    #[serde(with = "keyword_cell")]
    pub keywords: Vec<String>,
    #[serde(with = "date_cell")]
    pub published_date: NaiveDate,
    pub link: String,
    pub source: String,
    pub sentiment: Sentiment,
    pub polarity: f64,
    #[serde(with = "timestamp_cell")]
    pub scraped_at: NaiveDateTime,
}

impl ArticleRecord {
    /// Lower-cased link, the key used for duplicate suppression.
    pub fn normalized_link(&self) -> String {
        self.link.to_lowercase()
    }
}

mod keyword_cell {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(keywords: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&keywords.join(", "))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let cell = String::deserialize(deserializer)?;
        Ok(cell
            .split(',')
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect())
    }
}

mod date_cell {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let cell = String::deserialize(deserializer)?;
        let cell = cell.trim();
        NaiveDate::parse_from_str(cell, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
            .or_else(|_| DateTime::parse_from_rfc3339(cell).map(|dt| dt.date_naive()))
            .map_err(|_| de::Error::custom(format!("invalid published_date: {cell}")))
    }
}

mod timestamp_cell {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let cell = String::deserialize(deserializer)?;
        let cell = cell.trim();
        NaiveDateTime::parse_from_str(cell, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S%.f"))
            .map_err(|_| de::Error::custom(format!("invalid scraped_at: {cell}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ArticleRecord {
        ArticleRecord {
            topic_id: "7".to_string(),
            search_term: "fed rates".to_string(),
            title: "Fed holds rates".to_string(),
            summary: "The Federal Reserve held rates steady.".to_string(),
            keywords: vec!["fed".to_string(), "rates".to_string()],
            published_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            link: "https://Example.com/Fed".to_string(),
            source: "reuters".to_string(),
            sentiment: Sentiment::Neutral,
            polarity: 0.0128,
            scraped_at: NaiveDate::from_ymd_opt(2024, 3, 2)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_csv_cells() {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(record()).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "topic_id,search_term,title,summary,keywords,published_date,link,source,sentiment,polarity,scraped_at"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("\"fed, rates\""));
        assert!(row.contains(",2024-03-01,"));
        assert!(row.contains(",neutral,0.0128,2024-03-02 08:30:00"));
    }

    #[test]
    fn test_reads_midnight_timestamps_as_dates() {
        let data = "topic_id,search_term,title,summary,keywords,published_date,link,source,sentiment,polarity,scraped_at\n\
                    1,gold,Gold up,Gold rallied,\"gold,, metals \",2024-01-05 00:00:00,https://a.com/x,kitco,positive,0.4,2024-01-06 10:00:00.123\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let parsed: ArticleRecord = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(parsed.published_date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(parsed.keywords, vec!["gold", "metals"]);
        assert_eq!(parsed.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_normalized_link() {
        assert_eq!(record().normalized_link(), "https://example.com/fed");
    }

    #[test]
    fn test_sentiment_display() {
        assert_eq!(Sentiment::Negative.to_string(), "negative");
        assert_eq!(Sentiment::Positive.to_string(), "positive");
    }
}
