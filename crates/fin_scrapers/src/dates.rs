use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Turns a free-form publication date into a calendar date.
pub trait DateParser: Send + Sync {
    fn parse(&self, text: &str) -> Option<NaiveDate>;
}

/// Tries the formats news feeds commonly use, most specific first.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestEffortDateParser;

impl BestEffortDateParser {
    const DATETIME_FORMATS: &'static [&'static str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    const DATE_FORMATS: &'static [&'static str] =
        &["%Y-%m-%d", "%d %b %Y", "%b %d, %Y", "%B %d, %Y", "%m/%d/%Y"];
}

impl DateParser for BestEffortDateParser {
    fn parse(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.date_naive());
        }
        for format in Self::DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                return Some(dt.date());
            }
        }
        Self::DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    }
}
