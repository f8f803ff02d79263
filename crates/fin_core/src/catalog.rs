use std::collections::HashSet;

use crate::types::ArticleRecord;

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Approved news sources. Lookups ignore case and surrounding whitespace.
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    sources: HashSet<String>,
}

impl SourceCatalog {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sources = names
            .into_iter()
            .map(|n| normalize(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();
        Self { sources }
    }

    pub fn contains(&self, source_name: &str) -> bool {
        self.sources.contains(&normalize(source_name))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Links already present in the persisted current window.
///
/// Read-only during collection; duplicates found within a single run are
/// dropped later by the retention pass.
#[derive(Debug, Clone, Default)]
pub struct LinkDeduplicator {
    links: HashSet<String>,
}

impl LinkDeduplicator {
    pub fn from_records(records: &[ArticleRecord]) -> Self {
        Self {
            links: records.iter().map(ArticleRecord::normalized_link).collect(),
        }
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(&link.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
