use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fin_core::config::{archive_number, archive_path, CURRENT_FILE_NAME};
use fin_core::{ArticleRecord, DatasetStore, Error, Result};
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub const COLUMNS: [&str; 11] = [
    "topic_id",
    "search_term",
    "title",
    "summary",
    "keywords",
    "published_date",
    "link",
    "source",
    "sentiment",
    "polarity",
    "scraped_at",
];

pub fn encode_records(records: &[ArticleRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if records.is_empty() {
        writer.write_record(COLUMNS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::Storage(format!("Failed to flush CSV buffer: {}", e)))
}

pub fn decode_records(bytes: &[u8]) -> Result<Vec<ArticleRecord>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Dataset kept as CSV files in one output directory: the current window in
/// `news_results.csv` and partitions in `news_archive_<n>.csv`.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn current_path(&self) -> PathBuf {
        self.dir.join(CURRENT_FILE_NAME)
    }
}

#[async_trait]
impl DatasetStore for CsvStore {
    async fn load_current(&self) -> Result<Vec<ArticleRecord>> {
        let path = self.current_path();
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let records = decode_records(&bytes)?;
                debug!("Loaded {} records from {}", records.len(), path.display());
                Ok(records)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save_current(&self, records: &[ArticleRecord]) -> Result<()> {
        let path = self.current_path();
        let staging = path.with_extension("csv.tmp");
        tokio::fs::write(&staging, encode_records(records)?).await?;
        tokio::fs::rename(&staging, &path).await?;
        Ok(())
    }

    async fn archive_numbers(&self) -> Result<Vec<u32>> {
        let mut numbers = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if let Some(number) = entry.file_name().to_str().and_then(archive_number) {
                numbers.push(number);
            }
        }
        Ok(numbers)
    }

    async fn write_archive(&self, number: u32, records: &[ArticleRecord]) -> Result<String> {
        let path = archive_path(&self.dir, number);
        let location = path.display().to_string();
        let bytes = encode_records(records)?;

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| Error::ArchiveWrite(format!("{}: {}", location, e)))?;
        file.write_all(&bytes)
            .await
            .map_err(|e| Error::ArchiveWrite(format!("{}: {}", location, e)))?;
        file.flush()
            .await
            .map_err(|e| Error::ArchiveWrite(format!("{}: {}", location, e)))?;

        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fin_core::Sentiment;
    use tempfile::tempdir;

    fn record(link: &str, day: u32) -> ArticleRecord {
        ArticleRecord {
            topic_id: "3".to_string(),
            search_term: "bank earnings".to_string(),
            title: format!("Bank results {day}"),
            summary: "Large banks reported higher net interest income, \"beating\" forecasts.".to_string(),
            keywords: vec!["banks".to_string(), "earnings".to_string()],
            published_date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            link: link.to_string(),
            source: "reuters".to_string(),
            sentiment: Sentiment::Positive,
            polarity: 0.6249,
            scraped_at: NaiveDate::from_ymd_opt(2024, 4, 20)
                .unwrap()
                .and_hms_opt(9, 15, 2)
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn test_missing_current_is_empty() {
        let temp_dir = tempdir().unwrap();
        let store = CsvStore::new(temp_dir.path().join("output")).await.unwrap();
        assert!(store.load_current().await.unwrap().is_empty());
        assert!(store.archive_numbers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_reload_current() {
        let temp_dir = tempdir().unwrap();
        let store = CsvStore::new(temp_dir.path()).await.unwrap();
        let records = vec![record("https://reuters.com/a", 1), record("https://reuters.com/b", 2)];

        store.save_current(&records).await.unwrap();
        let first = std::fs::read(store.current_path()).unwrap();
        let loaded = store.load_current().await.unwrap();
        assert_eq!(loaded, records);

        // A second save of the loaded rows must not change a single byte.
        store.save_current(&loaded).await.unwrap();
        assert_eq!(std::fs::read(store.current_path()).unwrap(), first);
        assert!(!temp_dir.path().join("news_results.csv.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_window() {
        let temp_dir = tempdir().unwrap();
        let store = CsvStore::new(temp_dir.path()).await.unwrap();
        store
            .save_current(&[record("https://reuters.com/a", 1), record("https://reuters.com/b", 2)])
            .await
            .unwrap();
        store.save_current(&[record("https://reuters.com/c", 3)]).await.unwrap();

        let loaded = store.load_current().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].link, "https://reuters.com/c");
    }

    #[tokio::test]
    async fn test_empty_window_keeps_header() {
        let temp_dir = tempdir().unwrap();
        let store = CsvStore::new(temp_dir.path()).await.unwrap();
        store.save_current(&[]).await.unwrap();
        let text = std::fs::read_to_string(store.current_path()).unwrap();
        assert!(text.starts_with("topic_id,search_term,title"));
        assert!(store.load_current().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_archives_are_never_overwritten() {
        let temp_dir = tempdir().unwrap();
        let store = CsvStore::new(temp_dir.path()).await.unwrap();
        let location = store
            .write_archive(1, &[record("https://reuters.com/old", 1)])
            .await
            .unwrap();
        assert!(location.ends_with("news_archive_1.csv"));

        let err = store
            .write_archive(1, &[record("https://reuters.com/other", 2)])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ArchiveWrite(_)));

        let kept = decode_records(&std::fs::read(temp_dir.path().join("news_archive_1.csv")).unwrap()).unwrap();
        assert_eq!(kept[0].link, "https://reuters.com/old");
    }

    #[tokio::test]
    async fn test_archive_numbers_ignore_other_files() {
        let temp_dir = tempdir().unwrap();
        for name in ["news_archive_1.csv", "news_archive_2.csv", "news_archive_4.csv", "news_archive_old.csv", "notes.txt"] {
            std::fs::write(temp_dir.path().join(name), "").unwrap();
        }
        let store = CsvStore::new(temp_dir.path()).await.unwrap();
        let mut numbers = store.archive_numbers().await.unwrap();
        numbers.sort_unstable();
        assert_eq!(numbers, vec![1, 2, 4]);
    }
}
