use async_trait::async_trait;
use crate::types::ArticleRecord;
use crate::Result;

#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Load the current window. An absent dataset is empty, not an error.
    async fn load_current(&self) -> Result<Vec<ArticleRecord>>;

    /// Replace the current window in full.
    async fn save_current(&self, records: &[ArticleRecord]) -> Result<()>;

    /// Numbers of the archive partitions that already exist, in any order.
    async fn archive_numbers(&self) -> Result<Vec<u32>>;

    /// Create archive partition `number`. Fails if it already exists.
    /// Returns a human readable location for logging.
    async fn write_archive(&self, number: u32, records: &[ArticleRecord]) -> Result<String>;
}
