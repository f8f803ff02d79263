use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use fin_core::{ArticleRecord, DatasetStore, Error, Result};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    current: Vec<ArticleRecord>,
    archives: BTreeMap<u32, Vec<ArticleRecord>>,
}

/// Dataset that lives only for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_current(records: Vec<ArticleRecord>) -> Self {
        let state = MemoryState {
            current: records,
            archives: BTreeMap::new(),
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub async fn insert_archive(&self, number: u32, records: Vec<ArticleRecord>) {
        self.state.write().await.archives.insert(number, records);
    }

    pub async fn current(&self) -> Vec<ArticleRecord> {
        self.state.read().await.current.clone()
    }

    pub async fn archive(&self, number: u32) -> Option<Vec<ArticleRecord>> {
        self.state.read().await.archives.get(&number).cloned()
    }
}

#[async_trait]
impl DatasetStore for MemoryStore {
    async fn load_current(&self) -> Result<Vec<ArticleRecord>> {
        Ok(self.current().await)
    }

    async fn save_current(&self, records: &[ArticleRecord]) -> Result<()> {
        self.state.write().await.current = records.to_vec();
        Ok(())
    }

    async fn archive_numbers(&self) -> Result<Vec<u32>> {
        Ok(self.state.read().await.archives.keys().copied().collect())
    }

    async fn write_archive(&self, number: u32, records: &[ArticleRecord]) -> Result<String> {
        let mut state = self.state.write().await;
        if state.archives.contains_key(&number) {
            return Err(Error::ArchiveWrite(format!("archive {} already exists", number)));
        }
        state.archives.insert(number, records.to_vec());
        Ok(format!("memory://news_archive_{}", number))
    }
}
