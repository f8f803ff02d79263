use std::path::Path;
use std::sync::Arc;

use fin_core::{DatasetStore, Error, Result};
use tracing::info;

pub mod archiver;
pub mod backends;
pub mod inputs;

pub use archiver::{next_archive_number, RetentionArchiver, RetentionOutcome};
pub use backends::*;
pub use inputs::{load_search_terms, load_sources};

pub const AVAILABLE_BACKENDS: &[&str] = &["csv", "memory"];

/// Build the dataset store named on the command line. `memory` keeps nothing
/// once the process exits and is meant for dry runs.
pub async fn create_store(kind: &str, output_dir: &Path) -> Result<Arc<dyn DatasetStore>> {
    match kind.trim().to_lowercase().as_str() {
        "csv" => {
            let store = CsvStore::new(output_dir).await?;
            info!("🏦 Storage backend initialized (csv in {})", store.dir().display());
            Ok(Arc::new(store))
        }
        "memory" => {
            info!("🏦 Storage backend initialized (memory, nothing will be persisted)");
            Ok(Arc::new(MemoryStore::new()))
        }
        other => Err(Error::Storage(format!(
            "Unknown storage backend '{}'. Available backends: {}",
            other,
            AVAILABLE_BACKENDS.join(", ")
        ))),
    }
}

pub mod prelude {
    pub use super::archiver::{RetentionArchiver, RetentionOutcome};
    pub use super::backends::*;
    pub use super::create_store;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_create_store() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("output");

        let store = create_store("csv", &output).await.unwrap();
        assert!(output.is_dir());
        assert!(store.load_current().await.unwrap().is_empty());

        assert!(create_store("Memory", &output).await.is_ok());
        assert!(matches!(create_store("sqlite", &output).await, Err(Error::Storage(_))));
    }
}
