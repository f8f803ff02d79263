//! Loaders for the two configuration tables read at the start of a run.

use std::io::ErrorKind;
use std::path::Path;

use fin_core::{Error, Result, SearchTerm, SourceCatalog};
use tracing::error;

async fn read_table(path: &Path) -> Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            error!("❌ {} not found!", path.display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Approved sources from the `source_name` column. A missing file yields an
/// empty catalog; the caller decides whether that is fatal.
pub async fn load_sources(path: &Path) -> Result<SourceCatalog> {
    let Some(bytes) = read_table(path).await? else {
        return Ok(SourceCatalog::default());
    };

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == "source_name")
        .ok_or_else(|| {
            Error::ConfigMissing(format!("{} has no source_name column", path.display()))
        })?;

    let mut names = Vec::new();
    for row in reader.records() {
        let row = row?;
        if let Some(name) = row.get(column) {
            names.push(name.to_string());
        }
    }
    Ok(SourceCatalog::new(names))
}

/// Search terms in file order. Rows with a blank term are dropped.
pub async fn load_search_terms(path: &Path) -> Result<Vec<SearchTerm>> {
    let Some(bytes) = read_table(path).await? else {
        return Ok(Vec::new());
    };

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let mut terms = Vec::new();
    for row in reader.deserialize::<SearchTerm>() {
        let term = row?;
        if term.search_term.trim().is_empty() {
            continue;
        }
        terms.push(SearchTerm {
            topic_id: term.topic_id.trim().to_string(),
            search_term: term.search_term.trim().to_string(),
        });
    }
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_sources() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("source_list.csv");
        std::fs::write(
            &path,
            "source_name,source_domain\nReuters ,reuters.com\n bloomberg,bloomberg.com\n,blank.com\n",
        )
        .unwrap();

        let catalog = load_sources(&path).await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("reuters"));
        assert!(catalog.contains("Bloomberg"));
    }

    #[tokio::test]
    async fn test_missing_sources_is_empty() {
        let temp_dir = tempdir().unwrap();
        let catalog = load_sources(&temp_dir.path().join("nope.csv")).await.unwrap();
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_sources_without_column() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("source_list.csv");
        std::fs::write(&path, "name\nreuters\n").unwrap();
        let err = load_sources(&path).await.unwrap_err();
        assert!(matches!(err, Error::ConfigMissing(_)));
    }

    #[tokio::test]
    async fn test_load_search_terms() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("search_terms.csv");
        std::fs::write(
            &path,
            "topic_id,search_term,notes\n1,federal reserve,rates\n2, ,skip me\n3, oil prices ,\n",
        )
        .unwrap();

        let terms = load_search_terms(&path).await.unwrap();
        assert_eq!(
            terms,
            vec![
                SearchTerm { topic_id: "1".into(), search_term: "federal reserve".into() },
                SearchTerm { topic_id: "3".into(), search_term: "oil prices".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_search_terms_is_empty() {
        let temp_dir = tempdir().unwrap();
        let terms = load_search_terms(&temp_dir.path().join("nope.csv")).await.unwrap();
        assert!(terms.is_empty());
    }
}
