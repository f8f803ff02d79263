use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing configuration: {0}")]
    ConfigMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Content too short: {length} characters (minimum {minimum})")]
    ContentTooShort { length: usize, minimum: usize },

    #[error("Unparsable date: {0}")]
    DateParse(String),

    #[error("Archive write error: {0}")]
    ArchiveWrite(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Errors that only cost the current article, never the run.
    pub fn is_per_article(&self) -> bool {
        matches!(
            self,
            Error::Network(_)
                | Error::InvalidUrl(_)
                | Error::Decode(_)
                | Error::Extraction(_)
                | Error::ContentTooShort { .. }
                | Error::DateParse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
