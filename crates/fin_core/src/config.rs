use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::seq::SliceRandom;

pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.3.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/83.0.4103.97 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:77.0) Gecko/20100101 Firefox/77.0",
];

pub const CURRENT_FILE_NAME: &str = "news_results.csv";
pub const ARCHIVE_PREFIX: &str = "news_archive_";
pub const ARCHIVE_SUFFIX: &str = ".csv";

/// Which figure the sentiment scorer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Compound,
    Positive,
    Negative,
    Neutral,
}

/// Options handed to the sentiment scorer on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorerOptions {
    pub use_sentibignomics: bool,
    pub use_henry: bool,
    pub indicator: Indicator,
}

impl Default for ScorerOptions {
    fn default() -> Self {
        Self {
            use_sentibignomics: true,
            use_henry: true,
            indicator: Indicator::Compound,
        }
    }
}

/// Options handed to the content extractor on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub fetch_images: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: USER_AGENTS[0].to_string(),
            fetch_images: false,
        }
    }
}

/// Run-wide settings, built once before the first term is searched.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub sources_path: PathBuf,
    pub terms_path: PathBuf,
    pub lookback_days: u32,
    pub retention_days: i64,
    pub min_summary_chars: usize,
    pub search_timeout: Duration,
    pub decode_interval: Duration,
    pub decode_timeout: Duration,
    pub user_agents: Vec<String>,
    pub extractor: ExtractorConfig,
    pub scorer: ScorerOptions,
}

impl PipelineConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let user_agents: Vec<String> = USER_AGENTS.iter().map(|ua| ua.to_string()).collect();
        let user_agent = user_agents
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default();

        Self {
            output_dir: output_dir.into(),
            sources_path: PathBuf::from("source_list.csv"),
            terms_path: PathBuf::from("search_terms.csv"),
            lookback_days: 7,
            retention_days: 90,
            min_summary_chars: 100,
            search_timeout: Duration::from_secs(10),
            decode_interval: Duration::from_secs(3),
            decode_timeout: Duration::from_secs(10),
            user_agents,
            extractor: ExtractorConfig {
                user_agent,
                ..ExtractorConfig::default()
            },
            scorer: ScorerOptions::default(),
        }
    }

    pub fn with_sources_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources_path = path.into();
        self
    }

    pub fn with_terms_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.terms_path = path.into();
        self
    }

    pub fn with_decode_interval(mut self, interval: Duration) -> Self {
        self.decode_interval = interval;
        self
    }

    pub fn with_fetch_images(mut self, fetch_images: bool) -> Self {
        self.extractor.fetch_images = fetch_images;
        self
    }

    pub fn current_path(&self) -> PathBuf {
        self.output_dir.join(CURRENT_FILE_NAME)
    }

    pub fn archive_path(&self, number: u32) -> PathBuf {
        archive_path(&self.output_dir, number)
    }

    /// Picks a user agent for a single outbound request.
    pub fn random_user_agent(&self) -> &str {
        pick_user_agent(&self.user_agents)
    }
}

/// Random member of `pool`, or the first built-in agent when it is empty.
pub fn pick_user_agent(pool: &[String]) -> &str {
    pool.choose(&mut rand::thread_rng())
        .map(String::as_str)
        .unwrap_or(USER_AGENTS[0])
}

pub fn archive_path(dir: &Path, number: u32) -> PathBuf {
    dir.join(format!("{ARCHIVE_PREFIX}{number}{ARCHIVE_SUFFIX}"))
}

/// Numeric suffix of an archive file name, `None` for anything else.
pub fn archive_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix(ARCHIVE_PREFIX)?
        .strip_suffix(ARCHIVE_SUFFIX)?
        .parse()
        .ok()
}
