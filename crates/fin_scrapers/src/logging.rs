use std::collections::VecDeque;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Prefixes every line with the tags it was built with, e.g. the topic and
/// search term a collector is working on.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: VecDeque<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            prefixes: VecDeque::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push_back(prefix.into());
        self
    }

    pub fn prefix(&self) -> String {
        self.prefixes.iter().map(|p| format!("{} ", p)).collect()
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}{}", self.prefix(), message);
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}{}", self.prefix(), message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}{}", self.prefix(), message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}{}", self.prefix(), message);
    }
}

/// Installs the fmt subscriber once. `RUST_LOG` overrides the `info` default.
pub fn init_logging() -> Logger {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt().with_env_filter(filter).init();
        });
    }
    Logger::new()
}
