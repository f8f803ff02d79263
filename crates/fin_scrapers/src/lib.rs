pub mod cli;
pub mod collector;
pub mod dates;
pub mod logging;
pub mod manager;
pub mod resolver;
pub mod scrapers;

#[cfg(test)]
mod testing;

pub use cli::{handle_command, PipelineArgs, PipelineCommands};
pub use collector::{ArticleCollector, SkipCounts, SkipReason, TermReport};
pub use dates::{BestEffortDateParser, DateParser};
pub use logging::{init_logging, Logger};
pub use manager::{PipelineRunner, RunReport};
pub use resolver::{is_valid_source, UrlResolver};
pub use scrapers::{ContentExtractor, NewsSearch, RedirectDecoder};

pub mod prelude {
    pub use super::manager::{PipelineRunner, RunReport};
    pub use super::scrapers::{ContentExtractor, NewsSearch, RedirectDecoder};
    pub use fin_core::{ArticleRecord, Error, PipelineConfig, Result};
}
