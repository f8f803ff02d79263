use clap::{Args, Subcommand};
use fin_core::{Error, Result};
use tracing::error;

use crate::manager::{PipelineRunner, RunReport};

#[derive(Args, Debug)]
pub struct PipelineArgs {
    #[command(subcommand)]
    pub command: PipelineCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PipelineCommands {
    /// Search every term, ingest new articles and apply retention
    Run,
    /// List the approved sources
    Sources,
    /// Resolve a single Google News link to its article URL
    Decode {
        /// The encoded news.google.com link
        url: String,
    },
}

pub fn print_report(report: &RunReport) {
    println!("Terms searched:     {}", report.terms);
    println!("Search results:     {}", report.hits);
    println!("New articles:       {}", report.collected);
    println!("Skipped:            {} ({})", report.skipped.total(), report.skipped);
    println!("Archived:           {}", report.retention.archived);
    if let Some(number) = report.retention.archive_number {
        println!("Archive partition:  {}", number);
    }
    if let Some(e) = &report.retention.archive_error {
        println!("Archive failed:     {}", e);
    }
    println!("Current window:     {}", report.retention.current);
}

/// Missing inputs are reported and end the command without an error.
pub async fn handle_command(command: PipelineCommands, runner: &PipelineRunner) -> Result<()> {
    let outcome = match command {
        PipelineCommands::Run => runner.run().await.map(|report| print_report(&report)),
        PipelineCommands::Sources => runner.load_catalog().await.map(|catalog| {
            println!("Approved sources ({}):", catalog.len());
            for name in catalog.names() {
                println!("  {}", name);
            }
        }),
        PipelineCommands::Decode { url } => runner.decode(&url).await.map(|decoded| println!("{}", decoded)),
    };

    match outcome {
        Err(Error::ConfigMissing(msg)) => {
            error!("❌ Missing configuration: {}", msg);
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use fin_core::PipelineConfig;
    use fin_storage::MemoryStore;
    use std::sync::Arc;

    fn runner(config: PipelineConfig) -> PipelineRunner {
        PipelineRunner::new(
            config,
            Arc::new(FakeSearch::default()),
            Arc::new(FakeDecoder::default().with_link("g1", "https://reuters.com/a")),
            Arc::new(FakeExtractor::default()),
            Arc::new(FixedScorer(0.0)),
            Arc::new(MemoryStore::new()),
        )
    }

    #[tokio::test]
    async fn test_missing_config_is_not_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new(temp_dir.path())
            .with_sources_path(temp_dir.path().join("nope.csv"))
            .with_terms_path(temp_dir.path().join("nope_terms.csv"));
        let runner = runner(config);

        assert!(handle_command(PipelineCommands::Run, &runner).await.is_ok());
        assert!(handle_command(PipelineCommands::Sources, &runner).await.is_ok());
    }

    #[tokio::test]
    async fn test_decode_command() {
        let runner = runner(PipelineConfig::new("unused"));
        let ok = PipelineCommands::Decode { url: "g1".to_string() };
        assert!(handle_command(ok, &runner).await.is_ok());

        let bad = PipelineCommands::Decode { url: "g2".to_string() };
        assert!(matches!(handle_command(bad, &runner).await, Err(Error::Decode(_))));
    }
}
