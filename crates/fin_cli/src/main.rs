use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use fin_core::PipelineConfig;
use fin_scrapers::{handle_command, init_logging, PipelineCommands, PipelineRunner};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_value = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if c.is_whitespace() {
                continue;
            } else {
                let num: u64 = current_number
                    .parse()
                    .map_err(|_| format!("Unit '{}' must follow a number", c))?;
                let scale = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    'd' => 86400,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds += num * scale;
                current_number.clear();
                has_value = true;
            }
        }

        // Trailing bare number counts as seconds
        if !current_number.is_empty() {
            total_seconds += current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            has_value = true;
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Finance news ingestion with rolling retention", long_about = None)]
struct Cli {
    /// Directory holding news_results.csv and the numbered archives
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
    /// CSV of approved sources (column: source_name)
    #[arg(long, default_value = "source_list.csv")]
    sources: PathBuf,
    /// CSV of search terms (columns: topic_id, search_term)
    #[arg(long, default_value = "search_terms.csv")]
    terms: PathBuf,
    /// Storage backend: csv (default) or memory for a dry run
    #[arg(long, default_value = "csv")]
    storage: String,
    #[arg(long, default_value = "lexicon", help = "Sentiment model to use. Available models: lexicon (default), finvader")]
    model: String,
    /// Report the lead image of each article
    #[arg(long)]
    fetch_images: bool,
    /// Pause between Google News decode requests (e.g. 3s)
    #[arg(long, default_value = "3s")]
    decode_interval: HumanDuration,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the pipeline once, or forever with --interval
    Run {
        /// Repeat the run with the given pause between cycles (e.g. 6h, 1h30m)
        #[arg(long)]
        interval: Option<HumanDuration>,
    },
    /// List the approved sources
    Sources,
    /// Resolve a single Google News link
    Decode { url: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = PipelineConfig::new(cli.output_dir)
        .with_sources_path(cli.sources)
        .with_terms_path(cli.terms)
        .with_decode_interval(cli.decode_interval.0)
        .with_fetch_images(cli.fetch_images);

    let store = fin_storage::create_store(&cli.storage, &config.output_dir).await?;
    let scorer = fin_inference::create_model(&cli.model)?;
    info!("🧠 Sentiment model initialized (using {})", scorer.name());

    let runner = PipelineRunner::with_defaults(config, scorer, store)?;

    match cli.command {
        Commands::Run { interval: Some(interval) } => {
            info!("⏰ Running in periodic mode every {}s", interval.0.as_secs());
            loop {
                info!("🚀 Starting pipeline cycle");
                if let Err(e) = handle_command(PipelineCommands::Run, &runner).await {
                    error!("❌ Pipeline cycle failed: {}", e);
                }
                info!("💤 Waiting {}s before next cycle", interval.0.as_secs());
                tokio::time::sleep(interval.0).await;
            }
        }
        Commands::Run { interval: None } => handle_command(PipelineCommands::Run, &runner).await?,
        Commands::Sources => handle_command(PipelineCommands::Sources, &runner).await?,
        Commands::Decode { url } => handle_command(PipelineCommands::Decode { url }, &runner).await?,
    }

    Ok(())
}
