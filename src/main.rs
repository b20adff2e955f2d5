use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use compat_score::catalog::FeatureCatalog;
use compat_score::config::{Config, config_path, log_path};
use compat_score::support::{SupportAggregator, calculate_all_scores};

#[derive(Parser)]
#[command(name = "compat-score")]
#[command(version, about = "Mobile browser compatibility scores")]
struct Cli {
    /// Config file (defaults to the data directory's config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve every catalog feature and print per-browser scores
    Score {
        #[arg(long)]
        catalog: PathBuf,
        /// Print scores as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a single feature and print its support as JSON
    Support {
        #[arg(long)]
        id: String,
        #[arg(long)]
        tabular_id: Option<String>,
        #[arg(long)]
        path: Option<String>,
    },
    /// Validate a catalog file
    Validate {
        #[arg(long)]
        catalog: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = compat_score::logging::init(&log_path(), cli.log_json)
        .context("failed to initialize logging")?;

    let config_file = cli.config.unwrap_or_else(config_path);
    let config = Config::load(&config_file)?;

    match cli.command {
        Command::Validate { catalog } => {
            let catalog = FeatureCatalog::load(&catalog)?;
            println!("{} features OK", catalog.len());
            Ok(())
        }
        Command::Score { catalog, json } => {
            let catalog = FeatureCatalog::load(&catalog)?;
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(score(&config, &catalog, json))
        }
        Command::Support {
            id,
            tabular_id,
            path,
        } => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(async {
                let aggregator = SupportAggregator::from_config(&config)?;
                let support = aggregator
                    .resolve(&id, tabular_id.as_deref(), path.as_deref())
                    .await;
                println!("{}", serde_json::to_string_pretty(&support)?);
                Ok::<(), anyhow::Error>(())
            }),
    }
}

async fn score(config: &Config, catalog: &FeatureCatalog, json: bool) -> anyhow::Result<()> {
    let aggregator = SupportAggregator::from_config(config)?;
    aggregator.load_multiple_support(catalog.features()).await;
    info!("Resolved {} support records", aggregator.cached_len());

    let scores = calculate_all_scores(catalog, |feature| aggregator.get_support(feature));

    if json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(());
    }

    let versions = aggregator.browser_versions().await;
    println!(
        "{:<8} {:>8} {:>9} {:>8} {:>10} {:>14}",
        "browser", "version", "weighted", "unweighted", "full", "full-unweighted"
    );
    for (browser, score) in &scores {
        println!(
            "{:<8} {:>8} {:>8}% {:>9}% {:>9}% {:>14}%",
            browser.as_str(),
            versions.get(*browser),
            score.weighted,
            score.unweighted,
            score.weighted_full,
            score.unweighted_full
        );
    }

    Ok(())
}
