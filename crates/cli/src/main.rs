//! radeck CLI - quality objective progress and asset preloading for the
//! regulatory affairs deck.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use radeck_core::{Objective, PreloadTarget};
use radeck_preload::{FsFetcher, HttpFetcher, ImagePreloader, ResourceFetcher};
use radeck_progress::{indicator_label, Aggregator, ProgressSnapshot, WeightedAggregator};
use radeck_storage::{ContentStorage, DeckManifest, JsonStorage};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "radeck")]
#[command(about = "Regulatory affairs deck tooling", long_about = None)]
struct Cli {
    /// Deck manifest
    #[arg(long, global = true, default_value = "deck.json")]
    content: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show progress of every quality objective
    Overview {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show indicators and tasks of one objective
    Objective {
        /// Objective number
        number: u32,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Preload the deck's critical assets
    Preload {
        /// Asset directory (overrides the manifest's asset_root)
        #[arg(long, conflicts_with = "base_url")]
        root: Option<PathBuf>,
        /// Base URL (overrides the manifest's base_url)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Check the manifest for suspicious content
    Validate,
    /// Write the sample manifest
    Init {
        /// Overwrite an existing manifest
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let storage = JsonStorage::new(&cli.content);

    match cli.command {
        Commands::Overview { json } => {
            let objectives = load_objectives(&storage).await?;
            let snapshot = ProgressSnapshot::capture(&WeightedAggregator, &objectives);

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                return Ok(());
            }

            println!("Quality Objectives ({})", snapshot.objectives.len());
            for obj in &snapshot.objectives {
                let m = &obj.metrics;
                println!(
                    "  Objective {} | {:>3}% | {} tasks, {} completed, {} ongoing",
                    obj.number, m.overall_progress, m.total_tasks, m.completed_tasks, m.ongoing_tasks,
                );
                for (label, pct) in obj.indicator_labels.iter().zip(&m.indicator_progress) {
                    println!("      {} {}%", label, pct);
                }
            }
        }
        Commands::Objective { number, json } => {
            let Some(objective) = storage
                .load_objective(number)
                .await
                .with_context(|| format!("Failed to load {}", storage.path().display()))?
            else {
                println!("Objective {} not found", number);
                return Ok(());
            };

            if json {
                let metrics = WeightedAggregator.objective_metrics(Some(&objective));
                let out = serde_json::json!({ "objective": objective, "metrics": metrics });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            print_objective(&objective);
        }
        Commands::Preload { root, base_url } => {
            let manifest = load_manifest(&storage).await?;
            let fetcher = select_fetcher(&cli.content, &manifest, root, base_url)?;
            run_preload(fetcher, manifest.critical_images).await;
        }
        Commands::Validate => {
            let manifest = load_manifest(&storage).await?;
            let warnings = manifest.validate();
            if warnings.is_empty() {
                println!("{}: OK", storage.path().display());
            }
            for warning in &warnings {
                warn!("{}", warning);
                println!("  {}", warning);
            }
        }
        Commands::Init { force } => {
            if storage.path().exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    storage.path().display()
                );
            }
            storage.save_manifest(&DeckManifest::sample()?).await?;
            println!("Wrote {}", storage.path().display());
        }
    }

    Ok(())
}

async fn load_manifest(storage: &JsonStorage) -> Result<DeckManifest> {
    storage
        .load_manifest()
        .await
        .with_context(|| format!("Failed to load {}", storage.path().display()))
}

async fn load_objectives(storage: &JsonStorage) -> Result<Vec<Objective>> {
    storage
        .load_objectives()
        .await
        .with_context(|| format!("Failed to load {}", storage.path().display()))
}

fn print_objective(objective: &Objective) {
    let aggregator = WeightedAggregator;
    let metrics = aggregator.objective_metrics(Some(objective));

    println!("Objective {}: {}", objective.number, objective.title);
    println!(
        "  Overall: {}% ({} of {} tasks completed, {} pending)",
        metrics.overall_progress, metrics.completed_tasks, metrics.total_tasks, metrics.pending_tasks,
    );

    for (idx, indicator) in objective.indicators.iter().enumerate() {
        println!();
        println!(
            "  {} {} - {}%",
            indicator_label(idx, indicator),
            indicator.name,
            aggregator.indicator_progress(indicator),
        );
        println!("    {:<4} {:<48} {:>9} {:<10} {:>9}", "Task", "", "Allocated", "Status", "Completed");
        for task in &indicator.tasks {
            println!(
                "    {:<4} {:<48} {:>8}% {:<10} {:>8}%",
                task.id, task.name, task.allocated_percent, task.status, task.completed_percent,
            );
        }
    }
}

fn select_fetcher(
    content: &Path,
    manifest: &DeckManifest,
    root: Option<PathBuf>,
    base_url: Option<String>,
) -> Result<Arc<dyn ResourceFetcher>> {
    if root.is_none() {
        if let Some(url) = base_url.or_else(|| manifest.base_url.clone()) {
            let fetcher = HttpFetcher::new(&url).context("Invalid base URL")?;
            info!("Preloading from {}", url);
            return Ok(Arc::new(fetcher));
        }
    }

    // Relative asset roots from the manifest are relative to the manifest itself.
    let dir = match (root, &manifest.asset_root) {
        (Some(root), _) => root,
        (None, Some(asset_root)) => content
            .parent()
            .map(|p| p.join(asset_root))
            .unwrap_or_else(|| asset_root.clone()),
        (None, None) => PathBuf::from("."),
    };
    info!("Preloading from {}", dir.display());
    Ok(Arc::new(FsFetcher::new(dir)))
}

async fn run_preload(fetcher: Arc<dyn ResourceFetcher>, targets: Vec<PreloadTarget>) {
    let preloader = ImagePreloader::from_arc(fetcher);
    let handle = preloader.preload(targets);
    let mut rx = handle.subscribe();

    let mut last = None;
    loop {
        let state = *rx.borrow_and_update();
        if last != Some(state.progress_percent()) {
            println!("Loading... {}%", state.progress_percent());
            last = Some(state.progress_percent());
        }
        if state.is_loaded() || rx.changed().await.is_err() {
            break;
        }
    }

    let report = handle.wait().await;
    println!(
        "Loaded {} of {} assets in {:.2?} ({} failed)",
        report.state.loaded_count,
        report.state.total,
        report.elapsed,
        report.state.failed_count,
    );
    for failure in &report.failures {
        println!("  FAILED {}: {}", failure.target, failure.error);
    }
}
