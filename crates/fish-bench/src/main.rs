use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use fish_bench::config::{ReplayConfig, ResolvedOutputs};
use fish_bench::logging::init_logging;
use fish_bench::replay::ReplayRunner;
use fish_core::AppInfo;

/// Scripted replay harness for the Fish advisor.
#[derive(Debug, Parser)]
#[command(
    name = "fish-bench",
    author,
    version,
    about = "Replays a scripted Fish match through the advisor"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/replay.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the seed used for dealing and tie-breaking.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no replay is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ReplayConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.params = config.params.with_env_overrides();

    config
        .validate()
        .with_context(|| format!("validating {}", cli.config.display()))?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let move_count = config.moves.len();

    println!(
        "{} {}: loaded configuration '{run_id}' with {move_count} scripted event{}",
        AppInfo::name(),
        AppInfo::version(),
        if move_count == 1 { "" } else { "s" }
    );

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = ReplayRunner::new(config, outputs)?;

    let hand = runner
        .hand()
        .iter()
        .map(|card| runner.catalog().card(*card).name.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    println!("Agent hand: {hand}");

    if cli.validate_only {
        println!("Validation-only mode: replay skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Replay complete for '{run_id}': {} events, {} advised calls, {} declarations ({} automatic) → {}",
        summary.events_processed,
        summary.advice_given,
        summary.observed_declarations + summary.automatic_declarations,
        summary.automatic_declarations,
        summary.jsonl_path.display()
    );
    if let Some(snapshot) = summary.snapshot_path.as_ref() {
        println!("Belief snapshot: {}", snapshot.display());
    }
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
