use anyhow::Result;
use clap::Parser;
use ff_replay::{load_config, load_scenario, run_scenario};
use std::path::PathBuf;
use tracing::info;

/// Replay recorded damage callbacks through the friendly-fire moderation core
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON Lines scenario file
    scenario: PathBuf,

    /// Plugin config (.json or .toml); defaults are used when omitted
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Skip the friendly-fire cvars normally applied at load
    #[arg(long, default_value_t = false)]
    no_cvars: bool,

    /// Print the full report as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let steps = load_scenario(&args.scenario)?;
    info!(steps = steps.len(), scenario = %args.scenario.display(), "Replaying scenario");

    let report = run_scenario(config, &steps, !args.no_cvars)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} steps, {} hits counted, {} rejected, {} punishments",
        report.steps,
        report.hits_counted,
        report.hits_rejected,
        report.punishments.len()
    );
    for record in &report.punishments {
        println!(
            "  [{}] {} ({}) at {:.1} HP -> {}",
            record.step,
            record.attacker_name,
            record.attacker,
            record.total_damage,
            record.command.as_deref().unwrap_or("<no command>")
        );
    }
    for standing in &report.standings {
        println!(
            "  {} level={} total={:.1}",
            standing.steam_id, standing.level, standing.total_damage
        );
    }
    Ok(())
}
