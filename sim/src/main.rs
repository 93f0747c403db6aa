use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use sim::{load_config, run, run_drag_sweep, write_replay, Args};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut cfg = load_config(&args.config)?;
    if let Some(seed) = args.seed {
        cfg.run.seed = seed;
    }
    info!(?cfg, "Simulation config loaded");

    if args.sweep {
        let drags = cfg
            .sweep
            .as_ref()
            .map(|s| s.drag_k.clone())
            .filter(|d| !d.is_empty())
            .context("--sweep needs a non-empty [sweep] drag_k list")?;
        run_drag_sweep(&cfg, &drags)?;
        return Ok(());
    }

    let report = run(&cfg)?;
    if let Some(path) = args.replay.as_ref().or(cfg.output.replay.as_ref()) {
        write_replay(&report.replay, path)?;
    }
    Ok(())
}
