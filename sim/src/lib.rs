use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use glider::{
    simulate_dbg, ControlInput, ControlPolicy, GliderSpec, Hold, Scenario, Schedule,
    ScheduleStep, ScriptedPilot, SimConfig, Trajectory,
};
use replay::{Replay, RunInfo, DEFAULT_FRAME_INTERVAL_S};
use serde::{Deserialize, Serialize};
use tracing::info;

pub mod sweep;
pub use sweep::{run_drag_sweep, SweepPoint};

#[derive(Parser, Debug, Clone)]
#[command(name = "vtail-sim")]
#[command(about = "Headless runner for the V-tail glider model", long_about = None)]
pub struct Args {
    /// Scenario file (TOML)
    #[arg(long, default_value = "config/drop.toml")]
    pub config: PathBuf,
    /// Write the replay here, overriding `[output] replay`
    #[arg(long)]
    pub replay: Option<PathBuf>,
    /// Override `[run] seed`
    #[arg(long)]
    pub seed: Option<u64>,
    /// Run the `[sweep]` drag values instead of a single drop
    #[arg(long, default_value_t = false)]
    pub sweep: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub run: SimConfig,
    pub glider: GliderSpec,
    pub scenario: Scenario,
    pub pilot: PilotConfig,
    pub output: OutputConfig,
    pub sweep: Option<SweepConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PilotConfig {
    Hold {
        #[serde(default)]
        left: f32,
        #[serde(default)]
        right: f32,
    },
    Schedule {
        steps: Vec<ScheduleStep>,
    },
    Scripted {
        #[serde(default)]
        pitch_bias: f32,
        #[serde(default)]
        yaw_bias: f32,
        flare_altitude_m: Option<f32>,
    },
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self::Hold {
            left: 0.0,
            right: 0.0,
        }
    }
}

impl PilotConfig {
    /// Fresh policy instance; stateful pilots must not be shared between runs.
    pub fn build(&self) -> Box<dyn ControlPolicy + Send> {
        match self {
            Self::Hold { left, right } => Box::new(Hold(ControlInput::new(*left, *right))),
            Self::Schedule { steps } => Box::new(Schedule::new(steps.clone())),
            Self::Scripted {
                pitch_bias,
                yaw_bias,
                flare_altitude_m,
            } => {
                let mut pilot = ScriptedPilot::new(*pitch_bias, *yaw_bias);
                if let Some(alt) = flare_altitude_m {
                    pilot.flare_altitude_m = *alt;
                }
                Box::new(pilot)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub replay: Option<PathBuf>,
    pub frame_interval_s: f32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            replay: None,
            frame_interval_s: DEFAULT_FRAME_INTERVAL_S,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub drag_k: Vec<f32>,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("loading config {}", path.display()))
}

/// Parse and validate a TOML scenario file. Missing sections take defaults.
pub fn parse_config(text: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(text).context("parsing TOML")?;
    cfg.glider.validate().context("invalid [glider]")?;
    cfg.scenario.validate().context("invalid [scenario]")?;
    cfg.run.validate().context("invalid [run]")?;
    Ok(cfg)
}

pub struct RunReport {
    pub trajectory: Trajectory,
    pub replay: Replay,
}

/// Fly the configured scenario once and package the result as a replay.
pub fn run(cfg: &Config) -> Result<RunReport> {
    let mut policy = cfg.pilot.build();
    let (trajectory, telemetry) =
        simulate_dbg(&cfg.glider, &cfg.scenario, &cfg.run, &mut *policy)
            .context("simulation did not complete")?;

    let summary = trajectory.summary();
    info!(
        policy = policy.name(),
        flight_time_s = summary.flight_time_s,
        track_length_m = summary.track_length_m,
        impact_speed_mps = summary.impact_speed_mps,
        impact_miss_m = ?summary.impact_miss_m,
        min_miss_m = ?summary.min_miss_m,
        "Run finished"
    );

    let info = RunInfo {
        spec: &cfg.glider,
        scenario: &cfg.scenario,
        config: &cfg.run,
        policy: policy.name(),
    };
    let replay = Replay::from_run(info, &trajectory, &telemetry, cfg.output.frame_interval_s)
        .context("building replay")?;
    Ok(RunReport { trajectory, replay })
}

pub fn write_replay(replay: &Replay, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating replay directory {}", dir.display()))?;
    }
    replay
        .save(path)
        .with_context(|| format!("writing replay {}", path.display()))?;
    info!(
        path = %path.display(),
        run_id = %replay.header.run_id,
        frames = replay.frames.len(),
        "Replay written"
    );
    Ok(())
}
