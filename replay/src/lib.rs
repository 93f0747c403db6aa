//! Replay files for finished glider runs.
//!
//! A replay is everything a dashboard needs to play a run back without
//! re-simulating it: the airframe and scenario, frames decimated to a fixed
//! interval, and the touchdown record. On disk it is a 4-byte magic and a
//! little-endian format version followed by a bincode body.

use std::path::Path;

use glider::{
    glide_ratio_for, FlightSummary, GliderSpec, Scenario, SimConfig, StepDebug,
    Touchdown, Trajectory,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

pub const MAGIC: [u8; 4] = *b"VTRP";
pub const FORMAT_VERSION: u16 = 2;
pub const DEFAULT_FRAME_INTERVAL_S: f32 = 0.1;

const PREFIX_LEN: usize = MAGIC.len() + std::mem::size_of::<u16>();

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("not a replay file (magic {found:?})")]
    BadMagic { found: [u8; 4] },
    #[error("unsupported replay format version {found} (this build reads {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },
    #[error("replay is truncated ({len} bytes)")]
    Truncated { len: usize },
    #[error("telemetry covers {steps} steps but the trajectory has {samples} samples")]
    TelemetryMismatch { steps: usize, samples: usize },
    #[error("replay codec: {0}")]
    Codec(#[from] bincode::Error),
    #[error("replay io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayHeader {
    pub run_id: Uuid,
    pub dt_s: f32,
    pub seed: u64,
    pub frame_interval_s: f32,
    pub policy: String,
    pub spec: GliderSpec,
    pub scenario: Scenario,
}

/// One decimated sample. Surface fields describe the step that led into it;
/// the release frame reports neutral surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub t_s: f64,
    pub x_m: f64,
    pub y_m: f64,
    pub alt_m: f64,
    pub v_air_mps: f64,
    /// Wrapped to `[0, 360)`.
    pub heading_deg: f64,
    pub bank_deg: f64,
    pub pitch: f64,
    pub left_rv: f64,
    pub right_rv: f64,
    pub pitch_eff: f64,
    pub yaw_eff: f64,
    pub glide_ratio: f64,
    pub stall: bool,
    pub miss_m: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub header: ReplayHeader,
    pub frames: Vec<ReplayFrame>,
    pub touchdown: Touchdown,
    pub summary: FlightSummary,
}

/// Inputs that describe how a run was produced.
#[derive(Debug, Clone, Copy)]
pub struct RunInfo<'a> {
    pub spec: &'a GliderSpec,
    pub scenario: &'a Scenario,
    pub config: &'a SimConfig,
    pub policy: &'a str,
}

impl Replay {
    /// Build a replay from a run and its per-step telemetry, as returned by
    /// `glider::simulate_dbg`.
    pub fn from_run(
        info: RunInfo<'_>,
        trajectory: &Trajectory,
        telemetry: &[StepDebug],
        frame_interval_s: f32,
    ) -> Result<Self, ReplayError> {
        if telemetry.len() + 1 != trajectory.len() {
            return Err(ReplayError::TelemetryMismatch {
                steps: telemetry.len(),
                samples: trajectory.len(),
            });
        }

        let samples = trajectory.samples();
        let target = trajectory.target();
        let frames: Vec<ReplayFrame> = trajectory
            .decimated_indices(frame_interval_s)
            .into_iter()
            .map(|i| {
                let s = &samples[i];
                let (left_rv, right_rv, pitch_eff, yaw_eff, glide_ratio, stall) = match i {
                    0 => {
                        let (gr, stalled) = glide_ratio_for(info.spec, s);
                        (0.0, 0.0, 0.0, 0.0, gr, stalled)
                    }
                    _ => {
                        let d = &telemetry[i - 1];
                        (
                            f64::from(d.input.left),
                            f64::from(d.input.right),
                            d.symmetric,
                            d.differential,
                            d.glide_ratio,
                            d.stalled,
                        )
                    }
                };
                ReplayFrame {
                    t_s: s.time_s,
                    x_m: s.position.x,
                    y_m: s.position.y,
                    alt_m: s.altitude_m,
                    v_air_mps: s.speed_mps,
                    heading_deg: s.heading_deg(),
                    bank_deg: s.bank_deg(),
                    pitch: s.pitch,
                    left_rv,
                    right_rv,
                    pitch_eff,
                    yaw_eff,
                    glide_ratio,
                    stall,
                    miss_m: target.map(|t| t.miss_distance(s.position)),
                }
            })
            .collect();

        debug!(
            samples = samples.len(),
            frames = frames.len(),
            frame_interval_s,
            "Decimated run into replay frames"
        );

        Ok(Self {
            header: ReplayHeader {
                run_id: Uuid::new_v4(),
                dt_s: info.config.dt_s,
                seed: info.config.seed,
                frame_interval_s,
                policy: info.policy.to_string(),
                spec: info.spec.clone(),
                scenario: info.scenario.clone(),
            },
            frames,
            touchdown: *trajectory.touchdown(),
            summary: trajectory.summary(),
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReplayError> {
        std::fs::write(path, encode(self)?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        decode(&std::fs::read(path)?)
    }
}

pub fn encode(replay: &Replay) -> Result<Vec<u8>, ReplayError> {
    let mut bytes = Vec::with_capacity(PREFIX_LEN + replay.frames.len() * 64);
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bincode::serialize_into(&mut bytes, replay)?;
    Ok(bytes)
}

pub fn decode(bytes: &[u8]) -> Result<Replay, ReplayError> {
    if bytes.len() < PREFIX_LEN {
        return Err(ReplayError::Truncated { len: bytes.len() });
    }
    let (prefix, body) = bytes.split_at(PREFIX_LEN);
    let found = [prefix[0], prefix[1], prefix[2], prefix[3]];
    if found != MAGIC {
        return Err(ReplayError::BadMagic { found });
    }
    let version = u16::from_le_bytes([prefix[4], prefix[5]]);
    if version != FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(bincode::deserialize(body)?)
}
