use anyhow::{Context, Result};
use glider::{simulate, GliderSpec};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::Config;

/// Outcome of one run in a parameter sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub drag_k: f32,
    /// Horizontal distance from release to touchdown.
    pub distance_m: f64,
    pub flight_time_s: f64,
}

/// Fly the configured scenario once per drag coefficient, in parallel.
/// Results come back sorted by drag.
pub fn run_drag_sweep(cfg: &Config, drags: &[f32]) -> Result<Vec<SweepPoint>> {
    let mut points = drags
        .par_iter()
        .map(|&drag_k| -> Result<SweepPoint> {
            let spec = GliderSpec {
                drag_k,
                ..cfg.glider.clone()
            };
            let mut policy = cfg.pilot.build();
            let trajectory = simulate(&spec, &cfg.scenario, &cfg.run, &mut *policy)
                .with_context(|| format!("sweep run with drag_k = {drag_k}"))?;
            Ok(SweepPoint {
                drag_k,
                distance_m: trajectory.displacement().length(),
                flight_time_s: trajectory.summary().flight_time_s,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    points.sort_by(|a, b| a.drag_k.total_cmp(&b.drag_k));
    for p in &points {
        info!(
            drag_k = p.drag_k,
            distance_m = p.distance_m,
            flight_time_s = p.flight_time_s,
            "Sweep point"
        );
    }
    Ok(points)
}
