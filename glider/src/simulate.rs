use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::math::lerp;
use crate::{
    sample_wind, step_glider_dbg, AircraftState, ControlPolicy, GliderSpec, Scenario, SimError,
    StepDebug, Trajectory,
};

/// Integration settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed timestep (s).
    pub dt_s: f32,
    /// Simulated-time budget; a run still airborne after this fails with `NoImpact`.
    pub max_time_s: f32,
    /// Seed for the gust generator.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt_s: 1.0 / 60.0,
            max_time_s: 600.0,
            seed: 0,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.dt_s.is_finite() || self.dt_s <= 0.0 {
            return Err(SimError::InvalidTimestep(self.dt_s));
        }
        if !self.max_time_s.is_finite() || self.max_time_s <= 0.0 {
            return Err(SimError::InvalidTimeBudget(self.max_time_s));
        }
        Ok(())
    }
}

/// Fly `scenario` under `policy` until the glider reaches the ground.
pub fn simulate<P>(
    spec: &GliderSpec,
    scenario: &Scenario,
    config: &SimConfig,
    policy: &mut P,
) -> Result<Trajectory, SimError>
where
    P: ControlPolicy + ?Sized,
{
    fly(spec, scenario, config, policy, None)
}

/// Variant of `simulate` that also returns per-step telemetry. Entry `i`
/// describes the step that produced trajectory sample `i + 1`.
pub fn simulate_dbg<P>(
    spec: &GliderSpec,
    scenario: &Scenario,
    config: &SimConfig,
    policy: &mut P,
) -> Result<(Trajectory, Vec<StepDebug>), SimError>
where
    P: ControlPolicy + ?Sized,
{
    let mut telemetry = Vec::new();
    let trajectory = fly(spec, scenario, config, policy, Some(&mut telemetry))?;
    Ok((trajectory, telemetry))
}

fn fly<P>(
    spec: &GliderSpec,
    scenario: &Scenario,
    config: &SimConfig,
    policy: &mut P,
    mut telemetry: Option<&mut Vec<StepDebug>>,
) -> Result<Trajectory, SimError>
where
    P: ControlPolicy + ?Sized,
{
    spec.validate()?;
    scenario.validate()?;
    config.validate()?;

    let ground = f64::from(scenario.ground_alt_m);
    let dt = f64::from(config.dt_s);
    let max_steps = (f64::from(config.max_time_s) / dt).ceil() as usize;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut state = scenario.initial_state();
    let mut samples = Vec::with_capacity(max_steps.min(1 << 16) + 1);
    samples.push(state);

    info!(
        policy = policy.name(),
        altitude_m = state.altitude_m,
        speed_mps = state.speed_mps,
        dt,
        "Glider released"
    );

    let mut was_stalled = false;
    for _ in 0..max_steps {
        let input = policy.control(&state, dt);
        let wind = sample_wind(&scenario.wind, &mut rng).as_dvec2();
        let prev = state;
        let mut dbg = StepDebug::default();
        step_glider_dbg(spec, input, wind, &mut state, dt, Some(&mut dbg));

        if dbg.stalled != was_stalled {
            debug!(
                time_s = state.time_s,
                speed_mps = prev.speed_mps,
                pitch = prev.pitch,
                stalled = dbg.stalled,
                "Stall state changed"
            );
            was_stalled = dbg.stalled;
        }
        if let Some(t) = telemetry.as_deref_mut() {
            t.push(dbg);
        }

        if state.is_grounded(ground) {
            let touchdown = interpolate_to_ground(&prev, &state, ground);
            let trajectory = Trajectory::seal(samples, touchdown, scenario.target);
            let td = trajectory.touchdown();
            info!(
                time_s = td.time_s,
                x = td.position.x,
                y = td.position.y,
                heading_deg = touchdown.heading_deg(),
                speed_mps = td.speed_mps,
                miss_m = td.target.map(|t| t.miss_m),
                "Touchdown"
            );
            return Ok(trajectory);
        }
        samples.push(state);
    }

    Err(SimError::NoImpact {
        max_time_s: config.max_time_s,
        altitude_m: state.altitude_m,
    })
}

/// Pull the post-impact state back along the step to the ground crossing.
fn interpolate_to_ground(prev: &AircraftState, next: &AircraftState, ground: f64) -> AircraftState {
    let drop = prev.altitude_m - next.altitude_m;
    let t = if drop > 0.0 {
        ((prev.altitude_m - ground) / drop).clamp(0.0, 1.0)
    } else {
        1.0
    };
    AircraftState {
        time_s: lerp(prev.time_s, next.time_s, t),
        position: prev.position.lerp(next.position, t),
        altitude_m: ground,
        speed_mps: lerp(prev.speed_mps, next.speed_mps, t).max(0.0),
        heading_rad: lerp(prev.heading_rad, next.heading_rad, t),
        bank_rad: lerp(prev.bank_rad, next.bank_rad, t),
        pitch: lerp(prev.pitch, next.pitch, t),
    }
}
