use thiserror::Error;

/// Reasons a simulation run refuses to start or fails to finish.
///
/// Numerical trouble inside a step never surfaces here: the integrator clamps
/// instead. These errors are raised before the first step, or when a run
/// exhausts its time budget without touching down.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("start altitude {altitude_m} m is not above ground level {ground_m} m")]
    StartBelowGround { altitude_m: f32, ground_m: f32 },

    #[error("initial speed must be finite and non-negative, got {0} m/s")]
    InvalidInitialSpeed(f32),

    #[error("timestep must be positive and finite, got {0} s")]
    InvalidTimestep(f32),

    #[error("time budget must be positive and finite, got {0} s")]
    InvalidTimeBudget(f32),

    #[error("invalid glider parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("invalid scenario field `{name}`: {reason}")]
    InvalidScenario { name: &'static str, reason: String },

    #[error("no ground impact within {max_time_s} s of simulated time (altitude still {altitude_m} m)")]
    NoImpact { max_time_s: f32, altitude_m: f64 },
}
