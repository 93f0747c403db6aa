//! Point-mass flight dynamics for an unpowered V-tail glider.
//!
//! The crate is pure simulation: no rendering, no I/O. A run starts from a
//! [`Scenario`], steps a [`GliderSpec`] forward at a fixed timestep under a
//! [`ControlPolicy`], and hands back a [`Trajectory`] that ends at ground
//! impact. Renderers and dashboards only ever read the trajectory.

mod math;
pub use math::{wrap_degrees, Vec2d, Vec2f};
mod scenario;
pub use scenario::{Scenario, StartSpec, TargetSpec, WindSpec};

pub mod builtins;

pub mod glider_physics;
pub use glider_physics::{
    glide_ratio_for, ruddervator_mix, sample_wind, step_glider, step_glider_dbg, AircraftState,
    ControlInput, MixedSurfaces, PilotCommand, StepDebug,
};

mod spec;
pub use spec::presets;
pub use spec::GliderSpec;

mod error;
pub use error::SimError;

pub mod policy;
pub use policy::{ControlPolicy, Hold, Schedule, ScheduleStep, ScriptedPilot};

mod trajectory;
pub use trajectory::{FlightSummary, TargetOutcome, Touchdown, Trajectory};

mod simulate;
pub use simulate::{simulate, simulate_dbg, SimConfig};
