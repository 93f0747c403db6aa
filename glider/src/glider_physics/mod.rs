mod types;
mod mixer;
mod wind;
mod dynamics;
mod terms;

pub use types::{AircraftState, ControlInput, StepDebug};
pub use mixer::{ruddervator_mix, MixedSurfaces, PilotCommand};
pub use wind::sample_wind;
pub use dynamics::{glide_ratio_for, step_glider, step_glider_dbg};
