use serde::{Deserialize, Serialize};

use super::types::ControlInput;

/// Pilot-side stick commands before the V-tail mixer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PilotCommand {
    /// Pitch command in [-1, 1] (+ = pull / nose up).
    pub pitch: f32,
    /// Yaw command in [-1, 1] (+ = yaw left).
    pub yaw: f32,
}

impl PilotCommand {
    pub fn mix(self) -> MixedSurfaces {
        ruddervator_mix(self.pitch, self.yaw)
    }
}

/// Output of the forward mixer.
///
/// `pitch_eff` and `yaw_eff` are re-derived from the saturated surfaces, so
/// they show the authority lost when one surface hits its stop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MixedSurfaces {
    pub left: f32,
    pub right: f32,
    pub pitch_eff: f32,
    pub yaw_eff: f32,
}

impl MixedSurfaces {
    pub fn input(&self) -> ControlInput {
        ControlInput::new(self.left, self.right)
    }
}

/// Mix pitch and yaw commands onto the left/right ruddervators.
///
/// `left = pitch + yaw`, `right = pitch - yaw`, each saturated to [-1, 1].
pub fn ruddervator_mix(pitch_cmd: f32, yaw_cmd: f32) -> MixedSurfaces {
    let pitch_cmd = pitch_cmd.clamp(-1.0, 1.0);
    let yaw_cmd = yaw_cmd.clamp(-1.0, 1.0);

    let left = (pitch_cmd + yaw_cmd).clamp(-1.0, 1.0);
    let right = (pitch_cmd - yaw_cmd).clamp(-1.0, 1.0);

    MixedSurfaces {
        left,
        right,
        pitch_eff: (0.5 * (left + right)).clamp(-1.0, 1.0),
        yaw_eff: (0.5 * (left - right)).clamp(-1.0, 1.0),
    }
}
