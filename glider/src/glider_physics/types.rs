use serde::{Deserialize, Serialize};

use crate::{wrap_degrees, Vec2d};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftState {
    /// Simulated seconds since release.
    pub time_s: f64,
    /// Ground position. Frame conventions:
    /// - +X east, +Y north, altitude measured up from the datum.
    /// - Heading 0 points along +X; positive heading rotates toward +Y (left turn).
    pub position: Vec2d,
    pub altitude_m: f64,
    /// Airspeed magnitude, never negative.
    pub speed_mps: f64,
    /// Continuous heading; not wrapped, so full circles accumulate.
    pub heading_rad: f64,
    /// Signed bank, positive = left wing down.
    pub bank_rad: f64,
    /// Normalized pitch attitude in [-1, 1]; +1 is full nose-up trim.
    pub pitch: f64,
}

impl AircraftState {
    /// Heading folded into `[0, 360)` degrees for display.
    pub fn heading_deg(&self) -> f64 {
        wrap_degrees(self.heading_rad.to_degrees())
    }

    pub fn bank_deg(&self) -> f64 {
        self.bank_rad.to_degrees()
    }

    /// Specific mechanical energy `g·h + v²/2` (J/kg) relative to the datum.
    pub fn specific_energy(&self, g: f64) -> f64 {
        g * self.altitude_m + 0.5 * self.speed_mps * self.speed_mps
    }

    pub fn is_grounded(&self, ground_alt_m: f64) -> bool {
        self.altitude_m <= ground_alt_m
    }
}

/// Ruddervator deflections for one step, in normalized surface travel.
///
/// Convention: the symmetric part `(left + right) / 2` is elevator (+ = nose
/// up); the differential part `(left - right) / 2` is rudder (+ = yaw left,
/// heading increases).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub left: f32,
    pub right: f32,
}

impl ControlInput {
    pub const NEUTRAL: Self = Self { left: 0.0, right: 0.0 };

    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Build surfaces from elevator and rudder components.
    pub fn from_components(symmetric: f32, differential: f32) -> Self {
        Self {
            left: symmetric + differential,
            right: symmetric - differential,
        }
    }

    pub fn symmetric(&self) -> f32 {
        0.5 * (self.left + self.right)
    }

    pub fn differential(&self) -> f32 {
        0.5 * (self.left - self.right)
    }

    /// Clamp both surfaces to `±limit`. Non-finite deflections read as neutral.
    pub fn clamped(self, limit: f32) -> Self {
        let limit = limit.abs();
        let clamp = |d: f32| if d.is_finite() { d.clamp(-limit, limit) } else { 0.0 };
        Self {
            left: clamp(self.left),
            right: clamp(self.right),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StepDebug {
    pub dt: f64,
    pub time: f64,
    /// Surfaces after clamping to the deflection limit.
    pub input: ControlInput,
    // Mixer outputs, normalized to [-1, 1]
    pub symmetric: f64,
    pub differential: f64,
    pub yaw_rate: f64,
    // Glide polar
    pub glide_ratio: f64,
    pub gamma: f64,
    pub stalled: bool,
    // Energy exchange
    pub speed_accel: f64,
    pub drag_decel: f64,
    // Sink breakdown (m/s)
    pub base_sink: f64,
    pub turn_sink_factor: f64,
    pub sink: f64,
    // Horizontal motion
    pub forward_speed: f64,
    pub wind: Vec2d,
    pub ground_velocity: Vec2d,
}
