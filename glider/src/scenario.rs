use serde::{Deserialize, Serialize};

use crate::{AircraftState, SimError, Vec2d, Vec2f};

/// Where and how the glider is released.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartSpec {
    pub position: Vec2f,
    pub altitude_m: f32,
    /// Airspeed at release. Zero is a dead drop.
    pub speed_mps: f32,
    /// 0° points along +X, positive turns toward +Y.
    pub heading_deg: f32,
    /// Initial normalized pitch attitude in [-1, 1].
    pub pitch: f32,
}

impl Default for StartSpec {
    fn default() -> Self {
        Self {
            position: Vec2f::ZERO,
            altitude_m: 900.0,
            speed_mps: 26.0,
            heading_deg: 0.0,
            pitch: 0.0,
        }
    }
}

/// Steady wind plus uniform per-axis gusts in `[-gust_mps, gust_mps]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindSpec {
    pub mean: Vec2f,
    pub gust_mps: f32,
}

impl WindSpec {
    pub const CALM: Self = Self {
        mean: Vec2f::ZERO,
        gust_mps: 0.0,
    };

    pub fn is_calm(&self) -> bool {
        self.mean == Vec2f::ZERO && self.gust_mps <= 0.0
    }
}

impl Default for WindSpec {
    fn default() -> Self {
        Self::CALM
    }
}

/// Landing zone on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub position: Vec2f,
    pub radius_m: f32,
}

impl TargetSpec {
    pub fn miss_distance(&self, position: Vec2d) -> f64 {
        position.distance(self.position.as_dvec2())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub start: StartSpec,
    pub ground_alt_m: f32,
    pub wind: WindSpec,
    pub target: Option<TargetSpec>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            start: StartSpec::default(),
            ground_alt_m: 0.0,
            wind: WindSpec::CALM,
            target: None,
        }
    }
}

impl Scenario {
    /// Release state at t = 0.
    pub fn initial_state(&self) -> AircraftState {
        AircraftState {
            time_s: 0.0,
            position: self.start.position.as_dvec2(),
            altitude_m: f64::from(self.start.altitude_m),
            speed_mps: f64::from(self.start.speed_mps),
            heading_rad: f64::from(self.start.heading_deg).to_radians(),
            bank_rad: 0.0,
            pitch: f64::from(self.start.pitch.clamp(-1.0, 1.0)),
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let start = &self.start;
        if !start.altitude_m.is_finite()
            || !self.ground_alt_m.is_finite()
            || start.altitude_m <= self.ground_alt_m
        {
            return Err(SimError::StartBelowGround {
                altitude_m: start.altitude_m,
                ground_m: self.ground_alt_m,
            });
        }
        if !start.speed_mps.is_finite() || start.speed_mps < 0.0 {
            return Err(SimError::InvalidInitialSpeed(start.speed_mps));
        }
        if !start.position.is_finite() || !start.heading_deg.is_finite() || !start.pitch.is_finite() {
            return Err(SimError::InvalidScenario {
                name: "start",
                reason: "position, heading and pitch must be finite".to_string(),
            });
        }
        if !self.wind.mean.is_finite() || !self.wind.gust_mps.is_finite() || self.wind.gust_mps < 0.0 {
            return Err(SimError::InvalidScenario {
                name: "wind",
                reason: format!(
                    "mean must be finite and gust non-negative, got mean={:?} gust={}",
                    self.wind.mean, self.wind.gust_mps
                ),
            });
        }
        if let Some(target) = &self.target {
            if !target.position.is_finite() || !target.radius_m.is_finite() || target.radius_m < 0.0 {
                return Err(SimError::InvalidScenario {
                    name: "target",
                    reason: format!("radius must be non-negative, got {}", target.radius_m),
                });
            }
        }
        Ok(())
    }
}
