use serde::{Deserialize, Serialize};

use crate::SimError;

/// Tuning parameters for a glider airframe.
///
/// Values are "playable", not certified: they shape a believable energy
/// budget rather than reproduce a particular aircraft. Angles carry a `_deg`
/// suffix; everything else is SI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GliderSpec {
    /// Gravitational acceleration (m/s²).
    pub g: f32,
    /// Mechanical travel of each ruddervator. Inputs beyond ±limit are clamped.
    pub deflection_limit: f32,
    /// Never-exceed airspeed; speed is clamped to `[0, v_max_mps]`.
    pub v_max_mps: f32,
    /// Glide ratio at full nose-down trim.
    pub gr_min: f32,
    /// Glide ratio at full nose-up trim.
    pub gr_max: f32,
    /// Pitch attitude above which the wing stalls regardless of speed.
    pub stall_pitch: f32,
    /// Airspeed below which the wing stalls.
    pub stall_speed_mps: f32,
    pub stall_gr_factor: f32,
    pub stall_sink_boost: f32,
    /// Pitch lag rate at `response_ref_speed_mps`.
    pub pitch_response_per_s: f32,
    /// Heading rate at full differential deflection.
    pub yaw_rate_deg_s: f32,
    /// Bank reached at full differential deflection.
    pub bank_max_deg: f32,
    /// Bank lag rate at `response_ref_speed_mps`.
    pub bank_response_per_s: f32,
    /// Airspeed at which the quoted response rates hold. Surface authority
    /// scales linearly with airspeed, so both lags settle over distance flown.
    pub response_ref_speed_mps: f32,
    /// Extra sink fraction at `bank_max_deg`; scales with (bank / max)².
    pub bank_sink_factor: f32,
    /// Along-path drag deceleration per (m/s)². Specific drag power is `drag_k · v³`.
    pub drag_k: f32,
}

impl Default for GliderSpec {
    fn default() -> Self {
        presets::vtail_trainer()
    }
}

impl GliderSpec {
    /// Reject parameter sets the integrator cannot make physical sense of.
    pub fn validate(&self) -> Result<(), SimError> {
        fn finite(name: &'static str, value: f32) -> Result<(), SimError> {
            if value.is_finite() {
                Ok(())
            } else {
                Err(SimError::InvalidParameter {
                    name,
                    reason: format!("must be finite, got {value}"),
                })
            }
        }
        fn positive(name: &'static str, value: f32) -> Result<(), SimError> {
            finite(name, value)?;
            if value > 0.0 {
                Ok(())
            } else {
                Err(SimError::InvalidParameter {
                    name,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }
        fn non_negative(name: &'static str, value: f32) -> Result<(), SimError> {
            finite(name, value)?;
            if value >= 0.0 {
                Ok(())
            } else {
                Err(SimError::InvalidParameter {
                    name,
                    reason: format!("must not be negative, got {value}"),
                })
            }
        }

        positive("g", self.g)?;
        positive("deflection_limit", self.deflection_limit)?;
        positive("v_max_mps", self.v_max_mps)?;
        positive("gr_min", self.gr_min)?;
        positive("gr_max", self.gr_max)?;
        if self.gr_max < self.gr_min {
            return Err(SimError::InvalidParameter {
                name: "gr_max",
                reason: format!("must be at least gr_min ({}), got {}", self.gr_min, self.gr_max),
            });
        }
        finite("stall_pitch", self.stall_pitch)?;
        non_negative("stall_speed_mps", self.stall_speed_mps)?;
        positive("stall_gr_factor", self.stall_gr_factor)?;
        non_negative("stall_sink_boost", self.stall_sink_boost)?;
        non_negative("pitch_response_per_s", self.pitch_response_per_s)?;
        non_negative("yaw_rate_deg_s", self.yaw_rate_deg_s)?;
        non_negative("bank_max_deg", self.bank_max_deg)?;
        non_negative("bank_response_per_s", self.bank_response_per_s)?;
        positive("response_ref_speed_mps", self.response_ref_speed_mps)?;
        non_negative("bank_sink_factor", self.bank_sink_factor)?;
        non_negative("drag_k", self.drag_k)?;
        Ok(())
    }
}

pub mod presets {
    use super::*;

    // Light V-tail trainer dropped from a carrier. Trims to roughly 26 m/s at
    // neutral pitch (g · sin γ = drag_k · v² with γ from a glide ratio of 11).
    pub fn vtail_trainer() -> GliderSpec {
        GliderSpec {
            g: 9.81,
            deflection_limit: 1.0,
            v_max_mps: 60.0,
            // Pitch → glide ratio envelope
            gr_min: 4.0,
            gr_max: 18.0,
            // Stall region: excessive pitch-up or too slow
            stall_pitch: 0.75,
            stall_speed_mps: 18.0,
            stall_gr_factor: 0.55,
            stall_sink_boost: 1.35,
            // Control responsiveness
            pitch_response_per_s: 1.6,
            yaw_rate_deg_s: 55.0,
            // Turning requires bank, bank costs sink
            bank_max_deg: 40.0,
            bank_response_per_s: 2.0,
            bank_sink_factor: 0.30,
            response_ref_speed_mps: 26.0,
            drag_k: 0.0013,
        }
    }

    // Same airframe with a dirty wing; trims below the stall speed, so it
    // mushes down in a permanent stall.
    pub fn draggy_trainer() -> GliderSpec {
        GliderSpec {
            drag_k: 0.006,
            ..vtail_trainer()
        }
    }
}
