use crate::GliderSpec;

// ----- Glide polar -----

/// Map normalized pitch [-1, 1] onto the [gr_min, gr_max] envelope.
pub(super) fn glide_ratio_from_pitch(spec: &GliderSpec, pitch: f64) -> f64 {
    let t = (pitch.clamp(-1.0, 1.0) + 1.0) * 0.5;
    let (gr_min, gr_max) = (f64::from(spec.gr_min), f64::from(spec.gr_max));
    gr_min + (gr_max - gr_min) * t
}

pub(super) fn is_stalled(spec: &GliderSpec, pitch: f64, speed_mps: f64) -> bool {
    pitch > f64::from(spec.stall_pitch) || speed_mps < f64::from(spec.stall_speed_mps)
}

/// Descent angle below the horizon for a glide ratio: tan γ = 1 / gr.
pub(super) fn flight_path_angle(glide_ratio: f64) -> f64 {
    1.0_f64.atan2(glide_ratio.max(0.1))
}

// ----- Control response -----

/// Surface authority relative to the reference airspeed. Multiplies the pitch
/// and bank lag rates.
pub(super) fn control_authority(spec: &GliderSpec, speed_mps: f64) -> f64 {
    speed_mps.max(0.0) / f64::from(spec.response_ref_speed_mps)
}

// ----- Energy exchange -----

/// Along-path gravity component: the share of potential energy converted
/// into airspeed while descending at `gamma`.
pub(super) fn gravity_along_path(spec: &GliderSpec, sin_gamma: f64) -> f64 {
    f64::from(spec.g) * sin_gamma
}

/// Quadratic drag deceleration. Drains `drag_k · v³` of specific energy per second.
pub(super) fn drag_deceleration(spec: &GliderSpec, speed_mps: f64) -> f64 {
    f64::from(spec.drag_k) * speed_mps * speed_mps
}

// ----- Sink penalties -----

/// Multiplier on sink rate from lift lost to bank: `1 + k · (|bank| / bank_max)²`.
pub(super) fn turn_sink_factor(spec: &GliderSpec, bank_rad: f64) -> f64 {
    let bank_max = f64::from(spec.bank_max_deg).to_radians();
    if bank_max <= 0.0 {
        return 1.0;
    }
    let frac = (bank_rad.abs() / bank_max).clamp(0.0, 1.0);
    1.0 + f64::from(spec.bank_sink_factor) * frac * frac
}
