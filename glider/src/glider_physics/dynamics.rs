use super::terms::*;
use super::types::{AircraftState, ControlInput, StepDebug};
use crate::math::lag_gain;
use crate::{GliderSpec, Vec2d};

/// Effective glide ratio and stall flag for a state, as the next step would see them.
pub fn glide_ratio_for(spec: &GliderSpec, state: &AircraftState) -> (f64, bool) {
    let stalled = is_stalled(spec, state.pitch, state.speed_mps);
    let mut gr = glide_ratio_from_pitch(spec, state.pitch);
    if stalled {
        gr *= f64::from(spec.stall_gr_factor);
    }
    (gr, stalled)
}

/// Advance the glider by one fixed step under the given ruddervator input.
/// See `step_glider_dbg` for the per-step breakdown.
pub fn step_glider(
    spec: &GliderSpec,
    input: ControlInput,
    wind: Vec2d,
    state: &mut AircraftState,
    dt: f64,
) {
    step_glider_dbg(spec, input, wind, state, dt, None);
}

/// Variant of `step_glider` that fills out an optional debug telemetry struct.
pub fn step_glider_dbg(
    spec: &GliderSpec,
    input: ControlInput,
    wind: Vec2d,
    state: &mut AircraftState,
    dt: f64,
    mut dbg: Option<&mut StepDebug>,
) {
    if dt <= 0.0 || !dt.is_finite() {
        return;
    }

    // Mixer: clamp surfaces to their travel, then split into elevator/rudder.
    let limit = spec.deflection_limit.max(f32::EPSILON);
    let input = input.clamped(limit);
    let symmetric = f64::from((input.symmetric() / limit).clamp(-1.0, 1.0));
    let differential = f64::from((input.differential() / limit).clamp(-1.0, 1.0));

    // Airframe response: pitch and bank lag their commands, heading follows rudder.
    let authority = control_authority(spec, state.speed_mps);
    let pitch_gain = lag_gain(f64::from(spec.pitch_response_per_s) * authority, dt);
    state.pitch += (symmetric - state.pitch) * pitch_gain;
    state.pitch = state.pitch.clamp(-1.0, 1.0);

    let yaw_rate = f64::from(spec.yaw_rate_deg_s).to_radians() * differential;
    state.heading_rad += yaw_rate * dt;

    let bank_target = differential * f64::from(spec.bank_max_deg).to_radians();
    let bank_gain = lag_gain(f64::from(spec.bank_response_per_s) * authority, dt);
    state.bank_rad += (bank_target - state.bank_rad) * bank_gain;

    // Glide polar
    let (glide_ratio, stalled) = glide_ratio_for(spec, state);
    let gamma = flight_path_angle(glide_ratio);
    let (sin_gamma, cos_gamma) = gamma.sin_cos();

    // Energy exchange: along-path gravity feeds airspeed, drag bleeds it.
    // Integrated in rate form so a dead drop from zero airspeed still accelerates.
    let gain = gravity_along_path(spec, sin_gamma);
    let drag = drag_deceleration(spec, state.speed_mps);
    let speed_accel = gain - drag;
    let speed = state.speed_mps + speed_accel * dt;
    state.speed_mps = if speed.is_finite() {
        speed.clamp(0.0, f64::from(spec.v_max_mps))
    } else {
        0.0
    };

    // Sink along the glide path, plus the dissipative turn and stall penalties.
    let base_sink = state.speed_mps * sin_gamma;
    let turn_factor = turn_sink_factor(spec, state.bank_rad);
    let mut sink = base_sink * turn_factor;
    if stalled {
        sink *= f64::from(spec.stall_sink_boost);
    }

    // Horizontal motion: air-relative forward speed along heading, plus wind.
    let forward_speed = state.speed_mps * cos_gamma;
    let air_velocity = Vec2d::from_angle(state.heading_rad) * forward_speed;
    let ground_velocity = air_velocity + wind;

    state.position += ground_velocity * dt;
    state.altitude_m -= sink * dt;
    state.time_s += dt;

    if let Some(d) = dbg.as_mut() {
        d.dt = dt;
        d.time = state.time_s;
        d.input = input;
        d.symmetric = symmetric;
        d.differential = differential;
        d.yaw_rate = yaw_rate;
        d.glide_ratio = glide_ratio;
        d.gamma = gamma;
        d.stalled = stalled;
        d.speed_accel = speed_accel;
        d.drag_decel = drag;
        d.base_sink = base_sink;
        d.turn_sink_factor = turn_factor;
        d.sink = sink;
        d.forward_speed = forward_speed;
        d.wind = wind;
        d.ground_velocity = ground_velocity;
    }
}
