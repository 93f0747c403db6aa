/// Horizontal ground-plane vector for configuration: +X east, +Y north, meters.
pub type Vec2f = bevy_math::Vec2;
/// Ground-plane vector carried by the integrator. Flight state is f64 so that
/// tens of thousands of small steps sum without visible drift.
pub type Vec2d = bevy_math::DVec2;

/// Fold an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Per-step blend factor for a first-order lag with the given rate.
#[inline]
pub(crate) fn lag_gain(rate_per_s: f64, dt: f64) -> f64 {
    (rate_per_s * dt).clamp(0.0, 1.0)
}

#[inline]
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
