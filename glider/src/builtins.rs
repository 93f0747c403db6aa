use crate::{Scenario, StartSpec, TargetSpec, Vec2f, WindSpec};

/// Dead drop in still air: zero airspeed, heading +X, no target.
pub fn calm_drop(altitude_m: f32) -> Scenario {
    Scenario {
        start: StartSpec {
            position: Vec2f::ZERO,
            altitude_m,
            speed_mps: 0.0,
            heading_deg: 0.0,
            pitch: 0.0,
        },
        ground_alt_m: 0.0,
        wind: WindSpec::CALM,
        target: None,
    }
}

// Default mission: released at trim speed into a
// light north-westerly breeze with a 60 m landing circle downrange.
pub fn target_drop() -> Scenario {
    Scenario {
        start: StartSpec {
            position: Vec2f::ZERO,
            altitude_m: 900.0,
            speed_mps: 26.0,
            heading_deg: 0.0,
            pitch: 0.0,
        },
        ground_alt_m: 0.0,
        wind: WindSpec {
            mean: Vec2f::new(2.2, -1.0),
            gust_mps: 0.35,
        },
        target: Some(TargetSpec {
            position: Vec2f::new(2400.0, 700.0),
            radius_m: 60.0,
        }),
    }
}
