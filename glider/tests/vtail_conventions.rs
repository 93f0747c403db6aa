use glider::{
    builtins::calm_drop, presets, simulate, step_glider, AircraftState, ControlInput, Hold,
    SimConfig, Vec2d,
};

fn cruising_state() -> AircraftState {
    AircraftState {
        time_s: 0.0,
        position: Vec2d::ZERO,
        altitude_m: 800.0,
        speed_mps: 26.0,
        heading_rad: 0.0,
        bank_rad: 0.0,
        pitch: 0.0,
    }
}

fn fly_for(input: ControlInput, seconds: f64) -> AircraftState {
    let spec = presets::vtail_trainer();
    let mut state = cruising_state();
    let dt = 1.0 / 60.0;
    let steps = (seconds / dt).round() as usize;
    for _ in 0..steps {
        step_glider(&spec, input, Vec2d::ZERO, &mut state, dt);
    }
    state
}

#[test]
fn left_surface_down_turns_left() {
    // differential = (left - right) / 2 > 0 → yaw left, heading increases
    let state = fly_for(ControlInput::new(0.4, -0.4), 3.0);
    assert!(state.heading_rad > 0.5, "expected left turn, heading={}", state.heading_rad);
    assert!(state.bank_rad > 0.0, "left turn should bank left, bank={}", state.bank_rad);
    assert!(state.position.y > 0.0, "left turn from +X should drift toward +Y, y={}", state.position.y);
}

#[test]
fn right_surface_down_turns_right() {
    let state = fly_for(ControlInput::new(-0.4, 0.4), 3.0);
    assert!(state.heading_rad < -0.5, "expected right turn, heading={}", state.heading_rad);
    assert!(state.bank_rad < 0.0);
    assert!(state.position.y < 0.0);
}

#[test]
fn heading_rate_matches_yaw_authority() {
    let spec = presets::vtail_trainer();
    let state = fly_for(ControlInput::from_components(0.0, 0.5), 2.0);
    let expected = f64::from(spec.yaw_rate_deg_s).to_radians() * 0.5 * 2.0;
    assert!(
        (state.heading_rad - expected).abs() < 1e-3,
        "heading {} vs expected {}",
        state.heading_rad,
        expected
    );
}

#[test]
fn symmetric_deflection_never_changes_heading() {
    let spec = presets::vtail_trainer();
    let config = SimConfig {
        max_time_s: 3600.0,
        ..SimConfig::default()
    };
    let mut scenario = calm_drop(600.0);
    scenario.start.speed_mps = 26.0;
    scenario.start.heading_deg = 30.0;

    let nose_up = simulate(&spec, &scenario, &config, &mut Hold(ControlInput::new(0.4, 0.4)))
        .expect("nose-up run should touch down");
    let nose_down = simulate(&spec, &scenario, &config, &mut Hold(ControlInput::new(-0.3, -0.3)))
        .expect("nose-down run should touch down");

    let h0 = scenario.initial_state().heading_rad;
    assert_eq!(nose_up.touchdown().heading_rad, h0);
    assert_eq!(nose_down.touchdown().heading_rad, h0);
    // ...but glide ratio and descent differ
    assert!(nose_up.touchdown().time_s > nose_down.touchdown().time_s);
    assert!(nose_up.track_length() > nose_down.track_length());
}

#[test]
fn out_of_range_deflection_acts_like_full_deflection() {
    let saturated = fly_for(ControlInput::new(5.0, -5.0), 2.0);
    let full = fly_for(ControlInput::new(1.0, -1.0), 2.0);
    assert_eq!(saturated, full);
}
