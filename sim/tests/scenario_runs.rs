use std::path::Path;

use glider::{ControlInput, ControlPolicy, SimError};
use replay::Replay;
use sim::{load_config, parse_config, run, run_drag_sweep, write_replay, Config, PilotConfig};

fn sample_config_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../config/drop.toml")
}

fn short_drop(pilot: &str) -> Config {
    let text = format!(
        r#"
[run]
dt_s = 0.05
seed = 3

[scenario.start]
altitude_m = 250.0
speed_mps = 26.0

[scenario.target]
position = [1500.0, 0.0]
radius_m = 50.0

{pilot}
"#
    );
    parse_config(&text).expect("test config should parse")
}

#[test]
fn checked_in_config_loads() {
    let cfg = load_config(&sample_config_path()).expect("config/drop.toml should load");
    assert_eq!(cfg.run.seed, 7);
    assert_eq!(cfg.scenario.start.altitude_m, 900.0);
    assert!(cfg.scenario.target.is_some());
    assert!(matches!(cfg.pilot, PilotConfig::Scripted { .. }));
    assert!(cfg.sweep.map(|s| !s.drag_k.is_empty()).unwrap_or(false));
    // Fields not in the file keep preset values
    assert_eq!(cfg.glider.gr_max, glider::presets::vtail_trainer().gr_max);
}

#[test]
fn empty_config_is_a_calm_hold() {
    let cfg = parse_config("").unwrap();
    assert_eq!(cfg, Config::default());
    assert!(cfg.scenario.wind.is_calm());
    assert_eq!(cfg.pilot, PilotConfig::default());
}

#[test]
fn unknown_pilot_kind_is_rejected() {
    let err = parse_config("[pilot]\nkind = \"autoland\"\n").unwrap_err();
    assert!(format!("{err:#}").contains("autoland"), "got {err:#}");
}

#[test]
fn start_below_ground_is_rejected_at_load() {
    let err =
        parse_config("[scenario]\nground_alt_m = 500.0\n[scenario.start]\naltitude_m = 100.0\n")
            .unwrap_err();
    let sim_err = err
        .downcast_ref::<SimError>()
        .expect("validation error should be a SimError");
    assert!(matches!(sim_err, SimError::StartBelowGround { .. }));
}

#[test]
fn schedule_pilot_parses_steps() {
    let cfg = short_drop(
        r#"
[pilot]
kind = "schedule"
steps = [
    { start_s = 5.0, left = 0.4, right = -0.4 },
    { start_s = 0.0, left = 0.1, right = 0.1 },
]
"#,
    );
    let mut policy = cfg.pilot.build();
    let state = cfg.scenario.initial_state();
    assert_eq!(policy.control(&state, cfg.run.dt_s.into()), ControlInput::new(0.1, 0.1));
    assert_eq!(policy.name(), "schedule");
}

#[test]
fn run_produces_matching_trajectory_and_replay() {
    let cfg = short_drop("[pilot]\nkind = \"hold\"\nleft = 0.2\nright = 0.2\n");
    let report = run(&cfg).expect("run should land");
    assert_eq!(report.replay.summary, report.trajectory.summary());
    assert_eq!(report.replay.touchdown, *report.trajectory.touchdown());
    assert_eq!(report.replay.header.policy, "hold");
    assert_eq!(report.replay.header.seed, 3);
    assert!(report.replay.frames.len() > 2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out.vtrp");
    write_replay(&report.replay, &path).expect("replay should be written");
    let loaded = Replay::load(&path).unwrap();
    assert_eq!(loaded, report.replay);
}

#[test]
fn sweep_is_sorted_by_drag() {
    let cfg = short_drop("[pilot]\nkind = \"hold\"\n");
    let points = run_drag_sweep(&cfg, &[0.003, 0.0005, 0.0013]).unwrap();
    let drags: Vec<f32> = points.iter().map(|p| p.drag_k).collect();
    assert_eq!(drags, vec![0.0005, 0.0013, 0.003]);
}

#[test]
fn sweep_loses_distance_with_every_drag_increment() {
    // Equal-range runs differ only in summation order
    const NOISE_M: f64 = 1e-5;
    let cfg = short_drop("[pilot]\nkind = \"hold\"\n");
    let drags: Vec<f32> = (0..=40).rev().map(|i| i as f32 * 2.5e-4).collect();
    let points = run_drag_sweep(&cfg, &drags).unwrap();
    assert_eq!(points.len(), drags.len());
    for pair in points.windows(2) {
        assert!(pair[1].drag_k > pair[0].drag_k);
        assert!(
            pair[1].distance_m <= pair[0].distance_m + NOISE_M,
            "drag {} flew {} m, further than drag {} at {} m",
            pair[1].drag_k,
            pair[1].distance_m,
            pair[0].drag_k,
            pair[0].distance_m
        );
    }
    let (first, last) = (points[0], points[points.len() - 1]);
    assert!(last.distance_m < first.distance_m);
}
