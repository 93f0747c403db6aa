//! Control policies: what the pilot does each step.
//!
//! A policy is asked once per step for the ruddervator input to apply, given
//! the state the step starts from and the length of that step. Closures over
//! the state alone work directly:
//!
//! ```
//! use glider::{AircraftState, ControlInput, ControlPolicy};
//!
//! let mut gentle_left = |_: &AircraftState| ControlInput::from_components(0.0, 0.2);
//! # fn takes(_: &mut dyn ControlPolicy) {}
//! # takes(&mut gentle_left);
//! ```

use serde::{Deserialize, Serialize};

use crate::{AircraftState, ControlInput, PilotCommand};

pub trait ControlPolicy {
    /// Ruddervator input for the step of `dt` seconds starting at `state`.
    fn control(&mut self, state: &AircraftState, dt: f64) -> ControlInput;

    /// Human-readable name for logs and replay headers.
    fn name(&self) -> &str {
        "unnamed"
    }
}

impl<F> ControlPolicy for F
where
    F: FnMut(&AircraftState) -> ControlInput,
{
    fn control(&mut self, state: &AircraftState, _dt: f64) -> ControlInput {
        self(state)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Fixed surfaces for the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Hold(pub ControlInput);

impl ControlPolicy for Hold {
    fn control(&mut self, _state: &AircraftState, _dt: f64) -> ControlInput {
        self.0
    }

    fn name(&self) -> &str {
        "hold"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStep {
    pub start_s: f32,
    #[serde(flatten)]
    pub input: ControlInput,
}

/// Piecewise-constant inputs keyed by start time. Before the first step's
/// start the surfaces are neutral.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    steps: Vec<ScheduleStep>,
}

impl Schedule {
    pub fn new(mut steps: Vec<ScheduleStep>) -> Self {
        steps.sort_by(|a, b| a.start_s.total_cmp(&b.start_s));
        Self { steps }
    }

    pub fn steps(&self) -> &[ScheduleStep] {
        &self.steps
    }

    pub fn input_at(&self, time_s: f64) -> ControlInput {
        // Index of the first step starting after `time_s`.
        let next = self.steps.partition_point(|s| f64::from(s.start_s) <= time_s);
        match next {
            0 => ControlInput::NEUTRAL,
            n => self.steps[n - 1].input,
        }
    }
}

impl ControlPolicy for Schedule {
    fn control(&mut self, state: &AircraftState, _dt: f64) -> ControlInput {
        self.input_at(state.time_s)
    }

    fn name(&self) -> &str {
        "schedule"
    }
}

/// Scripted test pilot: trims pitch with a constant bias and weaves gently on
/// the rudder. Near the ground it eases the nose down. Trim integrates over
/// the step length, so the very first step already moves the stick.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedPilot {
    pub pitch_bias: f32,
    pub yaw_bias: f32,
    /// Below this altitude the pilot adds nose-down pitch to avoid overshoot.
    pub flare_altitude_m: f32,
    command: PilotCommand,
}

impl ScriptedPilot {
    const PITCH_TRIM_RATE: f32 = 0.9;
    const LOW_ALTITUDE_PITCH: f32 = -0.35;
    const WEAVE_AMPLITUDE: f32 = 0.25;
    const WEAVE_RATE: f64 = 0.12;
    const INITIAL_PITCH_CMD: f32 = 0.15;

    pub fn new(pitch_bias: f32, yaw_bias: f32) -> Self {
        Self {
            pitch_bias,
            yaw_bias,
            flare_altitude_m: 250.0,
            command: PilotCommand {
                pitch: Self::INITIAL_PITCH_CMD,
                yaw: 0.0,
            },
        }
    }

    /// Current stick position after the last call to `control`.
    pub fn command(&self) -> PilotCommand {
        self.command
    }
}

impl ControlPolicy for ScriptedPilot {
    fn control(&mut self, state: &AircraftState, dt: f64) -> ControlInput {
        let dt = dt.max(0.0) as f32;

        let mut pitch_in = self.pitch_bias;
        if state.altitude_m < f64::from(self.flare_altitude_m) {
            pitch_in += Self::LOW_ALTITUDE_PITCH;
        }
        let weave = (Self::WEAVE_RATE * state.time_s).sin() as f32;
        let yaw_in = self.yaw_bias + Self::WEAVE_AMPLITUDE * weave;

        // Pitch input trims the stick; yaw input is the stick.
        let pitch_in = pitch_in.clamp(-1.0, 1.0);
        self.command.pitch =
            (self.command.pitch + pitch_in * Self::PITCH_TRIM_RATE * dt).clamp(-1.0, 1.0);
        self.command.yaw = yaw_in.clamp(-1.0, 1.0);

        self.command.mix().input()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec2d;

    fn state_at(time_s: f64, altitude_m: f64) -> AircraftState {
        AircraftState {
            time_s,
            position: Vec2d::ZERO,
            altitude_m,
            speed_mps: 26.0,
            heading_rad: 0.0,
            bank_rad: 0.0,
            pitch: 0.0,
        }
    }

    #[test]
    fn schedule_is_piecewise_constant() {
        let mut schedule = Schedule::new(vec![
            ScheduleStep { start_s: 10.0, input: ControlInput::new(0.5, -0.5) },
            ScheduleStep { start_s: 2.0, input: ControlInput::new(0.2, 0.2) },
        ]);
        assert_eq!(schedule.control(&state_at(0.0, 100.0), 0.1), ControlInput::NEUTRAL);
        assert_eq!(schedule.control(&state_at(2.0, 100.0), 0.1), ControlInput::new(0.2, 0.2));
        assert_eq!(schedule.control(&state_at(9.99, 100.0), 0.1), ControlInput::new(0.2, 0.2));
        assert_eq!(schedule.control(&state_at(50.0, 100.0), 0.1), ControlInput::new(0.5, -0.5));
    }

    #[test]
    fn closures_are_policies() {
        let mut calls = 0;
        let mut policy = |s: &AircraftState| {
            calls += 1;
            ControlInput::from_components(0.0, s.time_s as f32)
        };
        let input = policy.control(&state_at(0.25, 100.0), 0.1);
        assert_eq!(input.differential(), 0.25);
        assert_eq!(calls, 1);
    }

    #[test]
    fn scripted_pilot_trims_nose_up_with_positive_bias() {
        let mut pilot = ScriptedPilot::new(0.5, 0.0);
        for i in 0..60 {
            pilot.control(&state_at(f64::from(i) * 0.1, 800.0), 0.1);
        }
        // 6 s of +0.5 trim at 0.9/s from 0.15, saturated at full pull
        assert_eq!(pilot.command().pitch, 1.0);
    }

    #[test]
    fn scripted_pilot_eases_nose_down_near_ground() {
        let mut high = ScriptedPilot::new(0.1, 0.0);
        let mut low = ScriptedPilot::new(0.1, 0.0);
        for i in 0..20 {
            let t = f64::from(i) * 0.1;
            high.control(&state_at(t, 800.0), 0.1);
            low.control(&state_at(t, 100.0), 0.1);
        }
        assert!(low.command().pitch < high.command().pitch);
    }

    #[test]
    fn scripted_pilot_output_is_mixed_surfaces() {
        let mut pilot = ScriptedPilot::new(0.0, 0.3);
        let input = pilot.control(&state_at(0.0, 800.0), 0.1);
        // At t = 0 the weave term is zero: pitch 0.15, yaw 0.3
        assert!((input.symmetric() - 0.15).abs() < 1e-6);
        assert!((input.differential() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn scripted_pilot_trims_on_its_first_step() {
        let mut pilot = ScriptedPilot::new(0.5, 0.0);
        let input = pilot.control(&state_at(0.0, 800.0), 0.1);
        let expected = 0.15 + 0.5 * 0.9 * 0.1;
        assert!((pilot.command().pitch - expected).abs() < 1e-6);
        assert!((input.symmetric() - expected).abs() < 1e-6);
    }

    #[test]
    fn scripted_pilot_trim_follows_step_length() {
        let mut coarse = ScriptedPilot::new(0.2, 0.0);
        let mut fine = ScriptedPilot::new(0.2, 0.0);
        coarse.control(&state_at(0.0, 800.0), 0.5);
        for i in 0..5 {
            fine.control(&state_at(f64::from(i) * 0.1, 800.0), 0.1);
        }
        assert!((coarse.command().pitch - fine.command().pitch).abs() < 1e-6);
    }
}
