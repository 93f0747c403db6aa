use serde::{Deserialize, Serialize};

use crate::{AircraftState, TargetSpec, Vec2d};

/// Miss distance against the scenario's landing zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetOutcome {
    pub miss_m: f64,
    pub on_target: bool,
}

impl TargetOutcome {
    pub fn evaluate(target: &TargetSpec, position: Vec2d) -> Self {
        let miss_m = target.miss_distance(position);
        Self {
            miss_m,
            on_target: miss_m <= f64::from(target.radius_m),
        }
    }
}

/// Where and how the glider met the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touchdown {
    pub time_s: f64,
    pub position: Vec2d,
    pub heading_rad: f64,
    pub speed_mps: f64,
    pub target: Option<TargetOutcome>,
}

/// Headline numbers for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightSummary {
    pub flight_time_s: f64,
    pub impact_speed_mps: f64,
    /// Length of the ground track, including wind drift.
    pub track_length_m: f64,
    pub impact_miss_m: Option<f64>,
    /// Closest horizontal approach to the target at any sample.
    pub min_miss_m: Option<f64>,
}

/// Append-only record of one run, from release to ground impact.
///
/// Sample 0 is the release state; each integration step adds one sample. The
/// last sample is the first at or below ground level and coincides with the
/// touchdown point; every earlier sample is above ground.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<AircraftState>,
    touchdown: Touchdown,
    target: Option<TargetSpec>,
}

impl Trajectory {
    /// Seal a finished run by appending the touchdown state.
    pub(crate) fn seal(
        mut samples: Vec<AircraftState>,
        last: AircraftState,
        target: Option<TargetSpec>,
    ) -> Self {
        samples.push(last);
        let touchdown = Touchdown {
            time_s: last.time_s,
            position: last.position,
            heading_rad: last.heading_rad,
            speed_mps: last.speed_mps,
            target: target.as_ref().map(|t| TargetOutcome::evaluate(t, last.position)),
        };
        Self {
            samples,
            touchdown,
            target,
        }
    }

    pub fn samples(&self) -> &[AircraftState] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: a sealed trajectory holds at least the touchdown sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn initial(&self) -> &AircraftState {
        &self.samples[0]
    }

    pub fn final_state(&self) -> &AircraftState {
        &self.samples[self.samples.len() - 1]
    }

    pub fn touchdown(&self) -> &Touchdown {
        &self.touchdown
    }

    pub fn target(&self) -> Option<&TargetSpec> {
        self.target.as_ref()
    }

    /// Sum of horizontal segment lengths between consecutive samples.
    pub fn track_length(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| w[0].position.distance(w[1].position))
            .sum()
    }

    /// Straight-line horizontal distance from release to touchdown.
    pub fn displacement(&self) -> Vec2d {
        self.final_state().position - self.initial().position
    }

    /// Net heading change over the run (unwrapped, so full circles count).
    pub fn heading_change(&self) -> f64 {
        self.final_state().heading_rad - self.initial().heading_rad
    }

    /// Indices of samples at least `interval_s` apart, always keeping the first
    /// and the touchdown sample. A non-positive interval keeps everything.
    pub fn decimated_indices(&self, interval_s: f32) -> Vec<usize> {
        let interval_s = f64::from(interval_s);
        let mut kept: Vec<usize> = Vec::new();
        let mut last_t = f64::NEG_INFINITY;
        for (i, s) in self.samples.iter().enumerate() {
            if kept.is_empty() || interval_s <= 0.0 || s.time_s - last_t > interval_s {
                kept.push(i);
                last_t = s.time_s;
            }
        }
        let last = self.samples.len() - 1;
        if kept.last() != Some(&last) {
            kept.push(last);
        }
        kept
    }

    pub fn summary(&self) -> FlightSummary {
        let min_miss_m = self.target.as_ref().map(|t| {
            self.samples
                .iter()
                .map(|s| t.miss_distance(s.position))
                .fold(f64::INFINITY, f64::min)
        });
        FlightSummary {
            flight_time_s: self.touchdown.time_s - self.initial().time_s,
            impact_speed_mps: self.touchdown.speed_mps,
            track_length_m: self.track_length(),
            impact_miss_m: self.touchdown.target.map(|t| t.miss_m),
            min_miss_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f64, x: f64, alt: f64) -> AircraftState {
        AircraftState {
            time_s: t,
            position: Vec2d::new(x, 0.0),
            altitude_m: alt,
            speed_mps: 20.0,
            heading_rad: 0.0,
            bank_rad: 0.0,
            pitch: 0.0,
        }
    }

    fn straight_run() -> Trajectory {
        let samples = (0..10)
            .map(|i| sample(f64::from(i) * 0.05, f64::from(i) * 10.0, 100.0 - f64::from(i) * 10.0))
            .collect();
        let target = TargetSpec {
            position: crate::Vec2f::new(60.0, 0.0),
            radius_m: 45.0,
        };
        Trajectory::seal(samples, sample(0.5, 100.0, 0.0), Some(target))
    }

    #[test]
    fn sealing_an_empty_run_keeps_the_touchdown() {
        let traj = Trajectory::seal(Vec::new(), sample(0.0, 0.0, 0.0), None);
        assert_eq!(traj.len(), 1);
        assert!(traj.touchdown().target.is_none());
    }

    #[test]
    fn touchdown_mirrors_last_sample() {
        let traj = straight_run();
        let td = traj.touchdown();
        assert_eq!(td.position, Vec2d::new(100.0, 0.0));
        assert!((td.time_s - 0.5).abs() < 1e-12);
        let outcome = td.target.unwrap();
        assert!((outcome.miss_m - 40.0).abs() < 1e-9);
        assert!(outcome.on_target);
    }

    #[test]
    fn summary_reports_track_and_closest_approach() {
        let summary = straight_run().summary();
        assert!((summary.track_length_m - 100.0).abs() < 1e-9);
        assert_eq!(summary.min_miss_m, Some(0.0));
        assert_eq!(summary.impact_miss_m.map(|m| m.round()), Some(40.0));
    }

    #[test]
    fn decimation_keeps_first_and_last() {
        let traj = straight_run();
        let idx = traj.decimated_indices(0.12);
        assert_eq!(idx.first(), Some(&0));
        assert_eq!(idx.last(), Some(&10));
        // 0.0, 0.15, 0.30, 0.45, then touchdown at 0.5
        assert_eq!(idx, vec![0, 3, 6, 9, 10]);
        assert_eq!(traj.decimated_indices(0.0).len(), traj.len());
    }
}
