//! Deterministic window scenarios
//!
//! Drives the angle calculator and window aggregator directly, closing a
//! window every `window_period` of simulated time. No threads, no clocks.

use std::time::Duration;

use armturn_gesture::{AngleCalculator, BucketBounds, TickOutcome, WindowAggregator};

use crate::ArmSimulator;

/// Summary of one simulated window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowResult {
    pub outcome: TickOutcome,
    /// Frames fed during the window
    pub frames: usize,
    /// Frames whose angles could not be computed
    pub failures: usize,
}

/// Runs an arm simulator through consecutive detection windows
pub struct ScenarioRunner {
    calculator: AngleCalculator,
    aggregator: WindowAggregator,
    window_period: Duration,
}

impl ScenarioRunner {
    pub fn new(bounds: BucketBounds, window_period: Duration) -> Self {
        ScenarioRunner {
            calculator: AngleCalculator::new(),
            aggregator: WindowAggregator::new(bounds),
            window_period,
        }
    }

    /// Default buckets, 2 s windows
    pub fn standard() -> Self {
        Self::new(BucketBounds::default(), Duration::from_millis(2000))
    }

    pub fn aggregator(&self) -> &WindowAggregator {
        &self.aggregator
    }

    /// Feed one window's worth of frames, then close it
    pub fn run_window(&mut self, sim: &mut ArmSimulator) -> WindowResult {
        let frames = sim.frames_for(self.window_period);
        let mut failures = 0;

        for frame in &frames {
            for body in frame.tracked_bodies() {
                match self.calculator.compute(&body.skeleton) {
                    Ok(angles) => {
                        self.aggregator.observe_angles(&angles);
                    }
                    Err(_) => failures += 1,
                }
            }
        }

        WindowResult {
            outcome: self.aggregator.tick(),
            frames: frames.len(),
            failures,
        }
    }

    /// Run several windows, returning each detection result
    pub fn run(&mut self, sim: &mut ArmSimulator, windows: usize) -> Vec<bool> {
        (0..windows)
            .map(|_| self.run_window(sim).outcome.detected)
            .collect()
    }
}
