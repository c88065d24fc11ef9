//! Simulated-time control owned by the presentation layer
//!
//! The world only ever sees the resulting `dt`; the multiplier lives here so
//! a viewer or a CLI flag can scale it without touching simulation state.

use log::warn;

use super::params::Parameters;

#[derive(Debug, Clone)]
pub struct TimeControl {
    base_timestep: f64,
    multiplier: f64,
    min_multiplier: f64,
    factor: f64,
}

impl TimeControl {
    pub fn new(params: &Parameters) -> Self {
        let mut control = Self {
            base_timestep: params.base_timestep,
            multiplier: 1.0,
            min_multiplier: params.min_time_multiplier,
            factor: params.multiplier_factor,
        };
        control.set_multiplier(params.time_multiplier);
        control
    }

    /// Seconds of simulated time for the next frame, always `> 0`
    pub fn dt(&self) -> f64 {
        self.base_timestep * self.multiplier
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Set the multiplier, clamped to the floor (non-finite input lands on the floor)
    pub fn set_multiplier(&mut self, multiplier: f64) {
        if !multiplier.is_finite() || multiplier < self.min_multiplier {
            warn!(
                "time multiplier {} below floor, clamped to {}",
                multiplier, self.min_multiplier
            );
            self.multiplier = self.min_multiplier;
        } else {
            self.multiplier = multiplier;
        }
    }

    pub fn speed_up(&mut self) {
        self.set_multiplier(self.multiplier * self.factor);
    }

    pub fn slow_down(&mut self) {
        self.set_multiplier(self.multiplier / self.factor);
    }
}
