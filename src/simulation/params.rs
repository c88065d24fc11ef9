//! Physical constants and runtime parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `G`,
//! - base step size and time multiplier bounds,
//! - recent trail capacity

/// Gravitational constant (m^3 kg^-1 s^-2)
pub const G: f64 = 6.67428e-11;
/// Astronomical unit (m)
pub const AU: f64 = 149.6e6 * 1000.0;
/// Simulated seconds per frame at 1x
pub const BASE_TIMESTEP: f64 = 3600.0;
pub const TRAIL_CAPACITY: usize = 150;
pub const MIN_TIME_MULTIPLIER: f64 = 0.1;
pub const MULTIPLIER_FACTOR: f64 = 1.5;
/// Brightness factor of the persistent first-orbit polyline
pub const DIM_FACTOR: f32 = 0.4;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub base_timestep: f64, // seconds per frame at 1x
    pub time_multiplier: f64, // initial multiplier
    pub min_time_multiplier: f64, // clamp floor, strictly positive
    pub multiplier_factor: f64, // up/down scaling step
    pub trail_capacity: usize, // recent trail length
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G,
            base_timestep: BASE_TIMESTEP,
            time_multiplier: 1.0,
            min_time_multiplier: MIN_TIME_MULTIPLIER,
            multiplier_factor: MULTIPLIER_FACTOR,
            trail_capacity: TRAIL_CAPACITY,
        }
    }
}
