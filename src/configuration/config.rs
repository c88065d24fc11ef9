//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constant, time stepping and trail settings
//! - [`AnchorConfig`]     – the fixed central body
//! - [`BodyConfig`]       – initial orbital parameters for each planet
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! # YAML format
//! Every section is optional; missing parts fall back to the Sun and the
//! eight planets with the original constants.
//!
//! ```yaml
//! parameters:
//!   G: 6.67428e-11          # gravitational constant
//!   base_timestep: 3600.0   # simulated seconds per frame at 1x
//!   time_multiplier: 1.0
//!   min_time_multiplier: 0.1
//!   multiplier_factor: 1.5
//!   trail_capacity: 150
//!
//! anchor:
//!   name: Sun
//!   color: [255, 204, 0]
//!   mass: 1.98892e30        # kg
//!   radius_km: 696340
//!
//! bodies:
//!   - name: Earth
//!     color: [0, 102, 255]
//!     mass: 5.97e24         # kg
//!     radius_km: 6371
//!     dist_au: 1.0          # initial distance from the anchor
//!     speed_kms: 29.8       # initial tangential speed
//! ```
//!
//! Units are converted to SI when the world is built.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::SimResult;
use crate::simulation::params::{
    Parameters, BASE_TIMESTEP, G, MIN_TIME_MULTIPLIER, MULTIPLIER_FACTOR, TRAIL_CAPACITY,
};
use crate::simulation::states::Rgb;

/// Global numerical and physical parameters
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    pub base_timestep: f64, // seconds per frame at 1x
    pub time_multiplier: f64, // starting multiplier
    pub min_time_multiplier: f64, // multiplier floor
    pub multiplier_factor: f64, // step used by speed up / slow down
    pub trail_capacity: usize, // points kept in the recent trail
}

impl Default for ParametersConfig {
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

impl From<&ParametersConfig> for Parameters {
    fn from(p: &ParametersConfig) -> Self {
        Parameters {
            G: p.G,
            base_timestep: p.base_timestep,
            time_multiplier: p.time_multiplier,
            min_time_multiplier: p.min_time_multiplier,
            multiplier_factor: p.multiplier_factor,
            trail_capacity: p.trail_capacity,
        }
    }
}

/// The fixed body at the origin
#[derive(Deserialize, Debug, Clone)]
pub struct AnchorConfig {
    pub name: String,
    pub color: Rgb,
    pub mass: f64, // kg
    pub radius_km: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            name: "Sun".to_string(),
            color: [255, 204, 0],
            mass: 1.98892e30,
            radius_km: 696_340.0,
        }
    }
}

/// Initial orbital parameters for a single planet
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub color: Rgb,
    pub mass: f64, // kg
    pub radius_km: f64, // physical radius
    pub dist_au: f64, // initial distance from the anchor along +x
    pub speed_kms: f64, // initial speed along +y
}

impl BodyConfig {
    fn new(name: &str, color: Rgb, mass: f64, radius_km: f64, dist_au: f64, speed_kms: f64) -> Self {
        Self {
            name: name.to_string(),
            color,
            mass,
            radius_km,
            dist_au,
            speed_kms,
        }
    }
}

/// The eight planets of the solar system
pub fn solar_system_bodies() -> Vec<BodyConfig> {
    vec![
        BodyConfig::new("Mercury", [255, 204, 153], 0.33e24, 2439.0, 0.4, 47.4),
        BodyConfig::new("Venus", [255, 153, 153], 4.87e24, 6051.0, 0.7, 35.0),
        BodyConfig::new("Earth", [0, 102, 255], 5.97e24, 6371.0, 1.0, 29.8),
        BodyConfig::new("Mars", [255, 102, 0], 0.642e24, 3389.0, 1.5, 24.0),
        BodyConfig::new("Jupiter", [204, 153, 0], 1898e24, 69911.0, 5.2, 13.1),
        BodyConfig::new("Saturn", [255, 255, 204], 568e24, 58232.0, 9.5, 9.7),
        BodyConfig::new("Uranus", [0, 153, 255], 86.8e24, 25362.0, 19.8, 6.8),
        BodyConfig::new("Neptune", [102, 153, 255], 102e24, 24622.0, 30.0, 5.4),
    ]
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // physical and numerical parameters
    pub anchor: AnchorConfig, // the fixed central body
    pub bodies: Vec<BodyConfig>, // planets, in creation order
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            parameters: ParametersConfig::default(),
            anchor: AnchorConfig::default(),
            bodies: solar_system_bodies(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_file(path: &Path) -> SimResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}
