//! The simulation world: the only owner of body state
//!
//! A renderer or CLI drives it with `step(dt)` once per frame and reads it
//! back through [`SimulationWorld::views`]; nothing outside this module
//! mutates a body.

use std::collections::VecDeque;

use log::{debug, info};

use crate::configuration::config::ScenarioConfig;
use crate::error::{SimError, SimResult};
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::verlet_integrator;
use crate::simulation::params::{Parameters, AU};
use crate::simulation::scenario::{build_bodies, validate_bodies, validate_parameters};
use crate::simulation::states::{Body, NVec2, Rgb};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Read-only view of one body for the presentation layer
#[derive(Debug, Clone, Copy)]
pub struct BodyView<'a> {
    pub name: &'a str,
    pub color: Rgb,
    pub position: NVec2,
    /// Trail data, present for every body except the anchor
    pub planet: Option<PlanetView<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct PlanetView<'a> {
    pub distance_to_anchor: f64,
    pub recent_trail: &'a VecDeque<NVec2>,
    pub full_first_orbit: &'a [NVec2],
    pub orbit_completed: bool,
}

impl PlanetView<'_> {
    /// Distance label, e.g. `"1.00 AU"`
    pub fn distance_label(&self) -> String {
        format!("{:.2} AU", self.distance_to_anchor / AU)
    }
}

#[derive(Debug, Clone)]
pub struct SimulationWorld {
    bodies: Vec<Body>,
    initial: Vec<Body>, // static initial conditions, used by `restart`
    gravity: NewtonianGravity,
    parameters: Parameters,
    t: f64, // simulated seconds since start
    steps: u64,
}

impl SimulationWorld {
    /// Validate `bodies` and prime their accelerations
    pub fn new(bodies: Vec<Body>, parameters: Parameters) -> SimResult<Self> {
        validate_parameters(&parameters)?;
        validate_bodies(&bodies)?;

        let mut world = Self {
            initial: bodies.clone(),
            bodies,
            gravity: NewtonianGravity { G: parameters.G },
            parameters,
            t: 0.0,
            steps: 0,
        };
        world.prime();

        debug!("world created with {} bodies", world.bodies.len());
        Ok(world)
    }

    pub fn from_config(cfg: &ScenarioConfig) -> SimResult<Self> {
        Self::new(build_bodies(cfg), Parameters::from(&cfg.parameters))
    }

    // The first step's "old" acceleration must come from the initial positions
    fn prime(&mut self) {
        self.gravity.accumulate_accels(&mut self.bodies);
    }

    /// Advance every free body by `dt` simulated seconds
    ///
    /// A non-positive or non-finite `dt` is rejected before any state changes.
    pub fn step(&mut self, dt: f64) -> SimResult<()> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::NonPositiveTimestep(dt));
        }

        let completed = verlet_integrator(&mut self.bodies, &self.gravity, dt);
        self.t += dt;
        self.steps += 1;

        for i in completed {
            let b = &self.bodies[i];
            info!(
                "{} completed its first orbit after {:.1} days ({} points)",
                b.name,
                self.t / SECONDS_PER_DAY,
                b.trail.as_ref().map_or(0, |t| t.full_first_orbit.len())
            );
        }
        Ok(())
    }

    /// Rebuild all bodies and trails from the initial conditions
    pub fn restart(&mut self) {
        self.bodies = self.initial.clone();
        self.t = 0.0;
        self.steps = 0;
        self.prime();
        debug!("world restarted");
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, i: usize) -> Option<&Body> {
        self.bodies.get(i)
    }

    /// Index lookup by display name
    pub fn find(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.name == name)
    }

    pub fn anchor(&self) -> &Body {
        // validated at construction: exactly one fixed body exists
        &self.bodies[self.anchor_index()]
    }

    fn anchor_index(&self) -> usize {
        self.bodies.iter().position(|b| b.is_fixed).unwrap_or(0)
    }

    pub fn views(&self) -> impl Iterator<Item = BodyView<'_>> + '_ {
        self.bodies.iter().map(|b| BodyView {
            name: &b.name,
            color: b.color,
            position: b.x,
            planet: b.trail.as_ref().map(|t| PlanetView {
                distance_to_anchor: b.distance_to_anchor,
                recent_trail: &t.recent,
                full_first_orbit: &t.full_first_orbit,
                orbit_completed: t.orbit_completed,
            }),
        })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Simulated seconds since start or last restart
    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.m * b.v.norm_squared())
            .sum()
    }

    pub fn potential_energy(&self) -> f64 {
        self.gravity.potential_energy(&self.bodies)
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// z-component of the total angular momentum about the origin
    pub fn angular_momentum(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| b.m * (b.x.x * b.v.y - b.x.y * b.v.x))
            .sum()
    }
}
