//! Build validated initial conditions from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing, astronomical units) and produces
//! the runtime body list in SI units, anchor first, then the planets in
//! table order. Degenerate configurations are rejected here so that the
//! integrator never sees a singular force or a NaN.

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::params::{Parameters, AU};
use crate::simulation::states::{Body, NVec2};

const KM: f64 = 1000.0;

/// Convert the configured table into bodies, without validation
pub fn build_bodies(cfg: &ScenarioConfig) -> Vec<Body> {
    let anchor_pos = NVec2::zeros();
    let trail_capacity = cfg.parameters.trail_capacity;

    let mut bodies = Vec::with_capacity(cfg.bodies.len() + 1);
    bodies.push(Body::anchor(
        cfg.anchor.name.clone(),
        cfg.anchor.color,
        anchor_pos,
        cfg.anchor.mass,
        cfg.anchor.radius_km * KM,
    ));

    // Planets start on the +x axis moving along +y (counter-clockwise)
    bodies.extend(cfg.bodies.iter().map(|bc: &BodyConfig| {
        Body::planet(
            bc.name.clone(),
            bc.color,
            anchor_pos + NVec2::new(bc.dist_au * AU, 0.0),
            NVec2::new(0.0, bc.speed_kms * KM),
            bc.mass,
            bc.radius_km * KM,
            trail_capacity,
        )
    }));

    bodies
}

/// Check the physical preconditions the integrator relies on
pub fn validate_bodies(bodies: &[Body]) -> SimResult<()> {
    let anchors = bodies.iter().filter(|b| b.is_fixed).count();
    match anchors {
        0 => return Err(SimError::NoAnchor),
        1 => {}
        n => return Err(SimError::MultipleAnchors(n)),
    }

    for b in bodies {
        let finite = [
            ("position", b.x.iter().all(|c| c.is_finite())),
            ("velocity", b.v.iter().all(|c| c.is_finite())),
            ("mass", b.m.is_finite()),
            ("radius", b.radius.is_finite()),
        ];
        for (field, ok) in finite {
            if !ok {
                return Err(SimError::NonFiniteValue {
                    name: b.name.clone(),
                    field,
                });
            }
        }
        if b.m <= 0.0 {
            return Err(SimError::NonPositiveMass {
                name: b.name.clone(),
                mass: b.m,
            });
        }
        if b.radius <= 0.0 {
            return Err(SimError::NonPositiveRadius {
                name: b.name.clone(),
                radius: b.radius,
            });
        }
    }

    // Any coincident pair makes 1 / dist^2 blow up
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if bodies[i].x == bodies[j].x {
                return Err(SimError::CoincidentBodies {
                    first: bodies[i].name.clone(),
                    second: bodies[j].name.clone(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_parameters(p: &Parameters) -> SimResult<()> {
    if !(p.G.is_finite() && p.G > 0.0) {
        return Err(SimError::Config(format!("G must be positive, got {}", p.G)));
    }
    if !(p.base_timestep.is_finite() && p.base_timestep > 0.0) {
        return Err(SimError::NonPositiveTimestep(p.base_timestep));
    }
    if !(p.min_time_multiplier.is_finite() && p.min_time_multiplier > 0.0) {
        return Err(SimError::Config(format!(
            "min_time_multiplier must be positive, got {}",
            p.min_time_multiplier
        )));
    }
    if !(p.multiplier_factor.is_finite() && p.multiplier_factor > 1.0) {
        return Err(SimError::Config(format!(
            "multiplier_factor must be greater than 1, got {}",
            p.multiplier_factor
        )));
    }
    Ok(())
}
