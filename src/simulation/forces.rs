//! Gravitational force field for the planet simulation
//!
//! Direct pairwise Newtonian gravity without softening: the bodies are
//! validated at construction never to coincide, so `dist > 0` holds.

use crate::simulation::states::{Body, NVec2};

/// Result of evaluating the field on a single target body
#[derive(Debug, Clone, Copy)]
pub struct ForceSample {
    pub acceleration: NVec2,
    /// Distance to the fixed anchor, if the anchor is among the other bodies
    pub distance_to_anchor: Option<f64>,
}

/// 2D Newtonian gravity, direct n^2 sum
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl NewtonianGravity {
    /// Total gravitational acceleration on `bodies[target]` from every other body
    pub fn acceleration_on(&self, bodies: &[Body], target: usize) -> ForceSample {
        let bt = &bodies[target];
        let mut total_force = NVec2::zeros();
        let mut distance_to_anchor = None;

        for (j, bj) in bodies.iter().enumerate() {
            // skip self by index, never by address
            if j == target {
                continue;
            }

            // delta points from the target towards j
            let delta = bj.x - bt.x;
            let dist = delta.norm();

            if bj.is_fixed {
                distance_to_anchor = Some(dist);
            }

            let force_mag = self.G * bt.m * bj.m / (dist * dist);
            total_force += (delta / dist) * force_mag;
        }

        ForceSample {
            acceleration: total_force / bt.m,
            distance_to_anchor,
        }
    }

    /// Recompute `a` and `distance_to_anchor` for every non-fixed body
    ///
    /// All samples are taken from the current positions before any body is written.
    pub fn accumulate_accels(&self, bodies: &mut [Body]) {
        let positions: &[Body] = bodies;
        let samples: Vec<Option<ForceSample>> = (0..positions.len())
            .map(|i| (!positions[i].is_fixed).then(|| self.acceleration_on(positions, i)))
            .collect();

        for (b, sample) in bodies.iter_mut().zip(samples) {
            if let Some(s) = sample {
                b.a = s.acceleration;
                if let Some(d) = s.distance_to_anchor {
                    b.distance_to_anchor = d;
                }
            }
        }
    }

    /// Total gravitational potential energy over all unordered pairs (J)
    pub fn potential_energy(&self, bodies: &[Body]) -> f64 {
        let n = bodies.len();
        let mut pe = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let r = (bodies[j].x - bodies[i].x).norm();
                pe -= self.G * bodies[i].m * bodies[j].m / r;
            }
        }
        pe
    }
}
