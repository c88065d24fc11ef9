//! Fixed-step velocity-Verlet integrator for the planet simulation
//!
//! The step runs as three passes over the whole body set: drift every free
//! body, re-evaluate the field, then finish every velocity. The passes must
//! never be fused per body, or bodies later in the list would feel forces from
//! a half-updated configuration.

use super::forces::NewtonianGravity;
use super::states::{Body, NVec2};

/// Advance all non-fixed bodies by one step of `dt` seconds
///
/// Expects `b.a` to already hold the acceleration at the current positions
/// (the world primes it at construction). Returns the indices of bodies whose
/// first orbit closed during this step.
pub fn verlet_integrator(bodies: &mut [Body], gravity: &NewtonianGravity, dt: f64) -> Vec<usize> {
    if bodies.is_empty() { // no bodies, return
        return Vec::new();
    }

    let dt2 = dt * dt;

    // Snapshot a_n for every body before anything moves
    let a_old: Vec<NVec2> = bodies.iter().map(|b| b.a).collect();

    // Position pass: x_n+1 = x_n + v_n dt + 1/2 a_n dt^2, then record the trail
    let mut completed = Vec::new();
    for (i, b) in bodies.iter_mut().enumerate() {
        if b.is_fixed {
            continue;
        }
        b.x += b.v * dt + 0.5 * b.a * dt2;

        if let Some(trail) = b.trail.as_mut() {
            if trail.record(b.x) {
                completed.push(i);
            }
        }
    }

    // Force pass: a_n+1 from the fully updated positions x_n+1
    gravity.accumulate_accels(bodies);

    // Velocity pass: v_n+1 = v_n + 1/2 (a_n + a_n+1) dt
    for (b, a) in bodies.iter_mut().zip(a_old.iter()) {
        if b.is_fixed {
            continue;
        }
        b.v += 0.5 * (*a + b.a) * dt;
    }

    completed
}
