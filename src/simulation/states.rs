//! Core state types for the planet simulation.
//!
//! Defines the 2D body and the per-body trail history:
//! - `Body` holds kinematic state, mass, radius and display metadata
//! - `TrailHistory` holds the bounded recent trail and the first-orbit trace
//!
//! Only non-fixed bodies own a trail; the anchor exerts gravity but never moves.

use std::collections::VecDeque;

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// RGB colour carried through for the renderer, never read by the physics
pub type Rgb = [u8; 3];

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String, // display name
    pub color: Rgb, // display colour
    pub x: NVec2, // position (m)
    pub v: NVec2, // velocity (m/s)
    pub a: NVec2, // acceleration (m/s^2) from the positions at the start of the step
    pub m: f64, // mass (kg)
    pub radius: f64, // physical radius (m)
    pub is_fixed: bool, // anchor flag, excluded from integration
    pub distance_to_anchor: f64, // refreshed by every force evaluation
    pub trail: Option<TrailHistory>, // None for the anchor
}

impl Body {
    /// Create the fixed anchor at `x` with zero velocity
    pub fn anchor(name: impl Into<String>, color: Rgb, x: NVec2, m: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            color,
            x,
            v: NVec2::zeros(),
            a: NVec2::zeros(),
            m,
            radius,
            is_fixed: true,
            distance_to_anchor: 0.0,
            trail: None,
        }
    }

    /// Create a free body that records a trail of at most `trail_capacity` points
    pub fn planet(
        name: impl Into<String>,
        color: Rgb,
        x: NVec2,
        v: NVec2,
        m: f64,
        radius: f64,
        trail_capacity: usize,
    ) -> Self {
        Self {
            name: name.into(),
            color,
            x,
            v,
            a: NVec2::zeros(),
            m,
            radius,
            is_fixed: false,
            distance_to_anchor: 0.0,
            trail: Some(TrailHistory::new(trail_capacity, x.y)),
        }
    }

    /// Whether this body has swept through its first full orbit (always false for the anchor)
    pub fn orbit_completed(&self) -> bool {
        self.trail.as_ref().is_some_and(|t| t.orbit_completed)
    }

    /// Colour used for the persistent first-orbit polyline
    pub fn dimmed_color(&self, factor: f32) -> Rgb {
        self.color.map(|c| (c as f32 * factor) as u8)
    }
}

/// Trail bookkeeping owned by each non-fixed body
#[derive(Debug, Clone)]
pub struct TrailHistory {
    pub recent: VecDeque<NVec2>, // most recent positions, oldest first
    pub capacity: usize, // max length of `recent`
    pub full_first_orbit: Vec<NVec2>, // every position until the first orbit closes
    pub orbit_completed: bool, // flips to true once, never back
    pub last_y: f64, // y of the previous tick
}

impl TrailHistory {
    pub fn new(capacity: usize, initial_y: f64) -> Self {
        Self {
            recent: VecDeque::with_capacity(capacity + 1),
            capacity,
            full_first_orbit: Vec::new(),
            orbit_completed: false,
            last_y: initial_y,
        }
    }
}
