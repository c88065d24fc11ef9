//! Trail tracking and first-orbit detection
//!
//! Called once per free body per tick, right after its position update.

use super::states::{NVec2, TrailHistory};

impl TrailHistory {
    /// Record a freshly integrated position
    ///
    /// Returns `true` on the tick the first orbit closes, so the caller can
    /// report it. The closing position is the last one kept in `full_first_orbit`.
    pub fn record(&mut self, pos: NVec2) -> bool {
        // Recent trail: strict FIFO at `capacity`
        self.recent.push_back(pos);
        while self.recent.len() > self.capacity {
            self.recent.pop_front();
        }

        let mut just_completed = false;
        if !self.orbit_completed {
            // upward crossing of the x-axis on the positive-x side
            if self.last_y < 0.0 && pos.y >= 0.0 && pos.x > 0.0 {
                self.orbit_completed = true;
                just_completed = true;
            }
            self.full_first_orbit.push(pos);
        }

        // Refreshed even after completion
        self.last_y = pos.y;

        just_completed
    }

    /// Number of positions currently in the recent trail
    pub fn recent_len(&self) -> usize {
        self.recent.len()
    }
}
