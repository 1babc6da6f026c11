//! Stacking Module
//!
//! Z-order assignment. Raising gives a window the current maximum plus one,
//! so the most recently focused window is always on top.

use tracing::debug;

/// Stacking manager
#[derive(Debug, Clone)]
pub struct StackingManager {
    /// Highest z-order handed out so far
    top: i64,
}

impl StackingManager {
    /// Start counting from `initial_z`
    pub fn new(initial_z: i64) -> Self {
        Self { top: initial_z }
    }

    pub fn top(&self) -> i64 {
        self.top
    }

    /// Next z-order above every window
    pub fn raise(&mut self, id: &str) -> i64 {
        self.top += 1;
        debug!("Raising window {} to z={}", id, self.top);
        self.top
    }
}

impl Default for StackingManager {
    fn default() -> Self {
        Self::new(100)
    }
}
