//! Placement Module
//!
//! Window placement: centered defaults, edge-snap layouts and keeping
//! windows inside the viewport.

use tracing::debug;

use crate::shared::{Geometry, SnapEdge, Viewport};

/// Placement manager
#[derive(Debug, Clone)]
pub struct PlacementManager {
    /// Size given to windows that have never been placed
    pub default_width: u32,
    pub default_height: u32,
}

impl PlacementManager {
    pub fn new(default_width: u32, default_height: u32) -> Self {
        Self {
            default_width,
            default_height,
        }
    }

    /// Default size, centered and shrunk to fit the viewport
    pub fn centered(&self, viewport: Viewport) -> Geometry {
        let width = self.default_width.min(viewport.width);
        let height = self.default_height.min(viewport.height);
        let geometry = Geometry::new(viewport.max_x(width) / 2, viewport.max_y(height) / 2, width, height);
        debug!("Centered placement: {:?}", geometry);
        geometry
    }

    /// Recenter an existing size
    pub fn recenter(&self, size: Geometry, viewport: Viewport) -> Geometry {
        let width = size.width.min(viewport.width);
        let height = size.height.min(viewport.height);
        Geometry::new(viewport.max_x(width) / 2, viewport.max_y(height) / 2, width, height)
    }
}

impl Default for PlacementManager {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Half-viewport layout for an edge
pub fn snap_geometry(edge: SnapEdge, viewport: Viewport) -> Geometry {
    let half_w = viewport.width / 2;
    let half_h = viewport.height / 2;

    match edge {
        SnapEdge::Left => Geometry::new(0, 0, half_w, viewport.height),
        SnapEdge::Right => Geometry::new(half_w as i32, 0, half_w, viewport.height),
        SnapEdge::Top => Geometry::new(0, 0, viewport.width, half_h),
        SnapEdge::Bottom => Geometry::new(0, half_h as i32, viewport.width, half_h),
    }
}

/// Clamp origin (and size, if larger than the viewport) so the window is fully inside
pub fn constrain(geometry: Geometry, viewport: Viewport) -> Geometry {
    let width = geometry.width.min(viewport.width);
    let height = geometry.height.min(viewport.height);
    Geometry::new(
        geometry.x.clamp(0, viewport.max_x(width)),
        geometry.y.clamp(0, viewport.max_y(height)),
        width,
        height,
    )
}
