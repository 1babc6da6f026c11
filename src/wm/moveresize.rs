//! MoveResize Module
//!
//! Interactive window dragging with edge-snap zone detection.

use tracing::debug;

use crate::shared::{Geometry, SnapEdge, Viewport, WindowId};

/// Edge thresholds for snap zones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapZones {
    /// Distance from an edge that activates its zone
    pub threshold: i32,
    /// Extra offset for the top zone
    pub taskbar_height: i32,
}

impl SnapZones {
    pub fn new(threshold: i32, taskbar_height: i32) -> Self {
        Self {
            threshold,
            taskbar_height,
        }
    }

    /// Zone under the pointer. Checked left, right, top, bottom; first match wins.
    pub fn detect(&self, x: i32, y: i32, viewport: Viewport) -> Option<SnapEdge> {
        let vw = viewport.width as i32;
        let vh = viewport.height as i32;

        if x <= self.threshold {
            Some(SnapEdge::Left)
        } else if x >= vw - self.threshold {
            Some(SnapEdge::Right)
        } else if y <= self.threshold + self.taskbar_height {
            Some(SnapEdge::Top)
        } else if y >= vh - self.threshold {
            Some(SnapEdge::Bottom)
        } else {
            None
        }
    }
}

impl Default for SnapZones {
    fn default() -> Self {
        Self::new(50, 28)
    }
}

/// Drag in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub window: WindowId,

    /// Pointer position at drag start
    pub start_x: i32,
    pub start_y: i32,

    /// Window geometry at drag start
    pub start_geometry: Geometry,

    /// Last computed geometry
    pub current: Geometry,

    /// Active snap zone
    pub zone: Option<SnapEdge>,

    /// Edge the window was snapped to; it leaves it on the first real move
    pub snapped: Option<SnapEdge>,
}

/// Result of a pointer move during a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragUpdate {
    pub geometry: Geometry,
    /// `Some(zone)` when the shown guide changed
    pub zone_changed: Option<Option<SnapEdge>>,
    /// Set on the move that pulls a snapped window off its edge
    pub unsnapped: Option<SnapEdge>,
}

/// Drag released
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragRelease {
    pub window: WindowId,
    pub geometry: Geometry,
    pub zone: Option<SnapEdge>,
}

/// Move/resize manager
#[derive(Debug, Default)]
pub struct MoveResizeManager {
    state: Option<DragState>,
    pub zones: SnapZones,
}

impl MoveResizeManager {
    pub fn new(zones: SnapZones) -> Self {
        Self { state: None, zones }
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    pub fn dragging(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.window.as_str())
    }

    /// Start a move operation
    pub fn start_move(&mut self, window: &str, x: i32, y: i32, geometry: Geometry) {
        self.begin(window, x, y, geometry, None);
    }

    /// Start moving a snapped window from its derived layout. It stays
    /// snapped until the pointer leaves the press position.
    pub fn start_snapped_move(
        &mut self,
        window: &str,
        x: i32,
        y: i32,
        geometry: Geometry,
        edge: SnapEdge,
    ) {
        self.begin(window, x, y, geometry, Some(edge));
    }

    fn begin(&mut self, window: &str, x: i32, y: i32, geometry: Geometry, snapped: Option<SnapEdge>) {
        debug!("Starting move operation for window {}", window);
        self.state = Some(DragState {
            window: window.to_string(),
            start_x: x,
            start_y: y,
            start_geometry: geometry,
            current: geometry,
            zone: None,
            snapped,
        });
    }

    /// New origin is start origin plus pointer delta, clamped into the viewport
    pub fn update(&mut self, x: i32, y: i32, viewport: Viewport) -> Option<DragUpdate> {
        let zones = self.zones;
        let state = self.state.as_mut()?;
        if state.snapped.is_some() && (x, y) == (state.start_x, state.start_y) {
            return None;
        }
        let unsnapped = state.snapped.take();

        let start = state.start_geometry;
        let new_x = (start.x + (x - state.start_x)).clamp(0, viewport.max_x(start.width));
        let new_y = (start.y + (y - state.start_y)).clamp(0, viewport.max_y(start.height));
        state.current = start.with_origin(new_x, new_y);

        let zone = zones.detect(x, y, viewport);
        let zone_changed = if zone != state.zone {
            debug!("Snap zone {:?} -> {:?}", state.zone, zone);
            state.zone = zone;
            Some(zone)
        } else {
            None
        };

        Some(DragUpdate {
            geometry: state.current,
            zone_changed,
            unsnapped,
        })
    }

    /// Finish the drag
    pub fn finish(&mut self) -> Option<DragRelease> {
        let state = self.state.take()?;
        debug!("Finished move of {} (zone {:?})", state.window, state.zone);
        Some(DragRelease {
            window: state.window,
            geometry: state.current,
            zone: state.zone,
        })
    }

    /// Drop a drag on `window` without applying it
    pub fn cancel_for(&mut self, window: &str) -> bool {
        if self.dragging() == Some(window) {
            debug!("Cancelled move of {}", window);
            self.state = None;
            true
        } else {
            false
        }
    }
}
