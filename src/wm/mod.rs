//! Window Manager Module
//!
//! Window lifecycle, focus, stacking, dragging and Alt+Tab cycling for the
//! simulated desktop. Every state change is queued as a [`WmEvent`] for the
//! shell to forward to the surface.

pub mod client;
pub mod cycle;
pub mod focus;
pub mod keyboard;
pub mod moveresize;
pub mod placement;
pub mod registry;
pub mod stacking;

use thiserror::Error;
use tracing::{debug, info, warn};
use webtop_ipc::{TransitionKind, WindowInfo, WmEvent};

use crate::config::{ClosePolicy, Config, CycleMinimized};
use crate::shared::{Geometry, SnapEdge, Viewport, WindowId, WindowKind, WindowState};
use crate::wm::client::Client;
use crate::wm::cycle::{CycleDirection, CycleEntry, CycleManager};
use crate::wm::focus::{FocusManager, FocusSource};
use crate::wm::moveresize::{MoveResizeManager, SnapZones};
use crate::wm::placement::PlacementManager;
use crate::wm::registry::{WindowRegistry, WindowSpec};
use crate::wm::stacking::StackingManager;

/// Window manager errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WmError {
    #[error("unknown window: {0}")]
    UnknownWindow(WindowId),
}

pub type WmResult<T> = Result<T, WmError>;

/// Policies taken from configuration
#[derive(Debug, Clone, Copy)]
struct Policies {
    close: ClosePolicy,
    cycle_minimized: CycleMinimized,
    transition_ms: u64,
}

pub struct WindowManager {
    registry: WindowRegistry,
    focus: FocusManager,
    stacking: StackingManager,
    moveresize: MoveResizeManager,
    cycle: CycleManager,
    placement: PlacementManager,
    viewport: Viewport,
    policies: Policies,
    events: Vec<WmEvent>,
}

fn lookup_mut<'a>(registry: &'a mut WindowRegistry, id: &str) -> WmResult<&'a mut Client> {
    registry
        .get_mut(id)
        .ok_or_else(|| WmError::UnknownWindow(id.to_string()))
}

fn geometry_event(id: &str, g: Geometry) -> WmEvent {
    WmEvent::WindowGeometryChanged {
        id: id.to_string(),
        x: g.x,
        y: g.y,
        width: g.width,
        height: g.height,
    }
}

fn state_event(id: &str, state: WindowState) -> WmEvent {
    WmEvent::WindowStateChanged {
        id: id.to_string(),
        state,
    }
}

impl WindowManager {
    /// Create a window manager and register the configured windows
    pub fn new(config: &Config) -> Self {
        let wm_config = &config.window_manager;
        let viewport = Viewport::new(config.viewport.width, config.viewport.height);

        let mut wm = Self {
            registry: WindowRegistry::new(),
            focus: FocusManager::new(),
            stacking: StackingManager::new(wm_config.initial_z),
            moveresize: MoveResizeManager::new(SnapZones::new(
                wm_config.snap_threshold,
                config.viewport.taskbar_height,
            )),
            cycle: CycleManager::new(),
            placement: PlacementManager::new(wm_config.default_width, wm_config.default_height),
            viewport,
            policies: Policies {
                close: wm_config.close_policy,
                cycle_minimized: wm_config.cycle_minimized,
                transition_ms: wm_config.transition_ms,
            },
            events: Vec::new(),
        };

        for window in &config.windows {
            wm.register(WindowSpec::new(window.id.clone(), window.kind, window.title.clone()));
        }

        info!(
            "Window manager ready: {} windows, viewport {}x{}",
            wm.registry.len(),
            viewport.width,
            viewport.height
        );
        wm
    }

    pub fn register(&mut self, spec: WindowSpec) -> bool {
        self.registry.register(spec)
    }

    /// Id of the window for a dynamic kind, created on first use
    pub fn ensure_dynamic(&mut self, kind: WindowKind) -> WindowId {
        self.registry.ensure_dynamic(kind)
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.registry.get(id)
    }

    pub fn find_kind(&self, kind: WindowKind) -> Option<&Client> {
        self.registry.find_kind(kind)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    pub fn active_window(&self) -> Option<&Client> {
        self.focus.focused().and_then(|id| self.registry.get(id))
    }

    /// Window whose command table applies. When the terminal itself is
    /// active, the topmost shown non-terminal window.
    pub fn context_window(&self) -> Option<&Client> {
        let active = self.active_window()?;
        if active.kind != WindowKind::Terminal {
            return Some(active);
        }
        self.registry
            .iter()
            .filter(|c| c.kind != WindowKind::Terminal && c.state.is_shown())
            .max_by_key(|c| c.z_order)
    }

    pub fn is_dragging(&self) -> bool {
        self.moveresize.is_dragging()
    }

    /// Take queued events
    pub fn drain_events(&mut self) -> Vec<WmEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: WmEvent) {
        debug!("WM event: {:?}", event);
        self.events.push(event);
    }

    fn schedule(&mut self, id: &str, kind: TransitionKind, generation: u64) {
        let delay_ms = self.policies.transition_ms;
        self.emit(WmEvent::TransitionScheduled {
            id: id.to_string(),
            transition: kind,
            generation,
            delay_ms,
        });
    }

    /// Cancel a drag on `id`, hiding any snap guide
    fn cancel_drag(&mut self, id: &str) {
        if self.moveresize.cancel_for(id) {
            self.emit(WmEvent::SnapGuide { edge: None });
            self.emit(WmEvent::WindowDragEnded { id: id.to_string() });
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Closed or minimized → shown. Idempotent for shown windows.
    pub fn open(&mut self, id: &str) -> WmResult<()> {
        let viewport = self.viewport;
        let client = lookup_mut(&mut self.registry, id)?;

        match client.state {
            WindowState::Closed => {
                let geometry = match (self.policies.close, client.floating) {
                    (ClosePolicy::Recoverable, Some(g)) => placement::constrain(g, viewport),
                    _ => self.placement.centered(viewport),
                };
                client.floating = Some(geometry);
                client.state = WindowState::Normal;
                let generation = client.begin_transition(TransitionKind::Opening);
                let (kind, title) = (client.kind, client.title.clone());

                info!("Opened window {} at {:?}", id, geometry);
                self.emit(WmEvent::WindowOpened {
                    id: id.to_string(),
                    kind: kind.as_str().to_string(),
                    title,
                });
                self.emit(state_event(id, WindowState::Normal));
                self.emit(geometry_event(id, geometry));
                self.schedule(id, TransitionKind::Opening, generation);
            }
            WindowState::Minimized => {
                let state = client.pre_minimize;
                client.state = state;
                let generation = client.begin_transition(TransitionKind::Opening);

                info!("Restored window {} to {:?}", id, state);
                self.emit(state_event(id, state));
                self.schedule(id, TransitionKind::Opening, generation);
            }
            _ => debug!("Window {} already open", id),
        }
        Ok(())
    }

    /// Any state → closed. Clears focus, drag and cycle references.
    pub fn close(&mut self, id: &str) -> WmResult<()> {
        let client = lookup_mut(&mut self.registry, id)?;
        if client.state == WindowState::Closed {
            debug!("Window {} already closed", id);
            return Ok(());
        }

        client.state = WindowState::Closed;
        if self.policies.close == ClosePolicy::Fresh {
            client.floating = None;
            client.restore_geometry = None;
        }
        let generation = client.begin_transition(TransitionKind::Closing);
        info!("Closed window {}", id);

        self.cancel_drag(id);
        self.cycle.forget(id);
        if self.focus.clear_if(id) {
            self.emit(WmEvent::FocusChanged { active: None });
        }
        self.emit(WmEvent::WindowClosed { id: id.to_string() });
        self.emit(state_event(id, WindowState::Closed));
        self.schedule(id, TransitionKind::Closing, generation);
        Ok(())
    }

    /// Shown → minimized. The taskbar entry stays.
    pub fn minimize(&mut self, id: &str) -> WmResult<()> {
        let client = lookup_mut(&mut self.registry, id)?;
        if !client.state.is_shown() {
            debug!("Window {} not shown, nothing to minimize", id);
            return Ok(());
        }

        client.pre_minimize = client.state;
        client.state = WindowState::Minimized;
        let generation = client.begin_transition(TransitionKind::Minimizing);
        info!("Minimized window {}", id);

        self.cancel_drag(id);
        if self.focus.clear_if(id) {
            self.emit(WmEvent::FocusChanged { active: None });
        }
        self.emit(WmEvent::WindowMinimized { id: id.to_string() });
        self.emit(state_event(id, WindowState::Minimized));
        self.schedule(id, TransitionKind::Minimizing, generation);
        Ok(())
    }

    /// Normal/snapped ↔ maximized. Restoring recalls the snapshot taken on
    /// maximize, or recenters when there is none.
    pub fn toggle_maximize(&mut self, id: &str) -> WmResult<()> {
        let viewport = self.viewport;
        let client = lookup_mut(&mut self.registry, id)?;

        match client.state {
            WindowState::Closed | WindowState::Minimized => {
                debug!("Window {} not shown, ignoring maximize", id);
                Ok(())
            }
            WindowState::Maximized => {
                let geometry = match client.restore_geometry.take() {
                    Some(snapshot) => placement::constrain(snapshot, viewport),
                    None => {
                        let size = client
                            .floating
                            .unwrap_or_else(|| self.placement.centered(viewport));
                        self.placement.recenter(size, viewport)
                    }
                };
                client.floating = Some(geometry);
                client.state = WindowState::Normal;

                info!("Unmaximized window {} to {:?}", id, geometry);
                self.emit(state_event(id, WindowState::Normal));
                self.emit(geometry_event(id, geometry));
                Ok(())
            }
            WindowState::Normal | WindowState::Snapped(_) => {
                client.restore_geometry = client.geometry(viewport);
                client.state = WindowState::Maximized;

                info!("Maximized window {}", id);
                self.cancel_drag(id);
                self.emit(state_event(id, WindowState::Maximized));
                Ok(())
            }
        }
    }

    /// Snap to a half-viewport layout, leaving maximized state if needed
    pub fn snap(&mut self, id: &str, edge: SnapEdge) -> WmResult<()> {
        let viewport = self.viewport;
        let client = lookup_mut(&mut self.registry, id)?;
        if !client.state.is_shown() {
            debug!("Window {} not shown, ignoring snap", id);
            return Ok(());
        }

        if client.state == WindowState::Maximized {
            client.restore_geometry = None;
        }
        client.state = WindowState::Snapped(edge);
        let geometry = placement::snap_geometry(edge, viewport);

        info!("Snapped window {} to {:?}", id, edge);
        self.cancel_drag(id);
        self.emit(state_event(id, WindowState::Snapped(edge)));
        self.emit(geometry_event(id, geometry));
        Ok(())
    }

    /// Make `id` the single active window on top of the stack. Minimized
    /// windows are restored first.
    pub fn focus(&mut self, id: &str, source: FocusSource) -> WmResult<()> {
        let state = lookup_mut(&mut self.registry, id)?.state;
        match state {
            WindowState::Closed => {
                warn!("Refusing to focus closed window {}", id);
                return Ok(());
            }
            WindowState::Minimized => {
                self.open(id)?;
            }
            _ => {}
        }

        let top = self.stacking.top();
        let client = lookup_mut(&mut self.registry, id)?;
        if !(self.focus.is_focused(id) && client.z_order == top) {
            let z_order = self.stacking.raise(id);
            client.z_order = z_order;
            self.emit(WmEvent::WindowRaised {
                id: id.to_string(),
                z_order,
            });
        }

        if self.focus.set_focus(id, source) {
            self.emit(WmEvent::FocusChanged {
                active: Some(id.to_string()),
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Drag & snap
    // ------------------------------------------------------------------

    /// Start dragging by the header. Ignored for maximized or hidden windows.
    pub fn begin_drag(&mut self, id: &str, x: i32, y: i32) -> WmResult<()> {
        let viewport = self.viewport;
        let client = lookup_mut(&mut self.registry, id)?;

        match client.state {
            WindowState::Normal => {
                let Some(geometry) = client.floating else {
                    return Ok(());
                };
                self.moveresize.start_move(id, x, y, geometry);
            }
            WindowState::Snapped(edge) => {
                let derived = placement::snap_geometry(edge, viewport);
                self.moveresize.start_snapped_move(id, x, y, derived, edge);
            }
            WindowState::Maximized | WindowState::Minimized | WindowState::Closed => {
                debug!("Window {} cannot be dragged in state {:?}", id, client.state);
                return Ok(());
            }
        }

        self.emit(WmEvent::WindowDragStarted { id: id.to_string() });
        Ok(())
    }

    /// Pointer moved; no-op without a drag in progress
    pub fn update_drag(&mut self, x: i32, y: i32) {
        let Some(update) = self.moveresize.update(x, y, self.viewport) else {
            return;
        };
        let Some(id) = self.moveresize.dragging().map(str::to_string) else {
            return;
        };

        if let Some(client) = self.registry.get_mut(&id) {
            client.floating = Some(update.geometry);
            if let Some(edge) = update.unsnapped {
                debug!("Window {} pulled off {:?} edge", id, edge);
                client.state = WindowState::Normal;
            }
        }
        if update.unsnapped.is_some() {
            self.emit(state_event(&id, WindowState::Normal));
        }
        self.emit(geometry_event(&id, update.geometry));
        if let Some(edge) = update.zone_changed {
            self.emit(WmEvent::SnapGuide { edge });
        }
    }

    /// Pointer released. A left/right zone snaps, top maximizes, bottom is
    /// reserved and leaves the window where it was dropped.
    pub fn end_drag(&mut self) -> WmResult<()> {
        let Some(release) = self.moveresize.finish() else {
            return Ok(());
        };
        let id = release.window.as_str();

        if release.zone.is_some() {
            self.emit(WmEvent::SnapGuide { edge: None });
        }
        self.emit(WmEvent::WindowDragEnded { id: id.to_string() });
        info!("Drag of {} released in zone {:?}", id, release.zone);

        match release.zone {
            Some(edge @ (SnapEdge::Left | SnapEdge::Right)) => {
                self.snap(id, edge)?;
                self.focus(id, FocusSource::Snap)
            }
            Some(SnapEdge::Top) => {
                let client = lookup_mut(&mut self.registry, id)?;
                client.floating = Some(release.geometry);
                self.toggle_maximize(id)?;
                self.focus(id, FocusSource::Snap)
            }
            Some(SnapEdge::Bottom) | None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Alt+Tab
    // ------------------------------------------------------------------

    /// Start or advance a cycle over open windows in `order` (taskbar order)
    pub fn cycle(&mut self, direction: CycleDirection, order: &[WindowId]) {
        let skip_minimized = self.policies.cycle_minimized == CycleMinimized::Skip;
        let candidates: Vec<CycleEntry> = order
            .iter()
            .filter_map(|id| self.registry.get(id))
            .filter(|c| c.is_open())
            .filter(|c| !(skip_minimized && c.state == WindowState::Minimized))
            .map(|c| CycleEntry {
                id: c.id.clone(),
                title: c.title.clone(),
            })
            .collect();

        let current = self.focus.focused().map(str::to_string);
        if self.cycle.start(candidates, current.as_deref(), direction) {
            let items = self.cycle.preview();
            self.emit(WmEvent::CyclePreview { items });
        }
    }

    /// Commit the pending selection (Alt released)
    pub fn commit_cycle(&mut self) -> WmResult<Option<WindowId>> {
        if !self.cycle.is_active() {
            return Ok(None);
        }
        let chosen = self.cycle.finish();
        self.emit(WmEvent::CyclePreviewHidden);

        if let Some(id) = &chosen {
            self.focus(id, FocusSource::Cycle)?;
        }
        Ok(chosen)
    }

    // ------------------------------------------------------------------
    // Housekeeping
    // ------------------------------------------------------------------

    /// A transition timer fired; stale generations are ignored
    pub fn finish_transition(&mut self, id: &str, generation: u64) -> WmResult<bool> {
        let client = lookup_mut(&mut self.registry, id)?;
        if !client.finish_transition(generation) {
            debug!("Ignoring stale transition {} for {}", generation, id);
            return Ok(false);
        }
        self.emit(WmEvent::TransitionFinished { id: id.to_string() });
        Ok(true)
    }

    /// Resize the viewport, pulling floating windows back inside
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        if viewport == self.viewport {
            return;
        }
        info!("Viewport resized to {}x{}", width, height);
        self.viewport = viewport;

        let mut changed = Vec::new();
        for client in self.registry.iter_mut() {
            match client.state {
                WindowState::Normal => {
                    if let Some(g) = client.floating {
                        let fitted = placement::constrain(g, viewport);
                        if fitted != g {
                            client.floating = Some(fitted);
                            changed.push((client.id.clone(), fitted));
                        }
                    }
                }
                WindowState::Snapped(edge) => {
                    changed.push((client.id.clone(), placement::snap_geometry(edge, viewport)));
                }
                _ => {}
            }
        }

        for (id, geometry) in changed {
            self.emit(geometry_event(&id, geometry));
        }
    }

    /// Ordered view of every window
    pub fn snapshot(&self) -> Vec<WindowInfo> {
        self.registry
            .iter()
            .map(|c| WindowInfo {
                id: c.id.clone(),
                kind: c.kind.as_str().to_string(),
                title: c.title.clone(),
                state: c.state,
                bounds: c.geometry(self.viewport).map(Into::into),
                z_order: c.z_order,
                active: self.focus.is_focused(&c.id),
                visible: c.is_visible(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wm() -> WindowManager {
        WindowManager::new(&Config::default())
    }

    fn wm_with(f: impl FnOnce(&mut Config)) -> WindowManager {
        let mut config = Config::default();
        f(&mut config);
        WindowManager::new(&config)
    }

    fn open_focus(wm: &mut WindowManager, id: &str) {
        wm.open(id).unwrap();
        wm.focus(id, FocusSource::Icon).unwrap();
    }

    fn active_count(wm: &WindowManager) -> usize {
        wm.snapshot().iter().filter(|w| w.active).count()
    }

    fn geometry(wm: &WindowManager, id: &str) -> Option<Geometry> {
        wm.client(id).unwrap().geometry(wm.viewport())
    }

    fn order(ids: &[&str]) -> Vec<WindowId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_configured_windows_start_closed() {
        let wm = wm();
        let snapshot = wm.snapshot();
        assert_eq!(snapshot.len(), 8);
        assert!(snapshot.iter().all(|w| w.state == WindowState::Closed && w.bounds.is_none()));
    }

    #[test]
    fn test_unknown_window_is_reported() {
        let mut wm = wm();
        assert_eq!(wm.open("nope"), Err(WmError::UnknownWindow("nope".into())));
        assert!(wm.drain_events().is_empty());
    }

    #[test]
    fn test_open_centers_and_schedules_transition() {
        let mut wm = wm();
        wm.open("about").unwrap();
        assert_eq!(geometry(&wm, "about"), Some(Geometry::new(240, 100, 800, 600)));

        let events = wm.drain_events();
        assert!(matches!(events[0], WmEvent::WindowOpened { ref id, .. } if id == "about"));
        assert!(events.iter().any(|e| matches!(
            e,
            WmEvent::TransitionScheduled { transition: TransitionKind::Opening, delay_ms: 300, .. }
        )));

        // idempotent
        wm.open("about").unwrap();
        assert!(wm.drain_events().is_empty());
    }

    #[test]
    fn test_close_then_open_recovers_geometry() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.begin_drag("about", 500, 120).unwrap();
        wm.update_drag(450, 170);
        wm.end_drag().unwrap();
        let moved = geometry(&wm, "about");

        wm.close("about").unwrap();
        assert_eq!(wm.focused(), None);
        wm.open("about").unwrap();
        assert_eq!(wm.client("about").unwrap().state, WindowState::Normal);
        assert_eq!(geometry(&wm, "about"), moved);
    }

    #[test]
    fn test_fresh_close_policy_recenters() {
        let mut wm = wm_with(|c| c.window_manager.close_policy = ClosePolicy::Fresh);
        open_focus(&mut wm, "about");
        wm.begin_drag("about", 500, 120).unwrap();
        wm.update_drag(400, 120);
        wm.end_drag().unwrap();

        wm.close("about").unwrap();
        wm.open("about").unwrap();
        assert_eq!(geometry(&wm, "about"), Some(Geometry::new(240, 100, 800, 600)));
    }

    #[test]
    fn test_single_active_window_across_operations() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        open_focus(&mut wm, "skills");
        assert_eq!(active_count(&wm), 1);
        wm.focus("about", FocusSource::Pointer).unwrap();
        assert_eq!(active_count(&wm), 1);
        wm.minimize("about").unwrap();
        assert_eq!(active_count(&wm), 0);
        wm.focus("skills", FocusSource::Taskbar).unwrap();
        wm.close("skills").unwrap();
        assert_eq!(active_count(&wm), 0);
    }

    #[test]
    fn test_focus_raises_above_all() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        open_focus(&mut wm, "skills");
        wm.focus("about", FocusSource::Pointer).unwrap();
        let about = wm.client("about").unwrap().z_order;
        let skills = wm.client("skills").unwrap().z_order;
        assert!(about > skills);
        assert_eq!(about, 103);
    }

    #[test]
    fn test_focus_restores_minimized() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.snap("about", SnapEdge::Right).unwrap();
        wm.minimize("about").unwrap();
        wm.focus("about", FocusSource::Taskbar).unwrap();
        assert_eq!(
            wm.client("about").unwrap().state,
            WindowState::Snapped(SnapEdge::Right)
        );
        assert_eq!(wm.focused(), Some("about"));
    }

    #[test]
    fn test_maximize_restores_snapshot() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        let before = geometry(&wm, "about");
        wm.toggle_maximize("about").unwrap();
        assert_eq!(wm.client("about").unwrap().state, WindowState::Maximized);
        assert_eq!(geometry(&wm, "about"), None);

        wm.toggle_maximize("about").unwrap();
        assert_eq!(geometry(&wm, "about"), before);
    }

    #[test]
    fn test_unmaximize_without_snapshot_recenters() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.toggle_maximize("about").unwrap();
        wm.registry.get_mut("about").unwrap().restore_geometry = None;
        wm.toggle_maximize("about").unwrap();
        assert_eq!(geometry(&wm, "about"), Some(Geometry::new(240, 100, 800, 600)));
    }

    #[test]
    fn test_drag_outside_zones_lands_at_delta() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.begin_drag("about", 600, 150).unwrap();
        wm.update_drag(700, 250);
        wm.update_drag(650, 230);
        wm.end_drag().unwrap();
        assert_eq!(geometry(&wm, "about"), Some(Geometry::new(290, 180, 800, 600)));
        assert_eq!(wm.client("about").unwrap().state, WindowState::Normal);
    }

    #[test]
    fn test_drag_release_left_snaps_half() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.begin_drag("about", 600, 150).unwrap();
        wm.update_drag(40, 400);
        wm.drain_events();
        wm.end_drag().unwrap();

        assert_eq!(
            wm.client("about").unwrap().state,
            WindowState::Snapped(SnapEdge::Left)
        );
        assert_eq!(geometry(&wm, "about"), Some(Geometry::new(0, 0, 640, 800)));
        let events = wm.drain_events();
        assert_eq!(events[0], WmEvent::SnapGuide { edge: None });
    }

    #[test]
    fn test_drag_release_top_maximizes_and_bottom_is_reserved() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.begin_drag("about", 600, 150).unwrap();
        wm.update_drag(600, 60);
        wm.end_drag().unwrap();
        assert_eq!(wm.client("about").unwrap().state, WindowState::Maximized);

        open_focus(&mut wm, "skills");
        wm.begin_drag("skills", 600, 150).unwrap();
        wm.update_drag(600, 790);
        wm.end_drag().unwrap();
        assert_eq!(wm.client("skills").unwrap().state, WindowState::Normal);
        assert_eq!(geometry(&wm, "skills"), Some(Geometry::new(240, 200, 800, 600)));
    }

    #[test]
    fn test_drag_disabled_while_maximized() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.toggle_maximize("about").unwrap();
        wm.begin_drag("about", 600, 150).unwrap();
        assert!(!wm.is_dragging());
    }

    #[test]
    fn test_click_on_snapped_header_keeps_layout() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.snap("about", SnapEdge::Left).unwrap();
        wm.drain_events();

        wm.begin_drag("about", 300, 10).unwrap();
        wm.update_drag(300, 10);
        wm.end_drag().unwrap();
        assert_eq!(
            wm.client("about").unwrap().state,
            WindowState::Snapped(SnapEdge::Left)
        );
        assert!(!wm.drain_events().iter().any(|e| matches!(e, WmEvent::WindowStateChanged { .. })));

        wm.set_viewport(600, 400);
        assert_eq!(geometry(&wm, "about"), Some(Geometry::new(0, 0, 300, 400)));
    }

    #[test]
    fn test_dragging_snapped_window_unsnaps_on_move() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.snap("about", SnapEdge::Right).unwrap();
        wm.begin_drag("about", 900, 10).unwrap();
        assert_eq!(
            wm.client("about").unwrap().state,
            WindowState::Snapped(SnapEdge::Right)
        );

        wm.update_drag(800, 200);
        assert_eq!(wm.client("about").unwrap().state, WindowState::Normal);
        wm.end_drag().unwrap();
        assert_eq!(geometry(&wm, "about"), Some(Geometry::new(540, 0, 640, 800)));
    }

    #[test]
    fn test_keyboard_snap_mid_drag_cancels() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.begin_drag("about", 600, 150).unwrap();
        wm.snap("about", SnapEdge::Left).unwrap();
        assert!(!wm.is_dragging());
        wm.drain_events();

        wm.update_drag(700, 300);
        assert!(wm.drain_events().is_empty());
        wm.end_drag().unwrap();
        assert_eq!(
            wm.client("about").unwrap().state,
            WindowState::Snapped(SnapEdge::Left)
        );
        assert_eq!(geometry(&wm, "about"), Some(Geometry::new(0, 0, 640, 800)));
    }

    #[test]
    fn test_close_mid_drag_cancels() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.begin_drag("about", 600, 150).unwrap();
        wm.close("about").unwrap();
        assert!(!wm.is_dragging());
        wm.update_drag(700, 200);
        wm.end_drag().unwrap();
        assert_eq!(wm.client("about").unwrap().state, WindowState::Closed);
    }

    #[test]
    fn test_alt_tab_skips_closed() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        open_focus(&mut wm, "skills");
        wm.focus("about", FocusSource::Pointer).unwrap();

        wm.cycle(CycleDirection::Forward, &order(&["about", "skills", "projects"]));
        // selection is pending until Alt is released
        assert_eq!(wm.focused(), Some("about"));
        assert_eq!(wm.commit_cycle().unwrap(), Some("skills".to_string()));
        assert_eq!(wm.focused(), Some("skills"));

        wm.cycle(CycleDirection::Forward, &order(&["about", "skills", "projects"]));
        assert_eq!(wm.commit_cycle().unwrap(), Some("about".to_string()));
    }

    #[test]
    fn test_alt_tab_minimized_policy() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        open_focus(&mut wm, "skills");
        wm.minimize("skills").unwrap();
        wm.focus("about", FocusSource::Pointer).unwrap();
        wm.cycle(CycleDirection::Forward, &order(&["about", "skills"]));
        wm.commit_cycle().unwrap();
        assert_eq!(wm.client("skills").unwrap().state, WindowState::Normal);
        assert_eq!(wm.focused(), Some("skills"));

        let mut wm = wm_with(|c| c.window_manager.cycle_minimized = CycleMinimized::Skip);
        open_focus(&mut wm, "about");
        open_focus(&mut wm, "skills");
        wm.minimize("skills").unwrap();
        wm.focus("about", FocusSource::Pointer).unwrap();
        wm.cycle(CycleDirection::Forward, &order(&["about", "skills"]));
        assert_eq!(wm.commit_cycle().unwrap(), Some("about".to_string()));
    }

    #[test]
    fn test_stale_transition_ignored() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.minimize("about").unwrap();
        let first = wm.client("about").unwrap().generation;
        wm.open("about").unwrap();
        wm.minimize("about").unwrap();
        let second = wm.client("about").unwrap().generation;

        assert!(!wm.finish_transition("about", first).unwrap());
        assert!(wm.snapshot()[0].visible);
        assert!(wm.finish_transition("about", second).unwrap());
        assert!(!wm.snapshot()[0].visible);
    }

    #[test]
    fn test_viewport_resize_reclamps() {
        let mut wm = wm();
        open_focus(&mut wm, "about");
        wm.set_viewport(900, 700);
        assert_eq!(geometry(&wm, "about"), Some(Geometry::new(100, 100, 800, 600)));
        wm.snap("about", SnapEdge::Left).unwrap();
        wm.set_viewport(600, 400);
        assert_eq!(geometry(&wm, "about"), Some(Geometry::new(0, 0, 300, 400)));
    }

    #[test]
    fn test_context_window_skips_terminal() {
        let mut wm = wm();
        open_focus(&mut wm, "settings");
        open_focus(&mut wm, "terminal");
        assert_eq!(wm.active_window().unwrap().kind, WindowKind::Terminal);
        assert_eq!(wm.context_window().unwrap().kind, WindowKind::Settings);
    }
}
