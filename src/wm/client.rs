use webtop_ipc::TransitionKind;

use crate::shared::{Geometry, Viewport, WindowId, WindowKind, WindowState};
use crate::wm::placement;

/// In-flight visual transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub generation: u64,
}

/// Window Manager client state
/// Represents one application window known to the WM
#[derive(Debug, Clone)]
pub struct Client {
    pub id: WindowId,

    pub kind: WindowKind,

    /// Window title
    pub title: String,

    pub state: WindowState,

    /// Last floating geometry; `None` until the window is first placed
    pub floating: Option<Geometry>,

    /// Snapshot taken when maximizing
    pub restore_geometry: Option<Geometry>,

    /// State to return to when un-minimized
    pub pre_minimize: WindowState,

    /// Stacking rank; higher is on top
    pub z_order: i64,

    /// Running transition, if any
    pub transition: Option<Transition>,

    /// Bumped on every lifecycle transition; stale timers are ignored
    pub generation: u64,
}

impl Client {
    pub fn new(id: impl Into<WindowId>, kind: WindowKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            state: WindowState::Closed,
            floating: None,
            restore_geometry: None,
            pre_minimize: WindowState::Normal,
            z_order: 0,
            transition: None,
            generation: 0,
        }
    }

    /// Effective geometry. Snapped layouts are derived from the edge, never stored.
    pub fn geometry(&self, viewport: Viewport) -> Option<Geometry> {
        state_geometry(self.state, self.floating, viewport).or_else(|| {
            if self.state == WindowState::Minimized {
                state_geometry(self.pre_minimize, self.floating, viewport)
            } else {
                None
            }
        })
    }

    /// Whether the window still has a taskbar entry
    pub fn is_open(&self) -> bool {
        self.state != WindowState::Closed
    }

    /// Rendered: shown, or still animating out
    pub fn is_visible(&self) -> bool {
        if self.state.is_shown() {
            return true;
        }
        matches!(
            self.transition,
            Some(Transition {
                kind: TransitionKind::Closing | TransitionKind::Minimizing,
                ..
            })
        )
    }

    /// Start a transition, superseding any running one
    pub fn begin_transition(&mut self, kind: TransitionKind) -> u64 {
        self.generation += 1;
        self.transition = Some(Transition {
            kind,
            generation: self.generation,
        });
        self.generation
    }

    /// Settle the transition started at `generation`; false if it is stale
    pub fn finish_transition(&mut self, generation: u64) -> bool {
        match self.transition {
            Some(t) if t.generation == generation => {
                self.transition = None;
                true
            }
            _ => false,
        }
    }
}

fn state_geometry(
    state: WindowState,
    floating: Option<Geometry>,
    viewport: Viewport,
) -> Option<Geometry> {
    match state {
        WindowState::Normal => floating,
        WindowState::Snapped(edge) => Some(placement::snap_geometry(edge, viewport)),
        WindowState::Minimized | WindowState::Maximized | WindowState::Closed => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::SnapEdge;

    const VIEWPORT: Viewport = Viewport {
        width: 1000,
        height: 600,
    };

    #[test]
    fn test_geometry_per_state() {
        let mut client = Client::new("about", WindowKind::About, "About");
        assert_eq!(client.geometry(VIEWPORT), None);

        client.state = WindowState::Normal;
        client.floating = Some(Geometry::new(10, 20, 300, 200));
        assert_eq!(client.geometry(VIEWPORT), Some(Geometry::new(10, 20, 300, 200)));

        client.state = WindowState::Snapped(SnapEdge::Right);
        assert_eq!(client.geometry(VIEWPORT), Some(Geometry::new(500, 0, 500, 600)));

        client.state = WindowState::Maximized;
        assert_eq!(client.geometry(VIEWPORT), None);
    }

    #[test]
    fn test_minimized_keeps_previous_geometry() {
        let mut client = Client::new("about", WindowKind::About, "About");
        client.floating = Some(Geometry::new(10, 20, 300, 200));
        client.state = WindowState::Minimized;
        client.pre_minimize = WindowState::Normal;
        assert_eq!(client.geometry(VIEWPORT), Some(Geometry::new(10, 20, 300, 200)));
        assert!(!client.is_visible());
    }

    #[test]
    fn test_stale_transition_is_ignored() {
        let mut client = Client::new("cv", WindowKind::Cv, "CV");
        let first = client.begin_transition(TransitionKind::Minimizing);
        let second = client.begin_transition(TransitionKind::Minimizing);
        assert_ne!(first, second);

        assert!(!client.finish_transition(first));
        assert!(client.transition.is_some());
        assert!(client.finish_transition(second));
        assert!(client.transition.is_none());
    }

    #[test]
    fn test_closing_window_stays_visible_until_settled() {
        let mut client = Client::new("cv", WindowKind::Cv, "CV");
        client.state = WindowState::Closed;
        let generation = client.begin_transition(TransitionKind::Closing);
        assert!(client.is_visible());
        client.finish_transition(generation);
        assert!(!client.is_visible());
    }
}
