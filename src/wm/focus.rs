//! Focus Module
//!
//! Tracks the single active window. At most one window is active at a time.

use tracing::debug;

use crate::shared::WindowId;

/// What triggered a focus request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSource {
    /// Mousedown inside the window
    Pointer,
    /// Desktop icon
    Icon,
    /// Taskbar entry
    Taskbar,
    /// Alt+Tab commit
    Cycle,
    /// Drag released on a snap zone
    Snap,
    /// App launcher entry
    Launcher,
}

/// Focus manager
#[derive(Debug, Default)]
pub struct FocusManager {
    /// Currently focused window
    focused: Option<WindowId>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focused.as_deref() == Some(id)
    }

    /// Set focus; returns true if the active window changed
    pub fn set_focus(&mut self, id: &str, source: FocusSource) -> bool {
        if self.is_focused(id) {
            return false;
        }
        debug!("Focus {} ({:?})", id, source);
        self.focused = Some(id.to_string());
        true
    }

    /// Drop focus if `id` holds it; returns true if it did
    pub fn clear_if(&mut self, id: &str) -> bool {
        if self.is_focused(id) {
            debug!("Focus cleared from {}", id);
            self.focused = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_active_window() {
        let mut focus = FocusManager::new();
        assert!(focus.set_focus("a", FocusSource::Icon));
        assert!(!focus.set_focus("a", FocusSource::Pointer));
        assert!(focus.set_focus("b", FocusSource::Taskbar));
        assert!(!focus.is_focused("a"));
        assert_eq!(focus.focused(), Some("b"));
    }

    #[test]
    fn test_clear_only_matching() {
        let mut focus = FocusManager::new();
        focus.set_focus("a", FocusSource::Icon);
        assert!(!focus.clear_if("b"));
        assert!(focus.clear_if("a"));
        assert_eq!(focus.focused(), None);
    }
}
