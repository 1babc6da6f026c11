//! Panel (taskbar) implementation
//!
//! Mirrors window manager events into taskbar entries. Entries hold only the
//! window id; window state is always looked up in the window manager.

use tracing::debug;
use webtop_ipc::{TaskbarButton, WmEvent};

use crate::shared::{WindowId, WindowKind};
use crate::wm::client::Client;

/// One taskbar button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub window: WindowId,
    pub icon: &'static str,
    pub active: bool,
}

/// What clicking a taskbar entry does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelClickAction {
    /// Window closed or minimized
    OpenAndFocus,
    /// Window shown and active
    Minimize,
    /// Window shown but inactive
    Focus,
}

/// Panel state
#[derive(Debug, Default)]
pub struct Panel {
    /// Entries in insertion order
    entries: Vec<TaskbarEntry>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from a window manager event; returns true if the taskbar changed
    pub fn apply(&mut self, event: &WmEvent) -> bool {
        match event {
            WmEvent::WindowOpened { id, kind, .. } => {
                if self.entries.iter().any(|e| &e.window == id) {
                    return false;
                }
                debug!("Taskbar entry added for {}", id);
                self.entries.push(TaskbarEntry {
                    window: id.clone(),
                    icon: WindowKind::from_name(kind).icon(),
                    active: false,
                });
                true
            }
            WmEvent::WindowClosed { id } => {
                let before = self.entries.len();
                self.entries.retain(|e| &e.window != id);
                let removed = self.entries.len() != before;
                if removed {
                    debug!("Taskbar entry removed for {}", id);
                }
                removed
            }
            WmEvent::FocusChanged { active } => {
                let mut changed = false;
                for entry in &mut self.entries {
                    let is_active = active.as_deref() == Some(entry.window.as_str());
                    changed |= entry.active != is_active;
                    entry.active = is_active;
                }
                changed
            }
            _ => false,
        }
    }

    /// Three-way toggle for a click on `client`'s entry
    pub fn click_action(client: &Client, is_active: bool) -> PanelClickAction {
        if !client.state.is_shown() {
            PanelClickAction::OpenAndFocus
        } else if is_active {
            PanelClickAction::Minimize
        } else {
            PanelClickAction::Focus
        }
    }

    pub fn entries(&self) -> &[TaskbarEntry] {
        &self.entries
    }

    /// Window ids in taskbar order
    pub fn order(&self) -> Vec<WindowId> {
        self.entries.iter().map(|e| e.window.clone()).collect()
    }

    pub fn buttons(&self) -> Vec<TaskbarButton> {
        self.entries
            .iter()
            .map(|e| TaskbarButton {
                id: e.window.clone(),
                icon: e.icon.to_string(),
                active: e.active,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::WindowState;

    fn opened(id: &str, kind: &str) -> WmEvent {
        WmEvent::WindowOpened {
            id: id.into(),
            kind: kind.into(),
            title: id.into(),
        }
    }

    #[test]
    fn test_entry_lifecycle() {
        let mut panel = Panel::new();
        assert!(panel.apply(&opened("about", "about")));
        assert!(!panel.apply(&opened("about", "about")));
        assert!(panel.apply(&opened("gallery", "gallery")));
        assert_eq!(panel.entries()[0].icon, "user");
        assert_eq!(panel.entries()[1].icon, "window-maximize");

        assert!(panel.apply(&WmEvent::WindowClosed { id: "about".into() }));
        assert_eq!(panel.order(), vec!["gallery".to_string()]);
    }

    #[test]
    fn test_active_flag_mirrors_focus() {
        let mut panel = Panel::new();
        panel.apply(&opened("about", "about"));
        panel.apply(&opened("cv", "cv"));

        assert!(panel.apply(&WmEvent::FocusChanged { active: Some("cv".into()) }));
        assert_eq!(panel.buttons().iter().filter(|b| b.active).count(), 1);
        assert!(panel.buttons()[1].active);

        assert!(panel.apply(&WmEvent::FocusChanged { active: None }));
        assert!(panel.buttons().iter().all(|b| !b.active));
        assert!(!panel.apply(&WmEvent::FocusChanged { active: None }));
    }

    #[test]
    fn test_click_is_three_way() {
        let mut client = Client::new("about", WindowKind::About, "About");
        assert_eq!(Panel::click_action(&client, false), PanelClickAction::OpenAndFocus);

        client.state = WindowState::Normal;
        assert_eq!(Panel::click_action(&client, true), PanelClickAction::Minimize);
        assert_eq!(Panel::click_action(&client, false), PanelClickAction::Focus);

        client.state = WindowState::Minimized;
        assert_eq!(Panel::click_action(&client, false), PanelClickAction::OpenAndFocus);
    }
}
