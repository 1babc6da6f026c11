//! Keyboard Module
//!
//! Global shortcut table: Alt+Tab cycling, Alt+F4, Alt+Arrow snapping,
//! Alt+` terminal toggle and Super for the launcher.

use std::collections::HashMap;

use tracing::debug;
use webtop_ipc::{Key, Modifiers};

use crate::shared::SnapEdge;
use crate::wm::cycle::CycleDirection;

/// Keyboard shortcut action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardAction {
    /// Alt+Tab / Alt+Shift+Tab
    CycleWindows(CycleDirection),
    /// Alt released while cycling
    CommitCycle,
    /// Close the active window
    CloseWindow,
    /// Snap the active window to an edge
    SnapWindow(SnapEdge),
    /// Show the terminal from a settings/profile window
    ToggleTerminal,
    /// Show or hide the app launcher
    ToggleLauncher,
}

/// Keyboard manager
#[derive(Debug, Clone)]
pub struct KeyboardManager {
    /// Key bindings
    bindings: HashMap<(Modifiers, Key), KeyboardAction>,
}

impl KeyboardManager {
    /// Create a keyboard manager with the default shortcut table
    pub fn new() -> Self {
        let mut manager = Self {
            bindings: HashMap::new(),
        };
        manager.setup_default_bindings();
        manager
    }

    fn setup_default_bindings(&mut self) {
        use KeyboardAction::*;

        self.bind(Modifiers::ALT, Key::Tab, CycleWindows(CycleDirection::Forward));
        self.bind(
            Modifiers::ALT | Modifiers::SHIFT,
            Key::Tab,
            CycleWindows(CycleDirection::Backward),
        );
        self.bind(Modifiers::ALT, Key::F4, CloseWindow);
        self.bind(Modifiers::ALT, Key::ArrowLeft, SnapWindow(SnapEdge::Left));
        self.bind(Modifiers::ALT, Key::ArrowRight, SnapWindow(SnapEdge::Right));
        self.bind(Modifiers::ALT, Key::ArrowUp, SnapWindow(SnapEdge::Top));
        self.bind(Modifiers::ALT, Key::ArrowDown, SnapWindow(SnapEdge::Bottom));
        self.bind(Modifiers::ALT, Key::Backquote, ToggleTerminal);
        self.bind(Modifiers::empty(), Key::Meta, ToggleLauncher);

        debug!("Registered {} key bindings", self.bindings.len());
    }

    /// Add or replace a binding
    pub fn bind(&mut self, modifiers: Modifiers, key: Key, action: KeyboardAction) {
        self.bindings.insert((modifiers, key), action);
    }

    /// Action for a key press
    pub fn handle_key_press(&self, key: Key, modifiers: Modifiers) -> Option<KeyboardAction> {
        // A lone Super press reports itself as a held modifier
        let modifiers = if key == Key::Meta {
            modifiers - Modifiers::META
        } else {
            modifiers
        };
        let action = self.bindings.get(&(modifiers, key)).copied();
        if let Some(action) = action {
            debug!("Key {:?} with {:?} -> {:?}", key, modifiers, action);
        }
        action
    }

    /// Action for a key release
    pub fn handle_key_release(&self, key: Key) -> Option<KeyboardAction> {
        match key {
            Key::Alt => Some(KeyboardAction::CommitCycle),
            _ => None,
        }
    }
}

impl Default for KeyboardManager {
    fn default() -> Self {
        Self::new()
    }
}
