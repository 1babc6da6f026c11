//! App launcher popup

use tracing::debug;

/// Launcher state
#[derive(Debug, Clone, Default)]
pub struct Launcher {
    pub visible: bool,
    /// Launchable app names, in display order
    entries: Vec<String>,
}

impl Launcher {
    pub fn new(entries: Vec<String>) -> Self {
        Self {
            visible: false,
            entries,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Flip visibility and return the new state
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        debug!("Launcher {}", if self.visible { "shown" } else { "hidden" });
        self.visible
    }

    /// Hide; returns true if it was visible
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }

    /// Pick an entry: hides the launcher and returns true if `app` is listed
    pub fn select(&mut self, app: &str) -> bool {
        let known = self.entries.iter().any(|e| e.eq_ignore_ascii_case(app));
        if known {
            self.visible = false;
        }
        known
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_hide() {
        let mut launcher = Launcher::new(vec!["about".into()]);
        assert!(launcher.toggle());
        assert!(launcher.hide());
        assert!(!launcher.hide());
        assert!(launcher.toggle());
        assert!(!launcher.toggle());
    }

    #[test]
    fn test_select_known_entry_hides() {
        let mut launcher = Launcher::new(vec!["about".into(), "home".into()]);
        launcher.toggle();
        assert!(!launcher.select("nope"));
        assert!(launcher.visible);
        assert!(launcher.select("Home"));
        assert!(!launcher.visible);
    }
}
