//! Cycle Module
//!
//! Window cycling (Alt+Tab). Two phases: while Alt is held only the pending
//! selection moves and the preview strip follows it; releasing Alt commits.

use tracing::{debug, info};
use webtop_ipc::PreviewItem;

use crate::shared::WindowId;

/// Cycle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// A window eligible for cycling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEntry {
    pub id: WindowId,
    pub title: String,
}

/// Cycle manager
#[derive(Debug, Default)]
pub struct CycleManager {
    /// Candidates in taskbar insertion order
    cycle_list: Vec<CycleEntry>,

    /// Pending selection
    selected: Option<usize>,

    /// Is cycling active?
    active: bool,
}

impl CycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start (or continue) a cycle. Returns false when there is nothing to cycle.
    pub fn start(
        &mut self,
        candidates: Vec<CycleEntry>,
        current: Option<&str>,
        direction: CycleDirection,
    ) -> bool {
        if self.active {
            self.step(direction);
            return true;
        }
        if candidates.is_empty() {
            debug!("Nothing to cycle");
            return false;
        }

        info!("Starting window cycle over {} windows", candidates.len());
        self.cycle_list = candidates;
        self.active = true;

        let origin = current.and_then(|id| self.cycle_list.iter().position(|e| e.id == id));
        self.selected = Some(match origin {
            Some(pos) => advance(pos, self.cycle_list.len(), direction),
            None if direction == CycleDirection::Forward => 0,
            None => self.cycle_list.len() - 1,
        });
        true
    }

    /// Move the pending selection
    pub fn step(&mut self, direction: CycleDirection) {
        if let Some(index) = self.selected {
            let next = advance(index, self.cycle_list.len(), direction);
            debug!("Cycle selection {} -> {}", index, next);
            self.selected = Some(next);
        }
    }

    /// Currently pending window
    pub fn selection(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.cycle_list.get(i))
            .map(|e| e.id.as_str())
    }

    /// Preview strip with the pending window highlighted
    pub fn preview(&self) -> Vec<PreviewItem> {
        self.cycle_list
            .iter()
            .enumerate()
            .map(|(i, entry)| PreviewItem {
                id: entry.id.clone(),
                title: entry.title.clone(),
                selected: Some(i) == self.selected,
            })
            .collect()
    }

    /// End the cycle and return the window to focus
    pub fn finish(&mut self) -> Option<WindowId> {
        if !self.active {
            return None;
        }
        let chosen = self.selection().map(str::to_string);
        info!("Cycle committed: {:?}", chosen);
        self.reset();
        chosen
    }

    /// Drop a window that closed mid-cycle
    pub fn forget(&mut self, id: &str) {
        let Some(pos) = self.cycle_list.iter().position(|e| e.id == id) else {
            return;
        };
        self.cycle_list.remove(pos);

        if self.cycle_list.is_empty() {
            self.reset();
            return;
        }
        if let Some(selected) = self.selected {
            if selected > pos || selected >= self.cycle_list.len() {
                self.selected = Some(selected.saturating_sub(1).min(self.cycle_list.len() - 1));
            }
        }
    }

    fn reset(&mut self) {
        self.cycle_list.clear();
        self.selected = None;
        self.active = false;
    }
}

fn advance(index: usize, len: usize, direction: CycleDirection) -> usize {
    match direction {
        CycleDirection::Forward => (index + 1) % len,
        CycleDirection::Backward => (index + len - 1) % len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(ids: &[&str]) -> Vec<CycleEntry> {
        ids.iter()
            .map(|id| CycleEntry {
                id: id.to_string(),
                title: id.to_uppercase(),
            })
            .collect()
    }

    #[test]
    fn test_forward_from_current() {
        let mut cycle = CycleManager::new();
        assert!(cycle.start(entries(&["a", "b"]), Some("a"), CycleDirection::Forward));
        assert_eq!(cycle.selection(), Some("b"));
        assert_eq!(cycle.finish(), Some("b".to_string()));
        assert!(!cycle.is_active());
    }

    #[test]
    fn test_wraps_both_ways() {
        let mut cycle = CycleManager::new();
        cycle.start(entries(&["a", "b", "c"]), Some("c"), CycleDirection::Forward);
        assert_eq!(cycle.selection(), Some("a"));
        cycle.step(CycleDirection::Backward);
        cycle.step(CycleDirection::Backward);
        assert_eq!(cycle.selection(), Some("b"));
    }

    #[test]
    fn test_backward_start_without_current() {
        let mut cycle = CycleManager::new();
        cycle.start(entries(&["a", "b", "c"]), None, CycleDirection::Backward);
        assert_eq!(cycle.selection(), Some("c"));
    }

    #[test]
    fn test_repeated_start_steps() {
        let mut cycle = CycleManager::new();
        cycle.start(entries(&["a", "b", "c"]), Some("a"), CycleDirection::Forward);
        cycle.start(entries(&["a", "b", "c"]), Some("a"), CycleDirection::Forward);
        assert_eq!(cycle.selection(), Some("c"));

        let preview = cycle.preview();
        assert_eq!(preview.len(), 3);
        assert!(preview[2].selected);
        assert!(!preview[0].selected);
    }

    #[test]
    fn test_empty_cycle_does_not_start() {
        let mut cycle = CycleManager::new();
        assert!(!cycle.start(Vec::new(), None, CycleDirection::Forward));
        assert_eq!(cycle.finish(), None);
    }

    #[test]
    fn test_forget_keeps_selection_valid() {
        let mut cycle = CycleManager::new();
        cycle.start(entries(&["a", "b", "c"]), Some("b"), CycleDirection::Forward);
        assert_eq!(cycle.selection(), Some("c"));
        cycle.forget("a");
        assert_eq!(cycle.selection(), Some("c"));
        cycle.forget("c");
        assert_eq!(cycle.selection(), Some("b"));
        cycle.forget("b");
        assert!(!cycle.is_active());
    }
}
