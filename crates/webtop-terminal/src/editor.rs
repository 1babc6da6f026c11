//! Line editor
//!
//! Single input buffer with two modes: plain editing, and browsing the
//! command history with Up/Down.

use crate::history::CommandHistory;

/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Cursor sits one past the newest history entry
    #[default]
    Editing,
    /// Cursor on a history entry (index into the history, oldest first)
    Browsing(usize),
}

#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    buffer: String,
    mode: EditMode,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Replace the buffer with typed text; the history cursor is kept
    pub fn set_buffer(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
    }

    /// Take the buffer for execution and reset the history cursor
    pub fn take(&mut self) -> String {
        self.mode = EditMode::Editing;
        std::mem::take(&mut self.buffer)
    }

    /// Reset the history cursor to one past the end
    pub fn reset_cursor(&mut self) {
        self.mode = EditMode::Editing;
    }

    /// Step towards older entries; returns true if the buffer changed
    pub fn history_up(&mut self, history: &CommandHistory) -> bool {
        let cursor = match self.mode {
            EditMode::Editing => history.len(),
            EditMode::Browsing(index) => index.min(history.len()),
        };
        if cursor == 0 {
            return false;
        }

        let index = cursor - 1;
        match history.get(index) {
            Some(entry) => {
                self.set_buffer(entry);
                self.mode = EditMode::Browsing(index);
                true
            }
            None => false,
        }
    }

    /// Step towards newer entries; past the newest the buffer is cleared
    pub fn history_down(&mut self, history: &CommandHistory) -> bool {
        if let EditMode::Browsing(index) = self.mode {
            if let Some(entry) = history.get(index + 1) {
                self.set_buffer(entry);
                self.mode = EditMode::Browsing(index + 1);
                return true;
            }
        }

        self.mode = EditMode::Editing;
        let changed = !self.buffer.is_empty();
        self.buffer.clear();
        changed
    }

    /// Prefix completion: replaced only when exactly one candidate matches
    pub fn complete<'a>(&mut self, candidates: impl IntoIterator<Item = &'a str>) -> bool {
        let prefix = self.buffer.to_lowercase();
        let mut matches: Vec<&str> = candidates
            .into_iter()
            .filter(|name| name.starts_with(&prefix))
            .collect();
        matches.dedup();

        match matches.as_slice() {
            [only] if *only != self.buffer => {
                self.set_buffer(only);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(entries: &[&str]) -> CommandHistory {
        CommandHistory::from_entries(entries.iter().map(|s| s.to_string()).collect(), 50)
    }

    const NAMES: &[&str] = &["help", "about", "contact", "cv", "clear", "ls"];

    #[test]
    fn test_up_walks_oldest_ward_and_stops() {
        let history = history(&["ls", "pwd", "about"]);
        let mut editor = LineEditor::new();

        assert!(editor.history_up(&history));
        assert_eq!(editor.buffer(), "about");
        assert!(editor.history_up(&history));
        assert!(editor.history_up(&history));
        assert_eq!(editor.buffer(), "ls");
        assert_eq!(editor.mode(), EditMode::Browsing(0));

        assert!(!editor.history_up(&history));
        assert_eq!(editor.buffer(), "ls");
    }

    #[test]
    fn test_down_past_newest_clears_buffer() {
        let history = history(&["ls", "pwd"]);
        let mut editor = LineEditor::new();
        editor.history_up(&history);
        editor.history_up(&history);

        assert!(editor.history_down(&history));
        assert_eq!(editor.buffer(), "pwd");
        assert!(editor.history_down(&history));
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.mode(), EditMode::Editing);
    }

    #[test]
    fn test_up_on_empty_history_is_noop() {
        let mut editor = LineEditor::new();
        editor.set_buffer("draft");
        assert!(!editor.history_up(&CommandHistory::default()));
        assert_eq!(editor.buffer(), "draft");
    }

    #[test]
    fn test_take_resets_cursor() {
        let history = history(&["ls"]);
        let mut editor = LineEditor::new();
        editor.history_up(&history);
        assert_eq!(editor.take(), "ls");
        assert_eq!(editor.mode(), EditMode::Editing);
        assert_eq!(editor.buffer(), "");
    }

    #[test]
    fn test_completion_single_match() {
        let mut editor = LineEditor::new();
        editor.set_buffer("he");
        assert!(editor.complete(NAMES.iter().copied()));
        assert_eq!(editor.buffer(), "help");
    }

    #[test]
    fn test_completion_is_case_insensitive() {
        let mut editor = LineEditor::new();
        editor.set_buffer("AB");
        assert!(editor.complete(NAMES.iter().copied()));
        assert_eq!(editor.buffer(), "about");
    }

    #[test]
    fn test_completion_ambiguous_or_missing_leaves_buffer() {
        let mut editor = LineEditor::new();
        editor.set_buffer("c");
        assert!(!editor.complete(NAMES.iter().copied()));
        assert_eq!(editor.buffer(), "c");

        editor.set_buffer("zz");
        assert!(!editor.complete(NAMES.iter().copied()));
        assert_eq!(editor.buffer(), "zz");
    }
}
