//! Command history
//!
//! Ordered, bounded list of submitted lines, persisted as a JSON array of
//! strings under a single store key.

use std::collections::VecDeque;

use tracing::debug;

use crate::store::{KvStore, StoreError};

pub const DEFAULT_HISTORY_LIMIT: usize = 50;
pub const DEFAULT_HISTORY_KEY: &str = "commandHistory";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    limit: usize,
}

impl CommandHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Build from stored entries, keeping only the newest `limit`
    pub fn from_entries(entries: Vec<String>, limit: usize) -> Self {
        let mut history = Self::new(limit);
        history.entries = entries.into();
        history.evict();
        history
    }

    /// Record a submitted line.
    ///
    /// Blank lines and an exact repeat of the newest entry are skipped.
    /// Returns true if the history changed.
    pub fn push(&mut self, command: &str) -> bool {
        if command.trim().is_empty() {
            return false;
        }
        if self.entries.back().map(String::as_str) == Some(command) {
            return false;
        }

        self.entries.push_back(command.to_string());
        self.evict();
        true
    }

    fn evict(&mut self) {
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by position, oldest first
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Load from `store`; a missing key yields an empty history
    pub fn load(store: &dyn KvStore, key: &str, limit: usize) -> Result<Self, StoreError> {
        let Some(raw) = store.get(key)? else {
            return Ok(Self::new(limit));
        };
        let entries: Vec<String> = serde_json::from_str(&raw)?;
        debug!("Loaded {} history entries from '{}'", entries.len(), key);
        Ok(Self::from_entries(entries, limit))
    }

    pub fn save(&self, store: &mut dyn KvStore, key: &str) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.entries)?;
        store.set(key, raw)
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_evicts_oldest_past_limit() {
        let mut history = CommandHistory::default();
        for i in 0..51 {
            assert!(history.push(&format!("cmd{}", i)));
        }
        assert_eq!(history.len(), 50);
        assert_eq!(history.get(0), Some("cmd1"));
        assert_eq!(history.get(49), Some("cmd50"));
    }

    #[test]
    fn test_skips_blank_and_consecutive_duplicates() {
        let mut history = CommandHistory::default();
        assert!(!history.push(""));
        assert!(!history.push("   "));
        assert!(history.push("ls"));
        assert!(!history.push("ls"));
        assert!(history.push("pwd"));
        assert!(history.push("ls"));
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["ls", "pwd", "ls"]);
    }

    #[test]
    fn test_load_and_save_use_json_array() {
        let mut store = MemoryStore::new();
        let mut history = CommandHistory::default();
        history.push("help");
        history.push("about");
        history.save(&mut store, DEFAULT_HISTORY_KEY).unwrap();

        assert_eq!(
            store.get(DEFAULT_HISTORY_KEY).unwrap().as_deref(),
            Some(r#"["help","about"]"#)
        );

        let loaded = CommandHistory::load(&store, DEFAULT_HISTORY_KEY, 50).unwrap();
        assert_eq!(loaded, history);
    }

    #[test]
    fn test_load_truncates_oversized_store() {
        let mut store = MemoryStore::new();
        let entries: Vec<String> = (0..60).map(|i| format!("c{}", i)).collect();
        store
            .set(DEFAULT_HISTORY_KEY, serde_json::to_string(&entries).unwrap())
            .unwrap();

        let loaded = CommandHistory::load(&store, DEFAULT_HISTORY_KEY, 50).unwrap();
        assert_eq!(loaded.len(), 50);
        assert_eq!(loaded.get(0), Some("c10"));
    }
}
