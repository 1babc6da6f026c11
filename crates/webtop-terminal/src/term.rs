//! Terminal state: line editor, history and output log behind one facade

use tracing::{debug, info, warn};

use crate::command::{self, CommandContext, CommandOutput, Effect};
use crate::content;
use crate::editor::LineEditor;
use crate::history::{CommandHistory, DEFAULT_HISTORY_KEY, DEFAULT_HISTORY_LIMIT};
use crate::host::Host;
use crate::output::{CommandRecord, OutputLog};
use crate::store::KvStore;

/// Marker appended when a line is cancelled with Ctrl+C
pub const CANCEL_MARKER: &str = "^C";

/// Terminal construction options
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    pub prompt: String,
    pub history_limit: usize,
    pub history_key: String,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            prompt: content::PROMPT.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            history_key: DEFAULT_HISTORY_KEY.to_string(),
        }
    }
}

/// Editing keys handled by the terminal input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Up,
    Down,
    Tab,
    /// Ctrl+L
    ClearScreen,
    /// Ctrl+C
    Interrupt,
}

/// Result of executing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Index of the appended record in the output log
    pub index: usize,
    pub effects: Vec<Effect>,
}

impl Execution {
    pub fn cleared_log(&self) -> bool {
        self.effects.contains(&Effect::ClearLog)
    }
}

/// What a key press did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Executed(Execution),
    /// Line cancelled; record appended at the given index
    Interrupted(usize),
    BufferChanged,
    Unchanged,
}

/// Interactive terminal session
pub struct Terminal {
    editor: LineEditor,
    history: CommandHistory,
    log: OutputLog,
    store: Box<dyn KvStore>,
    history_key: String,
    prompt: String,
}

impl Terminal {
    /// Create a terminal, restoring history from `store`
    pub fn new(options: TerminalOptions, store: Box<dyn KvStore>) -> Self {
        let history = match CommandHistory::load(
            &*store,
            &options.history_key,
            options.history_limit,
        ) {
            Ok(history) => history,
            Err(e) => {
                warn!("Discarding unreadable command history: {}", e);
                CommandHistory::new(options.history_limit)
            }
        };

        info!("Terminal ready ({} history entries)", history.len());

        Self {
            editor: LineEditor::new(),
            history,
            log: OutputLog::new(),
            store,
            history_key: options.history_key,
            prompt: options.prompt,
        }
    }

    pub fn input(&self) -> &str {
        self.editor.buffer()
    }

    pub fn set_input(&mut self, text: &str) {
        self.editor.set_buffer(text);
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Execute `line` in `context`. Never fails: errors become text output.
    pub fn execute(
        &mut self,
        line: &str,
        context: CommandContext,
        host: &mut dyn Host,
    ) -> Execution {
        let (output, effects) = match command::evaluate(line, context, host) {
            Ok(outcome) => (outcome.output, outcome.effects),
            Err(e) => {
                debug!("Command failed: {}", e);
                (CommandOutput::Text(e.to_string()), Vec::new())
            }
        };

        if effects.contains(&Effect::ClearLog) {
            self.log.clear();
        }
        let index = self.log.push(CommandRecord::new(line, output));

        if self.history.push(line) {
            if let Err(e) = self.history.save(&mut *self.store, &self.history_key) {
                warn!("Failed to persist command history: {}", e);
            }
        }
        self.editor.reset_cursor();

        Execution { index, effects }
    }

    /// Execute the current buffer
    pub fn submit(&mut self, context: CommandContext, host: &mut dyn Host) -> Execution {
        let line = self.editor.take();
        self.execute(&line, context, host)
    }

    /// Append a block that did not come from a typed command
    pub fn append_notice(&mut self, text: &str) -> usize {
        self.log
            .push(CommandRecord::new("", CommandOutput::text(text)))
    }

    /// Handle an editing key
    pub fn handle_key(
        &mut self,
        key: EditKey,
        context: CommandContext,
        host: &mut dyn Host,
    ) -> KeyOutcome {
        match key {
            EditKey::Enter => KeyOutcome::Executed(self.submit(context, host)),
            EditKey::ClearScreen => KeyOutcome::Executed(self.execute("clear", context, host)),
            EditKey::Interrupt => {
                let line = self.editor.take();
                let index = self
                    .log
                    .push(CommandRecord::new(line, CommandOutput::text(CANCEL_MARKER)));
                KeyOutcome::Interrupted(index)
            }
            EditKey::Up => changed(self.editor.history_up(&self.history)),
            EditKey::Down => changed(self.editor.history_down(&self.history)),
            EditKey::Tab => changed(self.editor.complete(context.command_names())),
        }
    }

    /// Copy a log entry to the clipboard; false if the index is stale
    pub fn copy_entry(&self, index: usize, host: &mut dyn Host) -> bool {
        let Some(record) = self.log.get(index) else {
            return false;
        };
        host.copy_to_clipboard(&record.copy_text());
        host.toast("Copied to clipboard!");
        true
    }
}

fn changed(buffer_changed: bool) -> KeyOutcome {
    if buffer_changed {
        KeyOutcome::BufferChanged
    } else {
        KeyOutcome::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentId;
    use crate::host::{HostCall, RecordingHost};
    use crate::store::{MemoryStore, StoreError};

    fn terminal() -> Terminal {
        Terminal::new(TerminalOptions::default(), Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_same_command_twice_logs_twice_records_once() {
        let mut term = terminal();
        let mut host = RecordingHost::new(true);

        term.execute("pwd", CommandContext::Global, &mut host);
        term.execute("pwd", CommandContext::Global, &mut host);

        assert_eq!(term.log().len(), 2);
        assert_eq!(term.history().len(), 1);
    }

    #[test]
    fn test_unknown_command_is_text_output() {
        let mut term = terminal();
        let exec = term.execute("frobnicate", CommandContext::Global, &mut RecordingHost::new(true));
        assert_eq!(
            term.log().get(exec.index).unwrap().output,
            CommandOutput::text("Command not found: frobnicate. Type 'help' for available commands.")
        );
    }

    #[test]
    fn test_clear_keeps_history() {
        let mut term = terminal();
        let mut host = RecordingHost::new(true);
        term.execute("about", CommandContext::Global, &mut host);
        term.execute("ls", CommandContext::Global, &mut host);

        let exec = term.execute("clear", CommandContext::Global, &mut host);
        assert!(exec.cleared_log());
        assert_eq!(exec.index, 0);
        assert_eq!(term.log().len(), 1);
        assert_eq!(term.history().iter().collect::<Vec<_>>(), vec!["about", "ls", "clear"]);
    }

    #[test]
    fn test_ctrl_l_runs_clear() {
        let mut term = terminal();
        let mut host = RecordingHost::new(true);
        term.execute("about", CommandContext::Global, &mut host);
        term.set_input("draft");

        let outcome = term.handle_key(EditKey::ClearScreen, CommandContext::Global, &mut host);
        assert!(matches!(outcome, KeyOutcome::Executed(ref e) if e.cleared_log()));
        assert_eq!(term.log().len(), 1);
        assert_eq!(term.input(), "draft");
    }

    #[test]
    fn test_ctrl_c_cancels_without_history() {
        let mut term = terminal();
        let mut host = RecordingHost::new(true);
        term.set_input("neofe");

        let outcome = term.handle_key(EditKey::Interrupt, CommandContext::Global, &mut host);
        assert_eq!(outcome, KeyOutcome::Interrupted(0));
        assert_eq!(term.input(), "");
        assert!(term.history().is_empty());
        assert_eq!(
            term.log().get(0).unwrap(),
            &CommandRecord::new("neofe", CommandOutput::text("^C"))
        );
    }

    #[test]
    fn test_enter_submits_buffer_and_resets_cursor() {
        let mut term = terminal();
        let mut host = RecordingHost::new(true);
        term.execute("ls", CommandContext::Global, &mut host);
        term.execute("about", CommandContext::Global, &mut host);

        assert_eq!(term.handle_key(EditKey::Up, CommandContext::Global, &mut host), KeyOutcome::BufferChanged);
        assert_eq!(term.input(), "about");
        term.handle_key(EditKey::Up, CommandContext::Global, &mut host);
        assert_eq!(term.input(), "ls");

        let outcome = term.handle_key(EditKey::Enter, CommandContext::Global, &mut host);
        assert!(matches!(outcome, KeyOutcome::Executed(_)));
        assert_eq!(term.input(), "");

        // cursor back to one past the end: Up yields the newest entry
        term.handle_key(EditKey::Up, CommandContext::Global, &mut host);
        assert_eq!(term.input(), "ls");
    }

    #[test]
    fn test_tab_uses_context_table() {
        let mut term = terminal();
        let mut host = RecordingHost::new(true);

        term.set_input("th");
        assert_eq!(term.handle_key(EditKey::Tab, CommandContext::Global, &mut host), KeyOutcome::Unchanged);
        assert_eq!(term.handle_key(EditKey::Tab, CommandContext::Settings, &mut host), KeyOutcome::BufferChanged);
        assert_eq!(term.input(), "theme");
    }

    #[test]
    fn test_history_persisted_to_store() {
        struct SharedStore(std::rc::Rc<std::cell::RefCell<MemoryStore>>);

        impl KvStore for SharedStore {
            fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
                self.0.borrow().get(key)
            }
            fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
                self.0.borrow_mut().set(key, value)
            }
        }

        let shared = std::rc::Rc::new(std::cell::RefCell::new(MemoryStore::new()));
        let mut term = Terminal::new(TerminalOptions::default(), Box::new(SharedStore(shared.clone())));
        term.execute("skills", CommandContext::Global, &mut RecordingHost::new(true));

        let restored = Terminal::new(TerminalOptions::default(), Box::new(SharedStore(shared)));
        assert_eq!(restored.history().get(0), Some("skills"));
    }

    #[test]
    fn test_blocks_and_copy() {
        let mut term = terminal();
        let mut host = RecordingHost::new(true);
        let exec = term.execute("contact", CommandContext::Global, &mut host);
        assert_eq!(term.log().get(exec.index).unwrap().output, CommandOutput::Block(ContentId::Contact));

        assert!(term.copy_entry(exec.index, &mut host));
        assert!(!term.copy_entry(99, &mut host));
        assert_eq!(
            host.calls,
            vec![
                HostCall::Copy("contact".into()),
                HostCall::Toast("Copied to clipboard!".into()),
            ]
        );
    }

    #[test]
    fn test_notice_has_no_command() {
        let mut term = terminal();
        let index = term.append_notice(content::SETTINGS_WELCOME);
        assert_eq!(term.log().get(index).unwrap().command, "");
        assert!(term.history().is_empty());
    }
}
