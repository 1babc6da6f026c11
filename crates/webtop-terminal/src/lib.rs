//! Webtop Terminal - command interpreter for the simulated desktop
//!
//! Parses and executes text commands against a two-tier command table,
//! keeps a bounded, persisted command history and an append-only output log.

pub mod command;
pub mod content;
pub mod editor;
pub mod history;
pub mod host;
pub mod output;
pub mod settings;
pub mod store;
pub mod term;

pub use command::{CommandContext, CommandError, CommandOutput, Effect};
pub use content::ContentId;
pub use history::CommandHistory;
pub use host::{Download, Host, HostCall, RecordingHost};
pub use output::{CommandRecord, OutputLog, Typewriter};
pub use settings::{Appearance, Layout, Theme};
pub use store::{FileStore, KvStore, MemoryStore, StoreError};
pub use term::{EditKey, Execution, KeyOutcome, Terminal, TerminalOptions};
