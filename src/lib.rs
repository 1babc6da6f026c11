//! Webtop - simulated desktop shell core
//!
//! Window manager, taskbar binder and shell controller for a desktop rendered
//! by an external surface. The terminal interpreter lives in `webtop-terminal`
//! and the wire protocol in `webtop-ipc`.

pub mod config;
pub mod shared;
pub mod shell;
pub mod wm;

pub use config::Config;
pub use shell::Shell;
pub use wm::{WindowManager, WmError};
