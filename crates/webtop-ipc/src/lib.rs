//! Webtop IPC Protocol
//!
//! Shared message types between the window manager core (`webtop`) and the
//! surface that presents it. The surface sends [`ShellCommand`]s describing
//! user input and receives [`WmEvent`]s describing state transitions.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Stable, session-unique window identifier.
pub type WindowId = String;

// ============================================================================
// Window vocabulary
// ============================================================================

/// Screen edge a window can be snapped against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Lifecycle state of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "edge", rename_all = "lowercase")]
pub enum WindowState {
    Closed,
    Normal,
    Minimized,
    Maximized,
    Snapped(SnapEdge),
}

impl WindowState {
    /// Whether the window is laid out on screen (not closed, not minimized)
    pub fn is_shown(self) -> bool {
        !matches!(self, WindowState::Closed | WindowState::Minimized)
    }
}

/// Window rectangle in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Window information for state sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowInfo {
    pub id: WindowId,
    pub kind: String,
    pub title: String,
    pub state: WindowState,
    /// `None` while closed or maximized
    pub bounds: Option<Bounds>,
    pub z_order: i64,
    pub active: bool,
    /// Still rendered (includes windows mid close/minimize animation)
    pub visible: bool,
}

/// Taskbar button as rendered by the surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarButton {
    pub id: WindowId,
    pub icon: String,
    pub active: bool,
}

/// One row of the Alt+Tab preview strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewItem {
    pub id: WindowId,
    pub title: String,
    pub selected: bool,
}

/// Visual transition played before a state change settles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    Opening,
    Minimizing,
    Closing,
}

/// Terminal output payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum OutputPayload {
    Empty,
    /// Plain text, revealed with the typewriter animation
    Text(String),
    /// Structured content block, inserted immediately
    Block(String),
}

// ============================================================================
// WM → Surface Events
// ============================================================================

/// Events sent from the window manager / shell to the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WmEvent {
    /// A window left the closed or minimized state
    WindowOpened {
        id: WindowId,
        kind: String,
        title: String,
    },

    /// A window was minimized (its taskbar entry stays)
    WindowMinimized { id: WindowId },

    /// A window was closed
    WindowClosed { id: WindowId },

    /// Lifecycle state changed
    WindowStateChanged { id: WindowId, state: WindowState },

    /// A window was moved or resized
    WindowGeometryChanged {
        id: WindowId,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// A window was raised to the given stacking rank
    WindowRaised { id: WindowId, z_order: i64 },

    /// The active window changed (`None` when nothing is active)
    FocusChanged { active: Option<WindowId> },

    /// A window drag started
    WindowDragStarted { id: WindowId },

    /// A window drag ended
    WindowDragEnded { id: WindowId },

    /// Snap guide to display during a drag (`None` hides all guides)
    SnapGuide { edge: Option<SnapEdge> },

    /// A visual transition started; report `TransitionElapsed` after `delay_ms`
    TransitionScheduled {
        id: WindowId,
        transition: TransitionKind,
        generation: u64,
        delay_ms: u64,
    },

    /// A visual transition settled
    TransitionFinished { id: WindowId },

    /// Taskbar contents changed
    TaskbarUpdated { buttons: Vec<TaskbarButton> },

    /// Alt+Tab preview strip contents
    CyclePreview { items: Vec<PreviewItem> },

    /// Alt+Tab preview strip hidden
    CyclePreviewHidden,

    /// App launcher visibility changed
    LauncherToggled { visible: bool },

    /// A block was appended to the terminal output log
    TerminalOutput {
        index: usize,
        prompt: String,
        command: String,
        output: OutputPayload,
    },

    /// The terminal output log was emptied
    TerminalCleared,

    /// The terminal input line changed without executing
    TerminalInputChanged { text: String },

    /// Appearance preferences changed through the settings terminal
    AppearanceChanged {
        theme: String,
        font_size: Option<u8>,
        layout: String,
        animations: bool,
    },

    /// Full state sync (sent on request)
    SyncState {
        windows: Vec<WindowInfo>,
        focused_window: Option<WindowId>,
    },
}

// ============================================================================
// Surface → Shell Commands
// ============================================================================

bitflags! {
    /// Keyboard modifiers held during a key event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const ALT = 1 << 0;
        const SHIFT = 1 << 1;
        const CTRL = 1 << 2;
        const META = 1 << 3;
    }
}

/// Keys the shell reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Tab,
    Enter,
    F4,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Backquote,
    Alt,
    Meta,
    Char(char),
}

/// Title bar buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowControl {
    Minimize,
    Maximize,
    Close,
}

/// Commands sent from the surface to the shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShellCommand {
    /// Desktop icon clicked
    ActivateIcon { app: String },

    /// Click on the desktop background (dismisses the launcher)
    DesktopClick,

    /// Launcher button in the taskbar
    LauncherButton,

    /// Entry picked in the app launcher
    LauncherSelect { app: String },

    /// Taskbar entry clicked
    TaskbarClick { id: WindowId },

    /// Pointer pressed anywhere on a window
    WindowMouseDown { id: WindowId },

    /// Pointer pressed on a window header (starts a drag)
    HeaderMouseDown { id: WindowId, x: i32, y: i32 },

    /// Header double-clicked
    HeaderDoubleClick { id: WindowId },

    /// Pointer moved
    PointerMove { x: i32, y: i32 },

    /// Pointer released
    PointerUp,

    /// Title bar button clicked
    Control { id: WindowId, control: WindowControl },

    /// Key pressed
    KeyDown {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },

    /// Key released
    KeyUp { key: Key },

    /// Terminal input line edited by the user
    TerminalInput { text: String },

    /// Type a line into the terminal and submit it
    RunCommand { line: String },

    /// Output log entry clicked (click-to-copy)
    CopyEntry { index: usize },

    /// Viewport resized
    ViewportResized { width: u32, height: u32 },

    /// A scheduled transition timer fired
    TransitionElapsed { id: WindowId, generation: u64 },

    /// Request a full state sync
    Sync,
}

// ============================================================================
// Message Framing
// ============================================================================

/// A single JSON document terminated by a newline
#[derive(Debug)]
pub struct JsonLine {
    pub data: String,
}

impl JsonLine {
    /// Create a new line from serializable data
    pub fn new<T: Serialize>(msg: &T) -> anyhow::Result<Self> {
        let data = serde_json::to_string(msg)?;
        Ok(Self { data })
    }

    /// Encode message with its line terminator
    pub fn encode(&self) -> String {
        let mut line = String::with_capacity(self.data.len() + 1);
        line.push_str(&self.data);
        line.push('\n');
        line
    }

    /// Decode a WM event from one line
    pub fn decode_wm_event(line: &str) -> anyhow::Result<WmEvent> {
        Ok(serde_json::from_str(line.trim_end())?)
    }

    /// Decode a shell command from one line
    pub fn decode_shell_command(line: &str) -> anyhow::Result<ShellCommand> {
        Ok(serde_json::from_str(line.trim_end())?)
    }
}
