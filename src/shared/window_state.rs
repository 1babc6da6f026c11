//! Shared window state between the window manager and the shell
//!
//! Geometry, viewport and window-kind vocabulary used by both halves.

use serde::{Deserialize, Serialize};
use webtop_ipc::Bounds;

pub use webtop_ipc::{SnapEdge, WindowId, WindowState};

/// Window geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Same size, new origin
    pub fn with_origin(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }
}

impl From<Geometry> for Bounds {
    fn from(g: Geometry) -> Self {
        Bounds {
            x: g.x,
            y: g.y,
            width: g.width,
            height: g.height,
        }
    }
}

/// Desktop area in pixels; the taskbar overlays it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Largest x a window of `width` can take while staying inside
    pub fn max_x(&self, width: u32) -> i32 {
        self.width.saturating_sub(width) as i32
    }

    /// Largest y a window of `height` can take while staying inside
    pub fn max_y(&self, height: u32) -> i32 {
        self.height.saturating_sub(height) as i32
    }
}

/// Application kind behind a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    About,
    Skills,
    Projects,
    Terminal,
    Settings,
    Profile,
    /// File manager, created lazily on first open
    Home,
    Contact,
    Cv,
    #[serde(other)]
    Other,
}

impl WindowKind {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "about" => WindowKind::About,
            "skills" => WindowKind::Skills,
            "projects" => WindowKind::Projects,
            "terminal" => WindowKind::Terminal,
            "settings" => WindowKind::Settings,
            "profile" => WindowKind::Profile,
            "home" | "file-manager" => WindowKind::Home,
            "contact" => WindowKind::Contact,
            "cv" => WindowKind::Cv,
            _ => WindowKind::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WindowKind::About => "about",
            WindowKind::Skills => "skills",
            WindowKind::Projects => "projects",
            WindowKind::Terminal => "terminal",
            WindowKind::Settings => "settings",
            WindowKind::Profile => "profile",
            WindowKind::Home => "home",
            WindowKind::Contact => "contact",
            WindowKind::Cv => "cv",
            WindowKind::Other => "other",
        }
    }

    /// Taskbar icon; unknown kinds fall back to a generic window icon
    pub fn icon(self) -> &'static str {
        match self {
            WindowKind::About => "user",
            WindowKind::Skills => "code",
            WindowKind::Projects => "folder",
            WindowKind::Terminal => "terminal",
            WindowKind::Contact => "envelope",
            WindowKind::Cv => "file-pdf",
            _ => "window-maximize",
        }
    }

    /// Kinds instantiated on first open rather than pre-declared
    pub fn is_dynamic(self) -> bool {
        matches!(self, WindowKind::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_lookup_has_default() {
        assert_eq!(WindowKind::Skills.icon(), "code");
        assert_eq!(WindowKind::Cv.icon(), "file-pdf");
        assert_eq!(WindowKind::Settings.icon(), "window-maximize");
        assert_eq!(WindowKind::from_name("mystery").icon(), "window-maximize");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(WindowKind::from_name("File-Manager"), WindowKind::Home);
        assert_eq!(WindowKind::from_name("TERMINAL").as_str(), "terminal");
        let kind: WindowKind = serde_json::from_str("\"gallery\"").unwrap();
        assert_eq!(kind, WindowKind::Other);
    }

    #[test]
    fn test_viewport_bounds_never_negative() {
        let viewport = Viewport::new(640, 480);
        assert_eq!(viewport.max_x(800), 0);
        assert_eq!(viewport.max_y(400), 80);
    }
}
