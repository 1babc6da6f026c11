//! Configuration system for the Webtop shell
//!
//! Loads configuration from TOML file at `~/.config/webtop/config.toml`
//! Auto-generates default config file on first run if missing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::shared::WindowKind;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewport: ViewportConfig,
    pub window_manager: WindowManagerConfig,
    pub terminal: TerminalConfig,
    pub windows: Vec<WindowConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            window_manager: WindowManagerConfig::default(),
            terminal: TerminalConfig::default(),
            windows: default_windows(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path, generating a default file when missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found at {:?}, using defaults", config_path);
            // Auto-generate default config file
            if let Err(e) = Self::save_default(config_path) {
                warn!("Failed to create default config file: {}", e);
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .context("Failed to read config file")?;

        let mut config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;
        if config.windows.is_empty() {
            config.windows = default_windows();
        }

        info!("Configuration loaded from {:?}", config_path);
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Get the path to the config file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("webtop");

        Ok(config_dir.join("config.toml"))
    }

    /// Save default configuration to file
    fn save_default(path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let default_config = Self::default();
        let toml_string = toml::to_string_pretty(&default_config)
            .context("Failed to serialize default config")?;

        fs::write(path, toml_string)
            .context("Failed to write default config file")?;

        info!("Created default config file at {:?}", path);
        Ok(())
    }
}

/// Desktop viewport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Taskbar height; offsets the top snap zone
    pub taskbar_height: i32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            taskbar_height: 28,
        }
    }
}

/// What reopening a closed window looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosePolicy {
    /// Reopen at the last normal geometry
    Recoverable,
    /// Reopen centered at the default size
    Fresh,
}

/// Alt+Tab behaviour for minimized windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleMinimized {
    /// Include them; committing restores and focuses
    Restore,
    /// Leave them out of the cycle
    Skip,
}

/// Window manager configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowManagerConfig {
    /// Snap zone width from each edge, in pixels
    pub snap_threshold: i32,
    /// Open/minimize/close animation length
    pub transition_ms: u64,
    pub close_policy: ClosePolicy,
    pub cycle_minimized: CycleMinimized,
    /// Size of a window opened for the first time
    pub default_width: u32,
    pub default_height: u32,
    /// Base z-order; the first focused window gets one above it
    pub initial_z: i64,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 50,
            transition_ms: 300,
            close_policy: ClosePolicy::Recoverable,
            cycle_minimized: CycleMinimized::Restore,
            default_width: 800,
            default_height: 600,
            initial_z: 100,
        }
    }
}

/// Terminal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub prompt: String,
    /// Typewriter delay per character
    pub typing_speed_ms: u64,
    /// Maximum stored history entries
    pub history_limit: usize,
    /// Key the history is stored under
    pub history_key: String,
    /// Key-value store file (defaults to the user data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
    /// Answer yes to confirmation prompts (headless console)
    pub auto_confirm: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: webtop_terminal::content::PROMPT.to_string(),
            typing_speed_ms: 50,
            history_limit: webtop_terminal::history::DEFAULT_HISTORY_LIMIT,
            history_key: webtop_terminal::history::DEFAULT_HISTORY_KEY.to_string(),
            store_path: None,
            auto_confirm: true,
        }
    }
}

impl TerminalConfig {
    /// Store file, falling back to `<data dir>/webtop/store.json`
    pub fn store_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .context("Failed to get data directory")?
            .join("webtop");
        Ok(data_dir.join("store.json"))
    }
}

/// Pre-declared window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub id: String,
    pub kind: WindowKind,
    pub title: String,
}

impl WindowConfig {
    fn new(id: &str, kind: WindowKind, title: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.to_string(),
        }
    }
}

fn default_windows() -> Vec<WindowConfig> {
    vec![
        WindowConfig::new("about", WindowKind::About, "About Me"),
        WindowConfig::new("skills", WindowKind::Skills, "Skills"),
        WindowConfig::new("projects", WindowKind::Projects, "Projects"),
        WindowConfig::new("terminal", WindowKind::Terminal, "Terminal"),
        WindowConfig::new("settings", WindowKind::Settings, "Settings"),
        WindowConfig::new("profile", WindowKind::Profile, "Profile"),
        WindowConfig::new("contact", WindowKind::Contact, "Contact"),
        WindowConfig::new("cv", WindowKind::Cv, "CV"),
    ]
}
