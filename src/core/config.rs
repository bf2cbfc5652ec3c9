//! Application configuration management

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Colour scheme stored as `"dark"` / `"light"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Saved theme; `None` follows the system setting
    pub theme: Option<Theme>,
    /// Directory holding the PDF resources
    pub library_dir: Option<PathBuf>,
    /// Catalog JSON used instead of the bundled one
    pub catalog_path: Option<PathBuf>,
    /// Directory the last download was saved to
    pub last_download_dir: Option<PathBuf>,
    /// UI settings
    pub ui: UiConfig,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Width of a document card in points
    pub card_width: f32,
    /// How long notices stay on screen, in seconds
    pub notice_seconds: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            card_width: 280.0,
            notice_seconds: 3.0,
        }
    }
}

impl UiConfig {
    const CARD_WIDTH: RangeInclusive<f32> = 200.0..=800.0;
    const NOTICE_SECONDS: RangeInclusive<f32> = 0.5..=60.0;

    /// Reset values outside their accepted range to the defaults
    fn sanitize(&mut self) {
        let defaults = Self::default();
        if !Self::CARD_WIDTH.contains(&self.card_width) {
            tracing::warn!("Ignoring ui.card_width = {}, using {}", self.card_width, defaults.card_width);
            self.card_width = defaults.card_width;
        }
        if !Self::NOTICE_SECONDS.contains(&self.notice_seconds) {
            tracing::warn!(
                "Ignoring ui.notice_seconds = {}, using {}",
                self.notice_seconds,
                defaults.notice_seconds
            );
            self.notice_seconds = defaults.notice_seconds;
        }
    }

    /// How long a notice stays on screen
    pub fn notice_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.notice_seconds)
            .unwrap_or_else(|_| Duration::from_secs_f32(Self::default().notice_seconds))
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "learnscape", "LearnScape")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Malformed config: {}", path.display()))?;
        config.ui.sanitize();
        Ok(config)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Library directory, defaulting to the platform data dir
    pub fn library_dir(&self) -> PathBuf {
        self.library_dir.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|dirs| dirs.data_dir().join("library"))
                .unwrap_or_else(|| PathBuf::from("library"))
        })
    }
}
