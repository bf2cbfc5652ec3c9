//! Process-wide settings handed to the session at construction

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::config::{AppConfig, Theme};

/// Owns the configuration and its backing file. Reads happen once at
/// start-up; every mutation is written straight back.
#[derive(Debug, Clone)]
pub struct Settings {
    config: AppConfig,
    path: Option<PathBuf>,
    system_dark: bool,
}

impl Settings {
    /// Load from the platform config location
    pub fn load(system_dark: bool) -> Self {
        Self::load_from(AppConfig::config_path(), system_dark)
    }

    /// Load from `path`; `None` keeps settings in memory only
    pub fn load_from(path: Option<PathBuf>, system_dark: bool) -> Self {
        let config = match path.as_deref() {
            Some(path) => AppConfig::load_from(path).unwrap_or_else(|e| {
                tracing::warn!("Using default config: {:#}", e);
                AppConfig::default()
            }),
            None => {
                tracing::warn!("Could not determine config directory, settings will not persist");
                AppConfig::default()
            }
        };
        Self {
            config,
            path,
            system_dark,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_dark_mode(&self) -> bool {
        self.config
            .theme
            .map(Theme::is_dark)
            .unwrap_or(self.system_dark)
    }

    pub fn set_dark_mode(&mut self, dark: bool) -> Result<()> {
        self.config.theme = Some(Theme::from_dark(dark));
        self.persist()
    }

    pub fn remember_download_dir(&mut self, dir: &Path) -> Result<()> {
        if self.config.last_download_dir.as_deref() == Some(dir) {
            return Ok(());
        }
        self.config.last_download_dir = Some(dir.to_path_buf());
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        match &self.path {
            Some(path) => self.config.save_to(path),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_theme_follows_system() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(Settings::load_from(Some(path.clone()), true).is_dark_mode());
        assert!(!Settings::load_from(Some(path), false).is_dark_mode());
    }

    #[test]
    fn test_toggle_persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut settings = Settings::load_from(Some(path.clone()), false);
        settings.set_dark_mode(true).unwrap();
        assert!(settings.is_dark_mode());

        let reloaded = Settings::load_from(Some(path.clone()), false);
        assert!(reloaded.is_dark_mode());

        let mut settings = reloaded;
        settings.set_dark_mode(false).unwrap();
        assert!(!Settings::load_from(Some(path), true).is_dark_mode());
    }

    #[test]
    fn test_corrupt_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "][").unwrap();
        let settings = Settings::load_from(Some(path), true);
        assert!(settings.config().theme.is_none());
        assert!(settings.is_dark_mode());
    }

    #[test]
    fn test_in_memory_settings() {
        let mut settings = Settings::load_from(None, false);
        settings.set_dark_mode(true).unwrap();
        assert!(settings.is_dark_mode());
        settings.remember_download_dir(Path::new("/tmp/downloads")).unwrap();
        assert_eq!(
            settings.config().last_download_dir.as_deref(),
            Some(Path::new("/tmp/downloads"))
        );
    }
}
