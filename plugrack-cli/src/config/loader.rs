use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::types::FileConfig;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, the user config file is read
    /// when present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let user_path = Self::user_config_path();
        if user_path.exists() {
            return Self::load_file(&user_path);
        }

        Ok(FileConfig::default())
    }

    /// `$XDG_CONFIG_HOME/plugrack/config.toml`, falling back to
    /// `~/.config/plugrack/config.toml`. XDG is used on every platform.
    pub fn user_config_path() -> PathBuf {
        let base = match std::env::var_os("XDG_CONFIG_HOME") {
            Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
            _ => dirs::home_dir()
                .map(|home| home.join(".config"))
                .unwrap_or_else(|| PathBuf::from(".config")),
        };
        base.join("plugrack").join("config.toml")
    }

    fn load_file(path: &Path) -> Result<FileConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }
}
