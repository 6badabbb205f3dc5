//! Registry configuration

use std::path::PathBuf;

/// Configuration for [`crate::PluginRegistry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Flat directory holding the plugin libraries
    pub plugin_dir: PathBuf,
    /// Maximum number of loaded plugins, 0 for unlimited
    pub max_loaded: usize,
}

impl RegistryConfig {
    /// Unlimited registry over `plugin_dir`
    pub fn new(plugin_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugin_dir: plugin_dir.into(),
            max_loaded: 0,
        }
    }

    pub fn with_max_loaded(mut self, max_loaded: usize) -> Self {
        self.max_loaded = max_loaded;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unlimited() {
        let config = RegistryConfig::new("/tmp/plugins");
        assert_eq!(config.plugin_dir, PathBuf::from("/tmp/plugins"));
        assert_eq!(config.max_loaded, 0);
    }

    #[test]
    fn test_with_max_loaded() {
        let config = RegistryConfig::new("/tmp/plugins").with_max_loaded(3);
        assert_eq!(config.max_loaded, 3);
    }
}
