//! Registry and loader error types

use std::path::PathBuf;
use thiserror::Error;

use plugrack_api::PluginError;

/// Errors raised while turning a plugin file into a module handle
#[derive(Error, Debug)]
pub enum LoadError {
    /// Failed to open the dynamic library or resolve one of its symbols
    #[error("Failed to load plugin library: {0}")]
    Library(#[from] libloading::Error),

    /// API version mismatch between plugrack and plugin
    #[error("API version mismatch: plugrack expects {expected}, plugin has {found}")]
    ApiVersionMismatch { expected: u32, found: u32 },

    /// Failure reported by a non-library loader
    #[error("{0}")]
    Custom(String),
}

impl LoadError {
    /// Create a custom load error with a message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Errors that can occur in registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No plugin file with this name in the plugin directory
    #[error("{name} not found in {}", dir.display())]
    NotFound { name: String, dir: PathBuf },

    /// The loader failed; the cause is kept as the error source
    #[error("Failed to load plugin '{name}'")]
    Load {
        name: String,
        #[source]
        source: LoadError,
    },

    /// Removal requested for a plugin that is not tracked
    #[error("Plugin '{name}' is not loaded")]
    NotLoaded { name: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while running a plugin instance
#[derive(Error, Debug)]
pub enum ExecuteError {
    /// The plugin returned an error from `execute`
    #[error("Plugin '{name}' failed")]
    Plugin {
        name: String,
        #[source]
        source: PluginError,
    },

    /// The plugin panicked inside `execute`
    #[error("Plugin '{name}' panicked during execute")]
    Panicked { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_not_found_display() {
        let err = RegistryError::NotFound {
            name: "does_not_exist".to_string(),
            dir: PathBuf::from("/srv/plugins"),
        };
        let msg = err.to_string();
        assert!(msg.contains("does_not_exist"));
        assert!(msg.contains("/srv/plugins"));
    }

    #[test]
    fn test_load_error_keeps_cause() {
        let err = RegistryError::Load {
            name: "broken".to_string(),
            source: LoadError::custom("missing symbol"),
        };
        assert!(err.to_string().contains("broken"));
        let cause = err.source().expect("load error should carry its cause");
        assert_eq!(cause.to_string(), "missing symbol");
    }

    #[test]
    fn test_not_loaded_display() {
        let err = RegistryError::NotLoaded {
            name: "ghost".to_string(),
        };
        assert_eq!(err.to_string(), "Plugin 'ghost' is not loaded");
    }

    #[test]
    fn test_api_version_mismatch_display() {
        let err = LoadError::ApiVersionMismatch {
            expected: 1,
            found: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("1"));
        assert!(msg.contains("2"));
    }

    #[test]
    fn test_execute_error_keeps_plugin_error() {
        let err = ExecuteError::Plugin {
            name: "hello".to_string(),
            source: PluginError::custom("boom"),
        };
        assert!(err.to_string().contains("hello"));
        assert_eq!(err.source().map(|e| e.to_string()), Some("boom".to_string()));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RegistryError = io_err.into();
        assert!(matches!(err, RegistryError::Io(_)));
    }
}
