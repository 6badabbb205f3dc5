//! Errors a plugin returns from `execute`

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PluginError {
    /// The plugin was given input it cannot work with, e.g. a blank
    /// environment variable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Anything else the plugin wants to report
    #[error("{0}")]
    Custom(String),
}

impl PluginError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}
