//! plugrack-core - discover, load and track native plugins
//!
//! - [`PluginRegistry`]: scans a plugin directory, imports plugins on demand and
//!   tracks which ones are loaded, with an optional cap on how many
//! - [`ModuleLoader`]: the seam between the registry and whatever turns a plugin
//!   file into a module handle; [`DylibLoader`] is the shared-library default
//! - [`RegistryError`]: error types for registry operations
//!
//! # Plugin Directory
//!
//! The plugin directory is flat. Every `<name>.so` (`.dylib` on macOS, `.dll`
//! on Windows) directly inside it is a plugin named `<name>`. Subdirectories
//! are not scanned.
//!
//! # Example
//!
//! ```ignore
//! use plugrack_core::{PluginRegistry, RegistryConfig};
//!
//! let mut registry = PluginRegistry::new(RegistryConfig::new("./plugins"));
//! registry.import_one("hello")?;
//!
//! if let Some(module) = registry.get_loaded_module("hello") {
//!     module.create_plugin()?.execute()?;
//! }
//! ```

mod config;
mod error;
mod loader;
mod registry;

pub use config::RegistryConfig;
pub use error::{ExecuteError, LoadError, RegistryError};
pub use loader::{DylibLoader, DylibModule, ModuleLoader, PLUGIN_EXTENSION, PluginInstance};
pub use registry::{ImportOutcome, ImportReport, PluginDescriptor, PluginRecord, PluginRegistry};
