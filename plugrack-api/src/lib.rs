//! plugrack-api - Plugin API for the plugrack plugin registry
//!
//! Plugins are native Rust dynamic libraries. Each one exposes a single type
//! implementing [`Plugin`] and exports it with [`export_plugin!`], which
//! generates the C ABI entry points the registry resolves after loading the
//! library.
//!
//! # Example
//!
//! ```ignore
//! use plugrack_api::{Plugin, PluginError, export_plugin};
//!
//! #[derive(Default)]
//! pub struct MyPlugin;
//!
//! impl Plugin for MyPlugin {
//!     fn execute(&mut self) -> Result<(), PluginError> {
//!         println!("Hello from my plugin");
//!         Ok(())
//!     }
//! }
//!
//! export_plugin!(MyPlugin);
//! ```

pub mod error;

pub use error::PluginError;

/// Current plugin API version. Plugins must match this exactly.
/// The loader checks it before creating any plugin instance.
pub const API_VERSION: u32 = 1;

/// Symbol returning the API version a plugin was built against.
pub const API_VERSION_SYMBOL: &[u8] = b"_plugrack_plugin_api_version";

/// Symbol constructing a boxed plugin instance.
pub const CREATE_SYMBOL: &[u8] = b"_plugrack_plugin_create";

/// The core plugin trait - implement this to create a plugrack plugin.
///
/// The implementing type must be `Default`, which is how the generated
/// entry point constructs it without arguments.
pub trait Plugin: Send {
    /// Run the plugin.
    fn execute(&mut self) -> Result<(), PluginError>;

    /// Short human-readable description, shown by `plugrack list`.
    fn description(&self) -> &str {
        ""
    }
}

/// Export a plugin type for dynamic loading.
///
/// # Usage
///
/// ```ignore
/// plugrack_api::export_plugin!(MyPlugin);
/// ```
///
/// # Generated Functions
///
/// - `_plugrack_plugin_api_version()`: Returns the API version
/// - `_plugrack_plugin_create()`: Creates a new plugin instance
#[macro_export]
macro_rules! export_plugin {
    ($plugin_type:ty) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn _plugrack_plugin_api_version() -> u32 {
            $crate::API_VERSION
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn _plugrack_plugin_create() -> *mut dyn $crate::Plugin {
            let plugin: Box<dyn $crate::Plugin> = Box::new(<$plugin_type>::default());
            Box::into_raw(plugin)
        }
    };
}
