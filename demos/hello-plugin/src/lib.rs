//! Hello Plugin - A simple example plugin for plugrack
//!
//! ## Building
//!
//! ```bash
//! cargo build --release
//! ```
//!
//! ## Running
//!
//! ```bash
//! mkdir -p /tmp/plugins
//! cp target/release/libhello_plugin.so /tmp/plugins/hello.so
//! plugrack run --plugin_dir /tmp/plugins --plugin_name hello
//! ```

use plugrack_api::{Plugin, PluginError, export_plugin};

/// Greets whoever `HELLO_NAME` names, or the world.
#[derive(Default)]
pub struct HelloPlugin;

impl Plugin for HelloPlugin {
    fn execute(&mut self) -> Result<(), PluginError> {
        let name = std::env::var("HELLO_NAME").unwrap_or_else(|_| "world".to_string());
        if name.trim().is_empty() {
            return Err(PluginError::invalid_input("HELLO_NAME is blank"));
        }
        println!("Hello, {}!", name);
        Ok(())
    }

    fn description(&self) -> &str {
        "Prints a greeting"
    }
}

// This macro generates the C ABI entry points for dynamic loading
export_plugin!(HelloPlugin);
