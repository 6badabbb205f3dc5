pub mod list;
pub mod run;

use clap::Args;
use plugrack_core::RegistryConfig;
use std::path::PathBuf;

/// Arguments shared by every command that opens a registry
#[derive(Args, Debug)]
pub struct RegistryArgs {
    /// Path to the plugin directory
    #[arg(long = "plugin_dir", visible_alias = "plugin-dir", value_name = "PATH")]
    pub plugin_dir: PathBuf,
}

impl RegistryArgs {
    pub fn registry_config(&self, max_loaded: usize) -> RegistryConfig {
        RegistryConfig::new(self.plugin_dir.clone()).with_max_loaded(max_loaded)
    }
}
