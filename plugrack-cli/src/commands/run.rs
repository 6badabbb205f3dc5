//! Plugin execution commands

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use plugrack_core::{DylibModule, PluginRegistry};

use super::RegistryArgs;

/// Arguments for `plugrack run`
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    /// Name of the plugin to run (its file name without extension)
    #[arg(long = "plugin_name", visible_alias = "plugin-name", value_name = "NAME")]
    pub plugin_name: String,
}

/// Arguments for `plugrack run-all`
#[derive(Args, Debug)]
pub struct RunAllArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,
}

/// Import one plugin and execute it
pub fn run(args: RunArgs, max_loaded: usize) -> Result<()> {
    let mut registry = PluginRegistry::new(args.registry.registry_config(max_loaded));
    let name = args.plugin_name.as_str();

    registry
        .import_one(name)
        .with_context(|| format!("Failed to import plugin '{}'", name))?;

    let module = registry
        .get_loaded_module(name)
        .ok_or_else(|| anyhow!("Plugin '{}' was not loaded", name))?;

    execute(&module)
}

/// Import every plugin and execute each loaded one in discovery order.
///
/// Every plugin is attempted; the command fails afterwards if any import or
/// execution failed, naming each failed plugin with its cause.
pub fn run_all(args: RunAllArgs, max_loaded: usize) -> Result<()> {
    let mut registry = PluginRegistry::new(args.registry.registry_config(max_loaded));

    let report = registry.import_all().context("Failed to scan plugin directory")?;
    let mut failed: Vec<(String, anyhow::Error)> = report
        .failures
        .into_iter()
        .map(|(name, e)| (name, anyhow::Error::from(e)))
        .collect();

    for descriptor in registry.list_available()? {
        let Some(module) = registry.get_loaded_module(&descriptor.name) else {
            continue;
        };

        if let Err(e) = execute(&module) {
            tracing::error!(plugin = %descriptor.name, error = %format!("{:#}", e), "Plugin run failed");
            failed.push((descriptor.name, e));
        }
    }

    if !failed.is_empty() {
        bail!("{}", failure_summary(&failed));
    }

    Ok(())
}

fn failure_summary(failed: &[(String, anyhow::Error)]) -> String {
    let causes: Vec<String> = failed
        .iter()
        .map(|(name, e)| format!("{} ({:#})", name, e))
        .collect();
    format!("{} plugin(s) failed: {}", failed.len(), causes.join("; "))
}

fn execute(module: &DylibModule) -> Result<()> {
    let mut plugin = module
        .create_plugin()
        .with_context(|| format!("Failed to create plugin '{}'", module.name()))?;
    plugin.execute()?;
    Ok(())
}
