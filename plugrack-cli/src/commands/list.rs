//! Plugin listing command

use anyhow::Result;
use clap::Args;
use plugrack_core::{PLUGIN_EXTENSION, PluginRegistry};

use super::RegistryArgs;

/// Arguments for `plugrack list`
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    /// Load each plugin to show its description
    #[arg(long)]
    pub describe: bool,
}

/// Print the plugins found in the plugin directory
pub fn run(args: ListArgs, max_loaded: usize) -> Result<()> {
    let mut registry = PluginRegistry::new(args.registry.registry_config(max_loaded));
    let available = registry.list_available()?;

    if available.is_empty() {
        println!("No plugins found");
        println!();
        println!("Plugin directory: {}", registry.plugin_dir().display());
        println!();
        println!("To add a plugin, copy its library into the directory:");
        println!(
            "  cp target/release/libmy_plugin.{ext} {}/my_plugin.{ext}",
            registry.plugin_dir().display(),
            ext = PLUGIN_EXTENSION
        );
        return Ok(());
    }

    if !args.describe {
        for descriptor in &available {
            println!("{}", descriptor.name);
        }
        return Ok(());
    }

    let report = registry.import_all()?;

    for descriptor in &available {
        let description = match registry.get_loaded_module(&descriptor.name) {
            Some(module) => match module.create_plugin() {
                Ok(plugin) if plugin.description().is_empty() => "No description".to_string(),
                Ok(plugin) => plugin.description().to_string(),
                Err(e) => format!("✗ {}", e),
            },
            None => match report.failures.iter().find(|(name, _)| *name == descriptor.name) {
                Some((_, e)) => match std::error::Error::source(e) {
                    Some(cause) => format!("✗ {}: {}", e, cause),
                    None => format!("✗ {}", e),
                },
                None => "(not loaded)".to_string(),
            },
        };

        println!("{}    {}", descriptor.name, description);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ListArgs,
    }

    #[test]
    fn test_list_args_parsing() {
        let cli = TestCli::parse_from(["test", "--plugin_dir", "/plugins"]);
        assert_eq!(cli.args.registry.plugin_dir, PathBuf::from("/plugins"));
        assert!(!cli.args.describe);

        let cli = TestCli::parse_from(["test", "--plugin_dir", "/plugins", "--describe"]);
        assert!(cli.args.describe);
    }

    #[test]
    fn test_list_args_require_plugin_dir() {
        assert!(TestCli::try_parse_from(["test"]).is_err());
    }

    #[test]
    fn test_list_empty_dir() {
        let dir = TempDir::new().unwrap();
        let args = ListArgs {
            registry: RegistryArgs {
                plugin_dir: dir.path().to_path_buf(),
            },
            describe: true,
        };
        run(args, 0).unwrap();
    }

    #[test]
    fn test_list_describe_tolerates_broken_plugin() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            plugrack_core::DylibLoader::library_path(dir.path(), "broken"),
            b"not a library",
        )
        .unwrap();
        let args = ListArgs {
            registry: RegistryArgs {
                plugin_dir: dir.path().to_path_buf(),
            },
            describe: true,
        };
        run(args, 0).unwrap();
    }
}
