use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;

use config::ConfigLoader;

#[derive(Parser)]
#[command(name = "plugrack", about = "Load and run plugins from a plugin directory")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.config/plugrack/config.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of plugins to load, 0 for unlimited (overrides the config file)
    #[arg(long, global = true, value_name = "N")]
    max_loaded: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a single plugin and execute it
    Run(commands::run::RunArgs),
    /// Import every plugin in the directory and execute them
    RunAll(commands::run::RunAllArgs),
    /// List plugins in the directory
    List(commands::list::ListArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("plugrack has crashed. Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let file_config = ConfigLoader::load(cli.config.as_deref())?;
    let max_loaded = file_config.max_loaded(cli.max_loaded);

    match cli.command {
        Commands::Run(args) => commands::run::run(args, max_loaded),
        Commands::RunAll(args) => commands::run::run_all(args, max_loaded),
        Commands::List(args) => commands::list::run(args, max_loaded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::parse_from([
            "plugrack",
            "run",
            "--plugin_dir",
            "/plugins",
            "--plugin_name",
            "hello",
        ]);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
        assert!(matches!(
            cli.command,
            Commands::Run(args) if args.plugin_name == "hello"
                && args.registry.plugin_dir == PathBuf::from("/plugins")
        ));
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "plugrack",
            "run-all",
            "--plugin_dir",
            "/plugins",
            "-v",
            "--config",
            "/etc/plugrack.toml",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/plugrack.toml")));
        assert!(matches!(cli.command, Commands::RunAll(_)));
    }

    #[test]
    fn test_cli_max_loaded_is_global() {
        let before = Cli::parse_from([
            "plugrack",
            "--max-loaded",
            "2",
            "run-all",
            "--plugin_dir",
            "/plugins",
        ]);
        assert_eq!(before.max_loaded, Some(2));

        let after = Cli::parse_from([
            "plugrack",
            "run",
            "--plugin_dir",
            "/plugins",
            "--plugin_name",
            "hello",
            "--max-loaded",
            "3",
        ]);
        assert_eq!(after.max_loaded, Some(3));

        let unset = Cli::parse_from(["plugrack", "list", "--plugin_dir", "/plugins"]);
        assert_eq!(unset.max_loaded, None);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["plugrack"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
