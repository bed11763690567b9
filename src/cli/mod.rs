//! Command-line interface for liftoff.
//!
//! Parses arguments and decides which mode the application runs in. The
//! `status` subcommand completes here; `run` and `simulate` need the log
//! bridge and the update service, so they are handed back to `main`.

use crate::config::{Config, LogLevel};
use crate::update::VersionStore;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// liftoff - Auto-update coordinator for desktop applications
#[derive(Parser)]
#[command(name = "liftoff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this config file instead of the per-user default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Off => LogLevel::Off,
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the update loop (default when no subcommand is given)
    Run {
        /// Exit after the specified number of seconds
        #[arg(long, value_name = "SECONDS")]
        exit_after: Option<f64>,
    },

    /// Feed a fake downloaded release through the completion flow once
    Simulate,

    /// Print the persisted version record and effective update settings
    Status,
}

/// What the application should do after argument parsing
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RunMode {
    #[default]
    Run,
    Simulate,
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    pub mode: RunMode,
    /// Exit after this many seconds
    pub exit_after: Option<f64>,
    /// Explicit config file path
    pub config_path: Option<PathBuf>,
    /// Log level override from CLI
    pub log_level: Option<LogLevel>,
}

impl RuntimeOptions {
    /// Load the config from `--config` if given, else from the default location.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config_path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal application startup
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments and handle subcommands
pub fn process_cli() -> CliResult {
    resolve(Cli::parse())
}

/// Turn parsed arguments into a [`CliResult`], running `status` inline.
pub fn resolve(cli: Cli) -> CliResult {
    let mut options = RuntimeOptions {
        config_path: cli.config,
        log_level: cli.log_level.map(Into::into),
        ..Default::default()
    };

    match cli.command {
        Some(Commands::Status) => {
            let result = print_status(&options);
            if let Err(ref e) = result {
                eprintln!("liftoff: error: {e:#}");
            }
            CliResult::Exit(if result.is_ok() { 0 } else { 1 })
        }
        Some(Commands::Simulate) => {
            options.mode = RunMode::Simulate;
            CliResult::Continue(options)
        }
        Some(Commands::Run { exit_after }) => {
            options.exit_after = exit_after;
            CliResult::Continue(options)
        }
        None => CliResult::Continue(options),
    }
}

/// Render the status report printed by `liftoff status`.
pub fn status_report(config: &Config, store: &VersionStore) -> String {
    let updates = &config.updates;
    let mut lines = vec![
        format!("liftoff v{}", crate::VERSION),
        format!("App id:              {}", config.app_id),
        format!("Updates enabled:     {}", updates.enabled),
        format!(
            "Check interval:      {} min",
            updates.check_interval_ms / 60_000
        ),
        format!(
            "Error policy:        {}",
            updates.error_policy.display_name()
        ),
        format!(
            "Update engine:       {}",
            updates.engine_command.as_deref().unwrap_or("(none)")
        ),
    ];
    if let Some(path) = store.path() {
        lines.push(format!("State file:          {}", path.display()));
    }
    lines.push(format!(
        "Last seen version:   {}",
        store.last_seen_version().unwrap_or("(never run)")
    ));
    match store.last_release_notes() {
        Some(notes) => {
            lines.push("Last release notes:".to_string());
            lines.extend(notes.lines().map(|line| format!("  {}", line)));
        }
        None => lines.push("Last release notes:  (none)".to_string()),
    }
    lines.join("\n")
}

fn print_status(options: &RuntimeOptions) -> anyhow::Result<()> {
    let config = options.load_config()?;
    let store = VersionStore::open(config.version_state_path());
    println!("{}", status_report(&config, &store));
    Ok(())
}
