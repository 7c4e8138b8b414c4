// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `runlens`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runlens",
    version,
    about = "Pick, run and debug project-defined runnables.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Runlens.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Runlens.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNLENS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Print the configured runnables without executing anything.
    List,

    /// Choose a runnable interactively and run it; the previous choice is
    /// offered first on the next pick.
    Pick,

    /// Run one runnable by name as a build task.
    Run {
        /// Name of a `[runnable.<name>]` section.
        name: String,
    },

    /// Resolve a debugger configuration for one runnable and hand it to
    /// the debug launcher.
    Debug {
        /// Name of a `[runnable.<name>]` section.
        name: String,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
