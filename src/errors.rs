// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::debug::engine::{CODELLDB_ID, CPPTOOLS_ID};

#[derive(Error, Debug)]
pub enum RunlensError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Runnable not found: {0}")]
    RunnableNotFound(String),

    #[error(
        "no debugger extension installed; install CodeLLDB ({CODELLDB_ID}) or the \
         Microsoft C++ tools ({CPPTOOLS_ID}) from the VS Code marketplace"
    )]
    NoDebugEngine,

    #[error("unknown debugger engine '{0}' (expected \"auto\", \"{CODELLDB_ID}\" or \"{CPPTOOLS_ID}\")")]
    UnknownDebugEngine(String),

    /// The pre-launch build for the native debugger failed. The detail is
    /// intentionally terse; the full build output lives in the shared build
    /// output channel.
    #[error("debug build failed: {0}")]
    BuildFailed(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RunlensError>;
