use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::debug::engine::{CODELLDB_ID, CPPTOOLS_ID};

/// One discovered executable/test target, as produced by a runnable source.
///
/// `args` are arguments for the build/run tool itself (target selection
/// flags etc.); `extra_args` are arguments for the *produced program*. The
/// two streams stay separate until task synthesis joins them with the
/// tool's `--` separator convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runnable {
    /// Display string; also part of the structural dedup key.
    pub label: String,
    /// The command/program to invoke (e.g. `cargo`).
    pub bin: String,
    /// Arguments for the tool.
    pub args: Vec<String>,
    /// Arguments for the produced program; empty means "none".
    pub extra_args: Vec<String>,
    /// Extra environment merged into the spawned process's environment.
    pub env: BTreeMap<String, String>,
    /// Working directory; `None` means the workspace root.
    pub cwd: Option<PathBuf>,
}

impl Runnable {
    /// Effective working directory, defaulting to `.` when unset.
    pub fn workspace_cwd(&self) -> PathBuf {
        self.cwd.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

impl fmt::Display for Runnable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.bin, self.args.join(" "))
    }
}

/// Which debugger engine to use for debug launches.
///
/// - `Auto`: prefer CodeLLDB, fall back to the Microsoft C++ tools
///   (default behaviour).
/// - `Explicit`: use exactly this extension, or fail if it is not
///   installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnginePreference {
    Auto,
    Explicit(String),
}

impl Default for EnginePreference {
    fn default() -> Self {
        EnginePreference::Auto
    }
}

impl FromStr for EnginePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("debug engine must not be empty (expected \"auto\" or an extension id)".to_string()),
            "auto" => Ok(EnginePreference::Auto),
            other => Ok(EnginePreference::Explicit(other.to_string())),
        }
    }
}

impl fmt::Display for EnginePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnginePreference::Auto => write!(f, "auto"),
            EnginePreference::Explicit(id) => write!(f, "{id}"),
        }
    }
}

impl EnginePreference {
    /// Whether an explicit preference names an engine this crate knows how
    /// to build a configuration for.
    pub fn is_known(&self) -> bool {
        match self {
            EnginePreference::Auto => true,
            EnginePreference::Explicit(id) => id == CODELLDB_ID || id == CPPTOOLS_ID,
        }
    }
}

impl<'de> Deserialize<'de> for EnginePreference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
