// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::debug::DebugSettings;
use crate::types::{EnginePreference, Runnable};

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [debug]
/// engine = "auto"
///
/// [debug.source_file_map]
/// "/rustc/abc123" = "/home/me/src/rust"
///
/// [runnable.server]
/// bin = "cargo"
/// args = ["run", "--package", "server"]
/// extra_args = ["--port", "8080"]
/// cwd = "backend"
///
/// [runnable.server.env]
/// RUST_LOG = "debug"
/// ```
///
/// All sections are optional except that at least one `[runnable.<name>]`
/// must be present (enforced by validation).
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Debugger settings from `[debug]`.
    #[serde(default)]
    pub debug: DebugSection,

    /// All runnables from `[runnable.<name>]`.
    ///
    /// Keys are the runnable names used on the command line
    /// (e.g. `runlens run server`).
    #[serde(default)]
    pub runnable: BTreeMap<String, RunnableConfig>,
}

/// `[debug]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DebugSection {
    /// `"auto"` or a debugger extension id.
    #[serde(default)]
    pub engine: EnginePreference,

    /// Build-time path prefix -> local path prefix remap table, passed
    /// through to the debugger configuration unchanged.
    #[serde(default)]
    pub source_file_map: BTreeMap<String, String>,

    /// Where to look for installed debugger extensions.
    ///
    /// Defaults to the user's VS Code extensions directory.
    #[serde(default)]
    pub extensions_dir: Option<PathBuf>,
}

/// `[runnable.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnableConfig {
    /// Display label; defaults to the section name.
    #[serde(default)]
    pub label: Option<String>,

    /// The build/run tool to invoke.
    pub bin: String,

    /// Arguments for the tool.
    #[serde(default)]
    pub args: Vec<String>,

    /// Arguments for the produced program.
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Extra environment for the spawned process.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Working directory; defaults to the workspace root.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

impl RunnableConfig {
    /// Materialize this section into a [`Runnable`], using the section name
    /// as the label fallback.
    pub fn to_runnable(&self, name: &str) -> Runnable {
        Runnable {
            label: self.label.clone().unwrap_or_else(|| name.to_string()),
            bin: self.bin.clone(),
            args: self.args.clone(),
            extra_args: self.extra_args.clone(),
            env: self.env.clone(),
            cwd: self.cwd.clone(),
        }
    }
}

/// Validated configuration. Construct via `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub debug: DebugSection,
    pub runnable: BTreeMap<String, RunnableConfig>,
}

impl ConfigFile {
    /// Used by validation once the raw config has passed all checks.
    pub(crate) fn new_unchecked(
        debug: DebugSection,
        runnable: BTreeMap<String, RunnableConfig>,
    ) -> Self {
        Self { debug, runnable }
    }

    /// All configured runnables, in name order.
    pub fn runnables(&self) -> Vec<Runnable> {
        self.runnable
            .iter()
            .map(|(name, rc)| rc.to_runnable(name))
            .collect()
    }

    /// Look up one runnable by its section name.
    pub fn find_runnable(&self, name: &str) -> Option<Runnable> {
        self.runnable.get(name).map(|rc| rc.to_runnable(name))
    }

    /// External debug inputs in the shape the resolver consumes.
    pub fn debug_settings(&self) -> DebugSettings {
        DebugSettings {
            engine: self.debug.engine.clone(),
            source_file_map: self.debug.source_file_map.clone(),
        }
    }
}
