// src/debug/mod.rs

//! Debug launch configuration resolution.
//!
//! Per debug attempt this module:
//! 1. probes which debugger engines are installed and selects one based on
//!    the configured preference ([`engine`]),
//! 2. builds the engine-specific launch configuration: directly for
//!    CodeLLDB, or after a pre-launch build that discovers the produced
//!    binary for the native debugger ([`artifact`]),
//! 3. hands the configuration to the host's debug launcher.
//!
//! A failed build aborts the attempt; no configuration is produced and no
//! session is started.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::errors::{Result, RunlensError};
use crate::host::{ArtifactLocator, DebuggerRegistry, OutputChannel};
use crate::types::{EnginePreference, Runnable};

pub mod artifact;
pub mod engine;

pub use artifact::BuildArtifactLocator;
pub use engine::{select_engine, DebugEngineKind, InstalledEngines, Platform};

/// Launch request marker common to both engine schemas.
const LAUNCH_REQUEST: &str = "launch";

/// External debug configuration inputs: the engine preference and the
/// source-path remap table, both supplied by surrounding configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugSettings {
    pub engine: EnginePreference,
    /// Build-time path prefix -> local path prefix, passed through to the
    /// engine configuration unchanged.
    pub source_file_map: BTreeMap<String, String>,
}

/// Resolved debug configuration, one of two mutually exclusive schemas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DebugConfig {
    Lldb(LldbConfig),
    Native(NativeConfig),
}

impl DebugConfig {
    pub fn name(&self) -> &str {
        match self {
            DebugConfig::Lldb(c) => &c.name,
            DebugConfig::Native(c) => &c.name,
        }
    }

    pub fn engine_type(&self) -> &str {
        match self {
            DebugConfig::Lldb(c) => c.engine_type,
            DebugConfig::Native(c) => c.engine_type,
        }
    }
}

/// The build invocation CodeLLDB performs itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoInvocation {
    pub args: Vec<String>,
}

/// CodeLLDB launch configuration. The engine drives the build tool with
/// the original tool arguments; no pre-launch build happens on our side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LldbConfig {
    #[serde(rename = "type")]
    pub engine_type: &'static str,
    pub request: &'static str,
    pub name: String,
    pub cargo: CargoInvocation,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub source_map: BTreeMap<String, String>,
    pub source_languages: Vec<&'static str>,
}

/// Native debugger (cppvsdbg/cppdbg) launch configuration. Requires the
/// concrete binary path discovered by the pre-launch build.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeConfig {
    #[serde(rename = "type")]
    pub engine_type: &'static str,
    pub request: &'static str,
    pub name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub source_file_map: BTreeMap<String, String>,
}

/// Build the CodeLLDB configuration for a runnable.
pub fn lldb_config(runnable: &Runnable, source_file_map: &BTreeMap<String, String>) -> DebugConfig {
    DebugConfig::Lldb(LldbConfig {
        engine_type: "lldb",
        request: LAUNCH_REQUEST,
        name: runnable.label.clone(),
        cargo: CargoInvocation {
            args: runnable.args.clone(),
        },
        args: runnable.extra_args.clone(),
        cwd: runnable.workspace_cwd(),
        source_map: source_file_map.clone(),
        source_languages: vec!["rust"],
    })
}

/// Build the native-debugger configuration for a runnable and an already
/// discovered program path.
pub fn native_config(
    runnable: &Runnable,
    program: PathBuf,
    source_file_map: &BTreeMap<String, String>,
    platform: Platform,
) -> DebugConfig {
    DebugConfig::Native(NativeConfig {
        engine_type: platform.native_engine_type(),
        request: LAUNCH_REQUEST,
        name: runnable.label.clone(),
        program,
        args: runnable.extra_args.clone(),
        cwd: runnable.workspace_cwd(),
        source_file_map: source_file_map.clone(),
    })
}

/// Resolve the debug configuration for one runnable.
///
/// The shared build output channel is cleared at the start of every
/// attempt. Selection failures surface as [`RunlensError::NoDebugEngine`];
/// a failed pre-launch build propagates from the locator, with its detail
/// in the output channel.
pub async fn resolve_debug_config(
    runnable: &Runnable,
    settings: &DebugSettings,
    registry: &dyn DebuggerRegistry,
    locator: &dyn ArtifactLocator,
    output: &dyn OutputChannel,
    platform: Platform,
) -> Result<DebugConfig> {
    output.clear();

    let installed = InstalledEngines::probe(registry);
    let engine = select_engine(&settings.engine, installed).ok_or(RunlensError::NoDebugEngine)?;

    info!(
        runnable = %runnable.label,
        engine = engine.extension_id(),
        "resolved debugger engine"
    );

    match engine {
        DebugEngineKind::CodeLldb => Ok(lldb_config(runnable, &settings.source_file_map)),
        DebugEngineKind::Cpptools => {
            let program = locator.locate(runnable, output).await?;
            info!(program = %program.display(), "pre-launch build produced binary");
            Ok(native_config(
                runnable,
                program,
                &settings.source_file_map,
                platform,
            ))
        }
    }
}
