// src/debug/artifact.rs

//! Pre-launch build step for the native debugger.
//!
//! Runs the runnable's build tool with JSON message output, streams every
//! line of tool output into the shared build output channel, and collects
//! the executables reported by `compiler-artifact` messages. Exactly one
//! launchable artifact must come out of the build; anything else is a
//! failure and no debug session is attempted.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{Result, RunlensError};
use crate::host::{ArtifactLocator, OutputChannel};
use crate::types::Runnable;

/// Flag asking the build tool for machine-readable per-line JSON messages.
const MESSAGE_FORMAT_FLAG: &str = "--message-format=json";

/// Production locator: drives the build tool and parses its JSON output.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildArtifactLocator;

impl ArtifactLocator for BuildArtifactLocator {
    fn locate<'a>(
        &'a self,
        runnable: &'a Runnable,
        output: &'a dyn OutputChannel,
    ) -> Pin<Box<dyn Future<Output = Result<PathBuf>> + Send + 'a>> {
        Box::pin(run_build(runnable, output))
    }
}

/// One line of build tool output, in the shape we care about.
///
/// The tool emits one JSON object per line; unknown fields and reasons are
/// ignored rather than rejected, so this stays resilient against tool
/// version drift.
#[derive(Debug, Deserialize)]
struct BuildMessage {
    reason: String,
    #[serde(default)]
    executable: Option<PathBuf>,
    #[serde(default)]
    target: BuildTarget,
    #[serde(default)]
    profile: BuildProfile,
    #[serde(default)]
    message: DiagnosticMessage,
}

#[derive(Debug, Default, Deserialize)]
struct BuildTarget {
    #[serde(default)]
    name: String,
    #[serde(default)]
    kind: Vec<String>,
    #[serde(default)]
    crate_types: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BuildProfile {
    #[serde(default)]
    test: bool,
}

#[derive(Debug, Default, Deserialize)]
struct DiagnosticMessage {
    #[serde(default)]
    rendered: Option<String>,
}

async fn run_build(runnable: &Runnable, output: &dyn OutputChannel) -> Result<PathBuf> {
    info!(
        runnable = %runnable.label,
        cmd = %runnable,
        "starting pre-launch build"
    );

    let mut cmd = Command::new(&runnable.bin);
    cmd.args(&runnable.args)
        .arg(MESSAGE_FORMAT_FLAG)
        .envs(&runnable.env)
        .current_dir(runnable.workspace_cwd())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning build for '{}'", runnable.label))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let mut artifacts: Vec<PathBuf> = Vec::new();

    // Drain both pipes concurrently so neither can fill up and stall the
    // child. JSON messages arrive on stdout; human-readable progress on
    // stderr goes straight to the output channel.
    let collect_artifacts = async {
        if let Some(out) = stdout {
            let mut lines = BufReader::new(out).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                handle_message_line(&line, output, &mut artifacts);
            }
        }
    };
    let forward_stderr = async {
        if let Some(err) = stderr {
            let mut lines = BufReader::new(err).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                output.append_line(&line);
            }
        }
    };
    tokio::join!(collect_artifacts, forward_stderr);

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for build of '{}'", runnable.label))?;

    if !status.success() {
        let code = status.code().unwrap_or(-1);
        warn!(runnable = %runnable.label, exit_code = code, "pre-launch build failed");
        return Err(RunlensError::BuildFailed(format!(
            "build exited with code {code}"
        )));
    }

    if artifacts.len() > 1 {
        warn!(
            runnable = %runnable.label,
            count = artifacts.len(),
            "build produced more than one launchable artifact"
        );
        return Err(RunlensError::BuildFailed(
            "build produced more than one launchable artifact".to_string(),
        ));
    }

    artifacts.pop().ok_or_else(|| {
        RunlensError::BuildFailed("build produced no launchable artifact".to_string())
    })
}

/// Handle one line of stdout: either a JSON build message, or raw tool
/// output that is simply forwarded to the channel.
fn handle_message_line(line: &str, output: &dyn OutputChannel, artifacts: &mut Vec<PathBuf>) {
    let msg: BuildMessage = match serde_json::from_str(line) {
        Ok(msg) => msg,
        Err(err) => {
            debug!(error = %err, "non-JSON line from build tool");
            output.append_line(line);
            return;
        }
    };

    match msg.reason.as_str() {
        "compiler-artifact" => {
            if let Some(executable) = msg.executable {
                let is_binary = msg.target.crate_types.iter().any(|t| t == "bin");
                let is_build_script = msg.target.kind.iter().any(|k| k == "custom-build");
                if (is_binary && !is_build_script) || msg.profile.test {
                    debug!(
                        target = %msg.target.name,
                        executable = %executable.display(),
                        "build reported launchable artifact"
                    );
                    artifacts.push(executable);
                }
            }
        }
        "compiler-message" => {
            if let Some(rendered) = msg.message.rendered {
                output.append_line(rendered.trim_end());
            }
        }
        _ => {}
    }
}
