// src/host/shell.rs

//! Task executor that spawns real processes.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

use crate::errors::Result;
use crate::host::TaskExecutor;
use crate::task::TaskSpec;

/// Runs a synthesized task as a child process, streaming its output to the
/// terminal.
///
/// The task's exit status is observed and logged here, on the host side;
/// it is not propagated back to the command layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellTaskExecutor;

impl TaskExecutor for ShellTaskExecutor {
    fn execute<'a>(
        &'a self,
        spec: TaskSpec,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(run_task_spec(spec))
    }
}

async fn run_task_spec(spec: TaskSpec) -> Result<()> {
    info!(
        task = %spec.label,
        command = %spec.command,
        args = ?spec.args,
        cwd = %spec.cwd.display(),
        "starting task process"
    );

    if spec.presentation.clear_before_run {
        // New output block for this run.
        eprintln!();
    }

    let mut cmd = Command::new(&spec.command);
    cmd.args(&spec.args)
        .envs(&spec.env)
        .current_dir(&spec.cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for task '{}'", spec.label))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Drain both pipes concurrently so neither can fill up and stall the
    // child.
    let forward_stdout = async {
        if let Some(out) = stdout {
            let mut lines = BufReader::new(out).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                println!("{line}");
            }
        }
    };
    let forward_stderr = async {
        if let Some(err) = stderr {
            let mut lines = BufReader::new(err).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                eprintln!("{line}");
            }
        }
    };
    tokio::join!(forward_stdout, forward_stderr);

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of task '{}'", spec.label))?;

    let code = status.code().unwrap_or(-1);
    if status.success() {
        info!(task = %spec.label, exit_code = code, "task process exited");
    } else {
        warn!(task = %spec.label, exit_code = code, "task process failed");
    }

    Ok(())
}
