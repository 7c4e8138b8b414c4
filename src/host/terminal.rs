// src/host/terminal.rs

//! Terminal-backed host collaborators for the CLI.
//!
//! - [`TerminalPicker`] renders the choice list on stderr and reads the
//!   selection from stdin.
//! - [`JsonDebugLauncher`] "starts" a debug session by emitting the
//!   resolved configuration as JSON on stdout, for an editor front-end to
//!   consume.
//! - [`StderrOutputChannel`] is the shared build output channel; a
//!   terminal scrollback cannot actually be cleared, so `clear` prints a
//!   separator instead.

use std::future::Future;
use std::pin::Pin;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::debug::DebugConfig;
use crate::errors::Result;
use crate::host::{DebugLauncher, OutputChannel, Picker};
use crate::pick::ChoiceEntry;

#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPicker;

impl Picker for TerminalPicker {
    fn pick<'a>(
        &'a self,
        entries: Vec<ChoiceEntry>,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ChoiceEntry>>> + Send + 'a>> {
        Box::pin(pick_on_terminal(entries))
    }
}

async fn pick_on_terminal(mut entries: Vec<ChoiceEntry>) -> Result<Option<ChoiceEntry>> {
    if entries.is_empty() {
        eprintln!("no runnables available");
        return Ok(None);
    }

    for (index, entry) in entries.iter().enumerate() {
        match &entry.detail {
            Some(detail) => eprintln!("  {}: {} ({detail})", index + 1, entry.label()),
            None => eprintln!("  {}: {}", index + 1, entry.label()),
        }
    }
    eprintln!("select a runnable by number (empty line cancels):");

    let mut line = String::new();
    let mut stdin = BufReader::new(tokio::io::stdin());
    let read = stdin.read_line(&mut line).await?;
    if read == 0 {
        debug!("stdin closed; treating as cancellation");
        return Ok(None);
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<usize>() {
        Ok(n) if (1..=entries.len()).contains(&n) => Ok(Some(entries.swap_remove(n - 1))),
        _ => {
            warn!(input = trimmed, "not a valid selection; cancelling");
            Ok(None)
        }
    }
}

/// Emits the resolved debug configuration as pretty JSON on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDebugLauncher;

impl DebugLauncher for JsonDebugLauncher {
    fn launch<'a>(
        &'a self,
        config: DebugConfig,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let json = serde_json::to_string_pretty(&config)
                .context("serializing debug configuration")?;
            println!("{json}");
            Ok(())
        })
    }
}

/// Shared build output channel that writes to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrOutputChannel;

impl OutputChannel for StderrOutputChannel {
    fn clear(&self) {
        // Scrollback can't be cleared; mark the boundary between attempts.
        eprintln!("----");
    }

    fn append_line(&self, line: &str) {
        eprintln!("{line}");
    }
}
