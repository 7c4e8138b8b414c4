// src/commands/mod.rs

//! The command layer: the three user-facing flows.
//!
//! - [`pick_and_run`]: discover runnables near the cursor, merge with the
//!   remembered previous pick, let the user choose, run the choice as a
//!   task.
//! - [`run_single`]: run one known runnable directly, skipping the pick.
//! - [`debug_single`]: resolve a debugger engine, build its launch
//!   configuration and start a debug session.
//!
//! Each flow runs strictly in sequence within one invocation; nothing here
//! retries, and no state is mutated on a failure path. Missing
//! preconditions (no active document, no runnable source, a cancelled
//! pick) end the flow silently.

use std::sync::Arc;

use tracing::{debug, info};

use crate::debug::{resolve_debug_config, DebugSettings, Platform};
use crate::errors::Result;
use crate::host::{
    ArtifactLocator, DebugLauncher, DebuggerRegistry, DocumentPosition, OutputChannel, Picker,
    RunnableSource, TaskExecutor,
};
use crate::pick::{build_choice_list, SelectionMemo};
use crate::task::{synthesize, Presentation};
use crate::types::Runnable;

/// Everything one command invocation needs: the host collaborators, the
/// external debug settings, and the session-scoped selection memo.
///
/// The memo lives here, owned by the caller for the extension session,
/// rather than in a process-wide global.
pub struct CommandContext {
    /// Discovery collaborator; `None` when no source is connected.
    pub source: Option<Box<dyn RunnableSource>>,
    pub picker: Box<dyn Picker>,
    pub executor: Box<dyn TaskExecutor>,
    pub launcher: Box<dyn DebugLauncher>,
    pub registry: Box<dyn DebuggerRegistry>,
    pub locator: Box<dyn ArtifactLocator>,
    /// Shared build output channel, a process-wide singleton.
    pub build_output: Arc<dyn OutputChannel>,
    pub debug: DebugSettings,
    pub memo: SelectionMemo,
}

/// Discover runnables for the given position, let the user pick one and
/// run it.
///
/// No-ops silently when there is no active document or no runnable source;
/// a cancelled pick terminates the flow with the memo untouched. The memo
/// is updated exactly when the pick completes, before the task runs.
pub async fn pick_and_run(
    ctx: &mut CommandContext,
    position: Option<&DocumentPosition>,
) -> Result<()> {
    let (Some(source), Some(position)) = (ctx.source.as_deref(), position) else {
        debug!("pick skipped: no runnable source or no active document");
        return Ok(());
    };

    let candidates = source.runnables_at(position).await?;
    debug!(count = candidates.len(), "discovered runnables");

    let entries = build_choice_list(candidates, ctx.memo.last());

    let Some(chosen) = ctx.picker.pick(entries).await? else {
        debug!("pick cancelled; memo left unchanged");
        return Ok(());
    };

    info!(runnable = %chosen.runnable.label, "runnable picked");

    let spec = synthesize(&chosen.runnable, Presentation::Generic);
    ctx.memo.record(chosen);

    ctx.executor.execute(spec).await
}

/// Run one runnable directly as a build task, without picking.
pub async fn run_single(ctx: &CommandContext, runnable: &Runnable) -> Result<()> {
    info!(runnable = %runnable.label, "running runnable");
    let spec = synthesize(runnable, Presentation::Dedicated);
    ctx.executor.execute(spec).await
}

/// Launch one runnable under a debugger.
///
/// Engine selection failures and pre-launch build failures abort the flow
/// before any session is started.
pub async fn debug_single(ctx: &CommandContext, runnable: &Runnable) -> Result<()> {
    info!(runnable = %runnable.label, "debugging runnable");

    let config = resolve_debug_config(
        runnable,
        &ctx.debug,
        ctx.registry.as_ref(),
        ctx.locator.as_ref(),
        ctx.build_output.as_ref(),
        Platform::current(),
    )
    .await?;

    ctx.launcher.launch(config).await
}
