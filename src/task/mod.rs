// src/task/mod.rs

//! Task synthesis: turning a [`Runnable`] into an executable task spec.
//!
//! Synthesis is a pure, total function of its input; every absent field has
//! a defined fallback. The spec is handed to the host's task executor and
//! not retained here.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::types::Runnable;

/// Task type tag understood by the host's task engine.
pub const TASK_TYPE: &str = "cargo";

/// Problem matcher associated with synthesized tasks so tool diagnostics in
/// the task output are recognized by the host. Declarative only; nothing in
/// this crate evaluates it.
pub const PROBLEM_MATCHER: &str = "$rustc";

/// Separator between tool arguments and produced-program arguments,
/// following the build tool's command-line convention.
pub const PROGRAM_ARGS_SEPARATOR: &str = "--";

/// Which presentation contract a task is synthesized under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// The "run directly" path: build grouping, always revealed in a
    /// dedicated, reused panel, output cleared before each run.
    Dedicated,
    /// The generic "pick and run" path: only output clearing is forced.
    Generic,
}

/// Presentation hints the host's task engine applies when running a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationHints {
    /// Mark the task as part of the build group.
    pub build_group: bool,
    /// Always reveal the output panel when the task starts.
    pub reveal_always: bool,
    /// Run in a dedicated panel that is reused between runs, rather than a
    /// fresh one per run.
    pub dedicated_panel: bool,
    /// Clear prior output before running.
    pub clear_before_run: bool,
}

impl PresentationHints {
    fn for_presentation(presentation: Presentation) -> Self {
        match presentation {
            Presentation::Dedicated => Self {
                build_group: true,
                reveal_always: true,
                dedicated_panel: true,
                clear_before_run: true,
            },
            Presentation::Generic => Self {
                build_group: false,
                reveal_always: false,
                dedicated_panel: false,
                clear_before_run: true,
            },
        }
    }
}

/// Derived, non-persisted specification of one executable task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub task_type: &'static str,
    pub label: String,
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub cwd: PathBuf,
    pub presentation: PresentationHints,
    pub problem_matcher: &'static str,
}

/// Derive an executable task spec from a runnable.
///
/// The tool arguments are passed through unchanged; program arguments are
/// appended after a single [`PROGRAM_ARGS_SEPARATOR`] token, and only when
/// there are any.
pub fn synthesize(runnable: &Runnable, presentation: Presentation) -> TaskSpec {
    let mut args = runnable.args.clone();
    if !runnable.extra_args.is_empty() {
        args.push(PROGRAM_ARGS_SEPARATOR.to_string());
        args.extend(runnable.extra_args.iter().cloned());
    }

    TaskSpec {
        task_type: TASK_TYPE,
        label: runnable.label.clone(),
        command: runnable.bin.clone(),
        args,
        env: runnable.env.clone(),
        cwd: runnable.workspace_cwd(),
        presentation: PresentationHints::for_presentation(presentation),
        problem_matcher: PROBLEM_MATCHER,
    }
}
