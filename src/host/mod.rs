// src/host/mod.rs

//! Host collaborator contracts.
//!
//! The command layer never talks to an editor, a terminal or a process
//! directly; it goes through the traits in this module:
//!
//! - [`RunnableSource`] enumerates runnables for a document position.
//! - [`Picker`] presents a choice list and returns the user's pick, or
//!   `None` on cancellation.
//! - [`TaskExecutor`] schedules and runs a synthesized task; its outcome is
//!   observed by the host, not by this crate.
//! - [`DebugLauncher`] starts a debug session from a resolved config.
//! - [`DebuggerRegistry`] answers "is this debugger extension installed".
//! - [`OutputChannel`] is the shared, process-wide channel debug builds
//!   write to.
//! - [`ArtifactLocator`] resolves the binary a debug build produced.
//!
//! Production implementations for the CLI host live in the submodules;
//! tests substitute fakes from the `runlens-test-utils` crate.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::debug::DebugConfig;
use crate::errors::Result;
use crate::pick::ChoiceEntry;
use crate::task::TaskSpec;
use crate::types::Runnable;

pub mod registry;
pub mod shell;
pub mod static_source;
pub mod terminal;

pub use registry::VsCodeExtensionRegistry;
pub use shell::ShellTaskExecutor;
pub use static_source::StaticRunnableSource;
pub use terminal::{JsonDebugLauncher, StderrOutputChannel, TerminalPicker};

/// A document identifier plus cursor position, as supplied by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPosition {
    pub document: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl DocumentPosition {
    pub fn start_of(document: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
            line: 0,
            column: 0,
        }
    }
}

/// Enumerates runnables relevant to a document position.
///
/// Ordering beyond "source-defined relevance" is not guaranteed; the
/// returned list may be empty.
pub trait RunnableSource: Send + Sync {
    fn runnables_at<'a>(
        &'a self,
        position: &'a DocumentPosition,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Runnable>>> + Send + 'a>>;
}

/// Presents an ordered choice list and returns the chosen entry.
///
/// `Ok(None)` means the user cancelled; that is a normal outcome, not an
/// error.
pub trait Picker: Send + Sync {
    fn pick<'a>(
        &'a self,
        entries: Vec<ChoiceEntry>,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ChoiceEntry>>> + Send + 'a>>;
}

/// Schedules and runs one task spec.
pub trait TaskExecutor: Send + Sync {
    fn execute<'a>(
        &'a self,
        spec: TaskSpec,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Starts a debug session from a resolved configuration. The session's
/// lifecycle is not observed by this crate.
pub trait DebugLauncher: Send + Sync {
    fn launch<'a>(
        &'a self,
        config: DebugConfig,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Installed-extension facts used to select a debugger engine.
pub trait DebuggerRegistry: Send + Sync {
    fn is_installed(&self, extension_id: &str) -> bool;
}

/// Shared output channel for debug build output.
///
/// A process-wide singleton with last-writer-wins semantics: every debug
/// attempt clears it before writing, and concurrent attempts overwrite one
/// another rather than interleave.
pub trait OutputChannel: Send + Sync {
    fn clear(&self);
    fn append_line(&self, line: &str);
}

/// Resolves the executable a build of the given runnable produces.
///
/// Implementations run the build tool and parse its output; the contract is
/// simply "a path, or a failure". All tool output is streamed into the
/// given channel so failures are visible to the user.
pub trait ArtifactLocator: Send + Sync {
    fn locate<'a>(
        &'a self,
        runnable: &'a Runnable,
        output: &'a dyn OutputChannel,
    ) -> Pin<Box<dyn Future<Output = Result<PathBuf>> + Send + 'a>>;
}
