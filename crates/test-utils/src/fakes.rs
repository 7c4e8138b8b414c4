//! Fake host collaborators for exercising the command flows without an
//! editor, a terminal or real processes.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use runlens::debug::DebugConfig;
use runlens::errors::{Result, RunlensError};
use runlens::host::{
    ArtifactLocator, DebugLauncher, DebuggerRegistry, DocumentPosition, OutputChannel, Picker,
    RunnableSource, TaskExecutor,
};
use runlens::pick::ChoiceEntry;
use runlens::task::TaskSpec;
use runlens::types::Runnable;

/// Runnable source serving a fixed list, recording each request.
pub struct FakeRunnableSource {
    runnables: Vec<Runnable>,
    pub requests: Arc<Mutex<Vec<DocumentPosition>>>,
}

impl FakeRunnableSource {
    pub fn new(runnables: Vec<Runnable>) -> Self {
        Self {
            runnables,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl RunnableSource for FakeRunnableSource {
    fn runnables_at<'a>(
        &'a self,
        position: &'a DocumentPosition,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Runnable>>> + Send + 'a>> {
        Box::pin(async move {
            self.requests.lock().unwrap().push(position.clone());
            Ok(self.runnables.clone())
        })
    }
}

/// What a [`FakePicker`] does with the list it is shown.
#[derive(Debug, Clone)]
pub enum PickBehaviour {
    /// Choose the first entry.
    First,
    /// Choose the entry with this label.
    Label(String),
    /// Cancel without choosing.
    Cancel,
}

/// Picker that records every list it is shown and answers per behaviour.
pub struct FakePicker {
    behaviour: PickBehaviour,
    pub shown: Arc<Mutex<Vec<Vec<ChoiceEntry>>>>,
}

impl FakePicker {
    pub fn new(behaviour: PickBehaviour) -> Self {
        Self {
            behaviour,
            shown: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Picker for FakePicker {
    fn pick<'a>(
        &'a self,
        entries: Vec<ChoiceEntry>,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ChoiceEntry>>> + Send + 'a>> {
        Box::pin(async move {
            self.shown.lock().unwrap().push(entries.clone());

            let chosen = match &self.behaviour {
                PickBehaviour::First => entries.into_iter().next(),
                PickBehaviour::Label(label) => {
                    entries.into_iter().find(|e| e.runnable.label == *label)
                }
                PickBehaviour::Cancel => None,
            };
            Ok(chosen)
        })
    }
}

/// Executor that records specs instead of spawning processes.
pub struct FakeTaskExecutor {
    pub executed: Arc<Mutex<Vec<TaskSpec>>>,
}

impl FakeTaskExecutor {
    pub fn new() -> Self {
        Self {
            executed: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for FakeTaskExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskExecutor for FakeTaskExecutor {
    fn execute<'a>(
        &'a self,
        spec: TaskSpec,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.executed.lock().unwrap().push(spec);
            Ok(())
        })
    }
}

/// Launcher that records configs instead of starting sessions.
pub struct FakeDebugLauncher {
    pub launched: Arc<Mutex<Vec<DebugConfig>>>,
}

impl FakeDebugLauncher {
    pub fn new() -> Self {
        Self {
            launched: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for FakeDebugLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugLauncher for FakeDebugLauncher {
    fn launch<'a>(
        &'a self,
        config: DebugConfig,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.launched.lock().unwrap().push(config);
            Ok(())
        })
    }
}

/// Registry answering from a fixed set of installed extension ids.
#[derive(Debug, Clone, Default)]
pub struct FixedRegistry {
    installed: Vec<String>,
}

impl FixedRegistry {
    pub fn with(installed: &[&str]) -> Self {
        Self {
            installed: installed.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl DebuggerRegistry for FixedRegistry {
    fn is_installed(&self, extension_id: &str) -> bool {
        self.installed.iter().any(|id| id == extension_id)
    }
}

/// What a [`FakeArtifactLocator`] resolves to.
#[derive(Debug, Clone)]
pub enum LocateOutcome {
    Path(PathBuf),
    Fail(String),
}

/// Locator that emits canned output lines and resolves per outcome,
/// recording how many times it was driven.
pub struct FakeArtifactLocator {
    outcome: LocateOutcome,
    output_lines: Vec<String>,
    pub calls: Arc<Mutex<usize>>,
}

impl FakeArtifactLocator {
    pub fn new(outcome: LocateOutcome) -> Self {
        Self {
            outcome,
            output_lines: Vec::new(),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn resolving(path: impl Into<PathBuf>) -> Self {
        Self::new(LocateOutcome::Path(path.into()))
    }

    pub fn failing(detail: &str) -> Self {
        Self::new(LocateOutcome::Fail(detail.to_string()))
    }

    pub fn with_output_lines(mut self, lines: &[&str]) -> Self {
        self.output_lines = lines.iter().map(|s| s.to_string()).collect();
        self
    }
}

impl ArtifactLocator for FakeArtifactLocator {
    fn locate<'a>(
        &'a self,
        _runnable: &'a Runnable,
        output: &'a dyn OutputChannel,
    ) -> Pin<Box<dyn Future<Output = Result<PathBuf>> + Send + 'a>> {
        Box::pin(async move {
            *self.calls.lock().unwrap() += 1;
            for line in &self.output_lines {
                output.append_line(line);
            }
            match &self.outcome {
                LocateOutcome::Path(path) => Ok(path.clone()),
                LocateOutcome::Fail(detail) => Err(RunlensError::BuildFailed(detail.clone())),
            }
        })
    }
}

/// In-memory output channel recording appended lines and clear calls.
#[derive(Debug, Default)]
pub struct BufferOutputChannel {
    lines: Mutex<Vec<String>>,
    clears: Mutex<usize>,
}

impl BufferOutputChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn clear_count(&self) -> usize {
        *self.clears.lock().unwrap()
    }
}

impl OutputChannel for BufferOutputChannel {
    fn clear(&self) {
        *self.clears.lock().unwrap() += 1;
        self.lines.lock().unwrap().clear();
    }

    fn append_line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}
