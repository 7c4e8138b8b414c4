#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use runlens::commands::CommandContext;
use runlens::debug::{DebugConfig, DebugSettings};
use runlens::pick::{ChoiceEntry, SelectionMemo};
use runlens::task::TaskSpec;
use runlens::types::{EnginePreference, Runnable};

use crate::fakes::{
    BufferOutputChannel, FakeArtifactLocator, FakeDebugLauncher, FakePicker, FakeRunnableSource,
    FakeTaskExecutor, FixedRegistry, LocateOutcome, PickBehaviour,
};

/// Builder for `Runnable` to simplify test setup.
pub struct RunnableBuilder {
    runnable: Runnable,
}

impl RunnableBuilder {
    pub fn new(label: &str, bin: &str) -> Self {
        Self {
            runnable: Runnable {
                label: label.to_string(),
                bin: bin.to_string(),
                args: vec![],
                extra_args: vec![],
                env: BTreeMap::new(),
                cwd: None,
            },
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.runnable.args.push(arg.to_string());
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.runnable.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn extra_arg(mut self, arg: &str) -> Self {
        self.runnable.extra_args.push(arg.to_string());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.runnable.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.runnable.cwd = Some(PathBuf::from(cwd));
        self
    }

    pub fn build(self) -> Runnable {
        self.runnable
    }
}

/// A command context wired to fakes, plus handles for observing what the
/// collaborators were asked to do.
pub struct TestContext {
    pub ctx: CommandContext,
    pub executed: Arc<Mutex<Vec<TaskSpec>>>,
    pub launched: Arc<Mutex<Vec<DebugConfig>>>,
    pub shown: Arc<Mutex<Vec<Vec<ChoiceEntry>>>>,
    pub locate_calls: Arc<Mutex<usize>>,
    pub output: Arc<BufferOutputChannel>,
}

/// Builder for [`TestContext`].
pub struct ContextBuilder {
    runnables: Option<Vec<Runnable>>,
    pick: PickBehaviour,
    installed: Vec<String>,
    locate: LocateOutcome,
    engine: EnginePreference,
    source_file_map: BTreeMap<String, String>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self {
            runnables: Some(Vec::new()),
            pick: PickBehaviour::First,
            installed: Vec::new(),
            locate: LocateOutcome::Path(PathBuf::from("target/debug/app")),
            engine: EnginePreference::Auto,
            source_file_map: BTreeMap::new(),
        }
    }

    pub fn with_runnables(mut self, runnables: Vec<Runnable>) -> Self {
        self.runnables = Some(runnables);
        self
    }

    /// No discovery collaborator connected at all.
    pub fn without_source(mut self) -> Self {
        self.runnables = None;
        self
    }

    pub fn pick(mut self, behaviour: PickBehaviour) -> Self {
        self.pick = behaviour;
        self
    }

    pub fn installed(mut self, ids: &[&str]) -> Self {
        self.installed = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn locate(mut self, outcome: LocateOutcome) -> Self {
        self.locate = outcome;
        self
    }

    pub fn engine(mut self, engine: EnginePreference) -> Self {
        self.engine = engine;
        self
    }

    pub fn source_file_map(mut self, from: &str, to: &str) -> Self {
        self.source_file_map.insert(from.to_string(), to.to_string());
        self
    }

    pub fn build(self) -> TestContext {
        let executor = FakeTaskExecutor::new();
        let executed = Arc::clone(&executor.executed);

        let launcher = FakeDebugLauncher::new();
        let launched = Arc::clone(&launcher.launched);

        let picker = FakePicker::new(self.pick);
        let shown = Arc::clone(&picker.shown);

        let locator = FakeArtifactLocator::new(self.locate);
        let locate_calls = Arc::clone(&locator.calls);

        let output = Arc::new(BufferOutputChannel::new());

        let installed: Vec<&str> = self.installed.iter().map(|s| s.as_str()).collect();

        let ctx = CommandContext {
            source: self
                .runnables
                .map(|r| Box::new(FakeRunnableSource::new(r)) as _),
            picker: Box::new(picker),
            executor: Box::new(executor),
            launcher: Box::new(launcher),
            registry: Box::new(FixedRegistry::with(&installed)),
            locator: Box::new(locator),
            build_output: Arc::clone(&output) as _,
            debug: DebugSettings {
                engine: self.engine,
                source_file_map: self.source_file_map,
            },
            memo: SelectionMemo::new(),
        };

        TestContext {
            ctx,
            executed,
            launched,
            shown,
            locate_calls,
            output,
        }
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
