// src/lib.rs

pub mod cli;
pub mod commands;
pub mod config;
pub mod debug;
pub mod errors;
pub mod host;
pub mod logging;
pub mod pick;
pub mod task;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CliArgs, CliCommand};
use crate::commands::{debug_single, pick_and_run, run_single, CommandContext};
use crate::config::loader::load_and_validate;
use crate::config::ConfigFile;
use crate::debug::BuildArtifactLocator;
use crate::errors::RunlensError;
use crate::host::{
    DocumentPosition, JsonDebugLauncher, ShellTaskExecutor, StaticRunnableSource,
    StderrOutputChannel, TerminalPicker, VsCodeExtensionRegistry,
};
use crate::pick::SelectionMemo;
use crate::types::Runnable;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the command context (collaborators + debug settings + memo)
/// - the requested command flow
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    match args.command {
        CliCommand::List => {
            print_runnables(&cfg);
            Ok(())
        }
        CliCommand::Pick => {
            let mut ctx = build_context(&cfg);
            // On the CLI host the "active document" is the config file the
            // static source serves runnables from.
            let position = DocumentPosition::start_of(config_path.as_path());
            pick_and_run(&mut ctx, Some(&position)).await?;
            Ok(())
        }
        CliCommand::Run { name } => {
            let ctx = build_context(&cfg);
            let runnable = find_runnable(&cfg, &name)?;
            run_single(&ctx, &runnable).await?;
            Ok(())
        }
        CliCommand::Debug { name } => {
            let ctx = build_context(&cfg);
            let runnable = find_runnable(&cfg, &name)?;
            debug_single(&ctx, &runnable).await?;
            Ok(())
        }
    }
}

/// Wire the production collaborators into a command context.
fn build_context(cfg: &ConfigFile) -> CommandContext {
    CommandContext {
        source: Some(Box::new(StaticRunnableSource::from_config(cfg))),
        picker: Box::new(TerminalPicker),
        executor: Box::new(ShellTaskExecutor),
        launcher: Box::new(JsonDebugLauncher),
        registry: Box::new(VsCodeExtensionRegistry::from_config(&cfg.debug)),
        locator: Box::new(BuildArtifactLocator),
        build_output: Arc::new(StderrOutputChannel),
        debug: cfg.debug_settings(),
        memo: SelectionMemo::new(),
    }
}

fn find_runnable(cfg: &ConfigFile, name: &str) -> errors::Result<Runnable> {
    cfg.find_runnable(name)
        .ok_or_else(|| RunlensError::RunnableNotFound(name.to_string()))
}

/// Simple listing output: print runnables and debug settings.
fn print_runnables(cfg: &ConfigFile) {
    println!("runlens runnables ({}):", cfg.runnable.len());
    for (name, rc) in cfg.runnable.iter() {
        let runnable = rc.to_runnable(name);
        println!("  - {name}");
        if runnable.label != *name {
            println!("      label: {}", runnable.label);
        }
        println!("      cmd: {runnable}");
        if !runnable.extra_args.is_empty() {
            println!("      program args: {:?}", runnable.extra_args);
        }
        if let Some(cwd) = &runnable.cwd {
            println!("      cwd: {}", cwd.display());
        }
        if !runnable.env.is_empty() {
            println!("      env: {:?}", runnable.env);
        }
    }
    println!();
    println!("  debug.engine = {}", cfg.debug.engine);
    if !cfg.debug.source_file_map.is_empty() {
        println!(
            "  debug.source_file_map: {} mapping(s)",
            cfg.debug.source_file_map.len()
        );
    }

    debug!("list complete (no execution)");
}
