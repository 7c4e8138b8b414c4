// tests/task_synthesis.rs

use std::path::PathBuf;

use runlens::task::{synthesize, Presentation, PROBLEM_MATCHER, TASK_TYPE};
use runlens_test_utils::builders::RunnableBuilder;

#[test]
fn tool_args_pass_through_unchanged_without_program_args() {
    let runnable = RunnableBuilder::new("check", "cargo")
        .args(&["check", "--workspace"])
        .build();

    let spec = synthesize(&runnable, Presentation::Generic);

    assert_eq!(spec.command, "cargo");
    assert_eq!(spec.args, vec!["check", "--workspace"]);
}

#[test]
fn program_args_follow_a_single_separator() {
    let runnable = RunnableBuilder::new("run main", "tool")
        .arg("run")
        .extra_arg("--flag")
        .build();

    let spec = synthesize(&runnable, Presentation::Generic);

    assert_eq!(spec.command, "tool");
    assert_eq!(spec.args, vec!["run", "--", "--flag"]);
    assert_eq!(spec.cwd, PathBuf::from("."));
}

#[test]
fn absent_cwd_defaults_to_workspace_root() {
    let runnable = RunnableBuilder::new("run", "cargo").arg("run").build();
    let spec = synthesize(&runnable, Presentation::Dedicated);
    assert_eq!(spec.cwd, PathBuf::from("."));
}

#[test]
fn explicit_cwd_is_preserved() {
    let runnable = RunnableBuilder::new("run", "cargo")
        .arg("run")
        .cwd("backend")
        .build();
    let spec = synthesize(&runnable, Presentation::Dedicated);
    assert_eq!(spec.cwd, PathBuf::from("backend"));
}

#[test]
fn environment_is_passed_through() {
    let runnable = RunnableBuilder::new("run", "cargo")
        .arg("run")
        .env("RUST_LOG", "debug")
        .env("PORT", "8080")
        .build();

    let spec = synthesize(&runnable, Presentation::Generic);

    assert_eq!(spec.env.get("RUST_LOG").map(String::as_str), Some("debug"));
    assert_eq!(spec.env.get("PORT").map(String::as_str), Some("8080"));
}

#[test]
fn dedicated_presentation_forces_build_group_reveal_and_panel() {
    let runnable = RunnableBuilder::new("run", "cargo").arg("run").build();
    let spec = synthesize(&runnable, Presentation::Dedicated);

    assert!(spec.presentation.build_group);
    assert!(spec.presentation.reveal_always);
    assert!(spec.presentation.dedicated_panel);
    assert!(spec.presentation.clear_before_run);
}

#[test]
fn generic_presentation_only_guarantees_clearing() {
    let runnable = RunnableBuilder::new("run", "cargo").arg("run").build();
    let spec = synthesize(&runnable, Presentation::Generic);

    assert!(spec.presentation.clear_before_run);
    assert!(!spec.presentation.build_group);
    assert!(!spec.presentation.reveal_always);
    assert!(!spec.presentation.dedicated_panel);
}

#[test]
fn task_carries_type_tag_label_and_problem_matcher() {
    let runnable = RunnableBuilder::new("run server", "cargo").arg("run").build();
    let spec = synthesize(&runnable, Presentation::Dedicated);

    assert_eq!(spec.task_type, TASK_TYPE);
    assert_eq!(spec.label, "run server");
    assert_eq!(spec.problem_matcher, PROBLEM_MATCHER);
}

#[test]
fn synthesis_is_deterministic() {
    let runnable = RunnableBuilder::new("run", "cargo")
        .args(&["run", "--package", "demo"])
        .extra_arg("--verbose")
        .build();

    let first = synthesize(&runnable, Presentation::Generic);
    let second = synthesize(&runnable, Presentation::Generic);

    assert_eq!(first, second);
}
