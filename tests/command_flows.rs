// tests/command_flows.rs

use runlens::commands::{debug_single, pick_and_run, run_single};
use runlens::debug::engine::{CODELLDB_ID, CPPTOOLS_ID};
use runlens::debug::DebugConfig;
use runlens::errors::RunlensError;
use runlens::host::DocumentPosition;
use runlens::types::EnginePreference;
use runlens_test_utils::builders::{ContextBuilder, RunnableBuilder};
use runlens_test_utils::fakes::{LocateOutcome, PickBehaviour};
use runlens_test_utils::init_tracing;

fn position() -> DocumentPosition {
    DocumentPosition::start_of("src/main.rs")
}

#[tokio::test]
async fn pick_and_run_executes_the_choice_and_memoizes_it() {
    init_tracing();

    let a = RunnableBuilder::new("run a", "cargo").arg("run").build();
    let b = RunnableBuilder::new("test b", "cargo")
        .arg("test")
        .extra_arg("--nocapture")
        .build();

    let mut tc = ContextBuilder::new()
        .with_runnables(vec![a, b])
        .pick(PickBehaviour::Label("test b".to_string()))
        .build();

    pick_and_run(&mut tc.ctx, Some(&position()))
        .await
        .expect("flow completed");

    let executed = tc.executed.lock().unwrap();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].label, "test b");
    assert_eq!(executed[0].args, vec!["test", "--", "--nocapture"]);
    // The generic path only forces output clearing.
    assert!(executed[0].presentation.clear_before_run);
    assert!(!executed[0].presentation.build_group);
    drop(executed);

    let memo = tc.ctx.memo.last().expect("memo recorded");
    assert_eq!(memo.runnable.label, "test b");
    assert!(memo.is_rerun);
}

#[tokio::test]
async fn second_pick_offers_the_previous_choice_first() {
    init_tracing();

    let a = RunnableBuilder::new("run a", "cargo").arg("run").build();
    let b = RunnableBuilder::new("run b", "cargo").arg("build").build();

    let mut tc = ContextBuilder::new()
        .with_runnables(vec![a.clone(), b])
        .pick(PickBehaviour::First)
        .build();

    pick_and_run(&mut tc.ctx, Some(&position()))
        .await
        .expect("first pick");
    pick_and_run(&mut tc.ctx, Some(&position()))
        .await
        .expect("second pick");

    let shown = tc.shown.lock().unwrap();
    assert_eq!(shown.len(), 2);

    // First pick: plain candidates, nothing memoized yet.
    assert!(!shown[0][0].is_rerun);

    // Second pick: the memoized entry leads and the duplicate is gone.
    assert!(shown[1][0].is_rerun);
    assert_eq!(shown[1][0].runnable, a);
    assert_eq!(shown[1].len(), 2);
}

#[tokio::test]
async fn cancelled_pick_runs_nothing_and_leaves_the_memo() {
    init_tracing();

    let a = RunnableBuilder::new("run a", "cargo").arg("run").build();

    let mut tc = ContextBuilder::new()
        .with_runnables(vec![a])
        .pick(PickBehaviour::Cancel)
        .build();

    pick_and_run(&mut tc.ctx, Some(&position()))
        .await
        .expect("cancellation is not an error");

    assert!(tc.executed.lock().unwrap().is_empty());
    assert!(tc.ctx.memo.last().is_none());
}

#[tokio::test]
async fn missing_source_is_a_silent_noop() {
    init_tracing();

    let mut tc = ContextBuilder::new().without_source().build();

    pick_and_run(&mut tc.ctx, Some(&position()))
        .await
        .expect("no-op");

    assert!(tc.shown.lock().unwrap().is_empty());
    assert!(tc.executed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_document_is_a_silent_noop() {
    init_tracing();

    let a = RunnableBuilder::new("run a", "cargo").arg("run").build();
    let mut tc = ContextBuilder::new().with_runnables(vec![a]).build();

    pick_and_run(&mut tc.ctx, None).await.expect("no-op");

    assert!(tc.shown.lock().unwrap().is_empty());
    assert!(tc.executed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn run_single_skips_picking_and_uses_the_dedicated_panel() {
    init_tracing();

    let runnable = RunnableBuilder::new("run server", "cargo")
        .args(&["run", "--package", "server"])
        .extra_arg("--port")
        .extra_arg("8080")
        .build();

    let tc = ContextBuilder::new().build();

    run_single(&tc.ctx, &runnable).await.expect("task executed");

    assert!(tc.shown.lock().unwrap().is_empty());

    let executed = tc.executed.lock().unwrap();
    assert_eq!(executed.len(), 1);
    assert_eq!(
        executed[0].args,
        vec!["run", "--package", "server", "--", "--port", "8080"]
    );
    assert!(executed[0].presentation.build_group);
    assert!(executed[0].presentation.reveal_always);
    assert!(executed[0].presentation.dedicated_panel);
    assert!(executed[0].presentation.clear_before_run);
}

#[tokio::test]
async fn debug_single_hands_the_config_to_the_launcher() {
    init_tracing();

    let runnable = RunnableBuilder::new("run server", "cargo").arg("run").build();

    let tc = ContextBuilder::new()
        .installed(&[CODELLDB_ID, CPPTOOLS_ID])
        .build();

    debug_single(&tc.ctx, &runnable).await.expect("launched");

    let launched = tc.launched.lock().unwrap();
    assert_eq!(launched.len(), 1);
    assert!(matches!(launched[0], DebugConfig::Lldb(_)));
    assert_eq!(launched[0].name(), "run server");
}

#[tokio::test]
async fn failed_debug_build_never_starts_a_session() {
    init_tracing();

    let runnable = RunnableBuilder::new("run server", "cargo").arg("run").build();

    let tc = ContextBuilder::new()
        .installed(&[CPPTOOLS_ID])
        .locate(LocateOutcome::Fail("build exited with code 101".to_string()))
        .build();

    let err = debug_single(&tc.ctx, &runnable)
        .await
        .expect_err("build failed");

    assert!(matches!(err, RunlensError::BuildFailed(_)));
    assert_eq!(*tc.locate_calls.lock().unwrap(), 1);
    assert!(tc.launched.lock().unwrap().is_empty());
}

#[tokio::test]
async fn debug_without_installed_engines_aborts_with_guidance() {
    init_tracing();

    let runnable = RunnableBuilder::new("run server", "cargo").arg("run").build();

    let tc = ContextBuilder::new()
        .engine(EnginePreference::Auto)
        .build();

    let err = debug_single(&tc.ctx, &runnable)
        .await
        .expect_err("nothing installed");

    assert!(matches!(err, RunlensError::NoDebugEngine));
    assert!(tc.launched.lock().unwrap().is_empty());
    assert_eq!(*tc.locate_calls.lock().unwrap(), 0);
}
