// tests/choice_list.rs

use runlens::pick::{build_choice_list, ChoiceEntry, SelectionMemo, RERUN_DETAIL};
use runlens::types::Runnable;
use runlens_test_utils::builders::RunnableBuilder;

fn sample(label: &str) -> Runnable {
    RunnableBuilder::new(label, "cargo").arg("run").build()
}

#[test]
fn empty_candidates_without_memo_give_empty_list() {
    let entries = build_choice_list(Vec::new(), None);
    assert!(entries.is_empty());
}

#[test]
fn memo_comes_first_and_is_not_repeated() {
    let a = sample("a");
    let b = sample("b");
    let c = sample("c");

    let mut memo = SelectionMemo::new();
    memo.record(ChoiceEntry::new(b.clone()));

    let entries = build_choice_list(vec![a.clone(), b.clone(), c.clone()], memo.last());

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].runnable, b);
    assert!(entries[0].is_rerun);
    assert_eq!(entries[0].detail.as_deref(), Some(RERUN_DETAIL));
    assert_eq!(entries[1].runnable, a);
    assert_eq!(entries[2].runnable, c);
}

#[test]
fn memo_absent_from_candidates_is_still_offered_first() {
    let a = sample("a");
    let gone = sample("no longer discovered");

    let mut memo = SelectionMemo::new();
    memo.record(ChoiceEntry::new(gone.clone()));

    let entries = build_choice_list(vec![a.clone()], memo.last());

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].runnable, gone);
    assert_eq!(entries[1].runnable, a);
}

#[test]
fn duplicate_candidates_are_collapsed() {
    let a = sample("a");
    let b = sample("b");

    let entries = build_choice_list(vec![a.clone(), a.clone(), b.clone(), a.clone()], None);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].runnable, a);
    assert_eq!(entries[1].runnable, b);
}

#[test]
fn equality_is_structural_not_label_only() {
    // Same label, different tool arguments: both stay.
    let check = RunnableBuilder::new("test it", "cargo").arg("check").build();
    let test = RunnableBuilder::new("test it", "cargo").arg("test").build();

    let entries = build_choice_list(vec![check.clone(), test.clone()], None);

    assert_eq!(entries.len(), 2);
}

#[test]
fn recording_replaces_the_previous_memo() {
    let mut memo = SelectionMemo::new();
    assert!(memo.last().is_none());

    memo.record(ChoiceEntry::new(sample("first")));
    memo.record(ChoiceEntry::new(sample("second")));

    let last = memo.last().expect("memo recorded");
    assert_eq!(last.runnable.label, "second");
    assert!(last.is_rerun);
    assert_eq!(last.detail.as_deref(), Some(RERUN_DETAIL));
}
