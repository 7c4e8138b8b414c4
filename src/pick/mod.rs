// src/pick/mod.rs

//! Runnable picking: memo-aware choice lists and the selection memo.
//!
//! The "pick and run" flow shows the user a deduplicated list of runnables
//! with the previously chosen one (if any) on top. The memo is a single
//! caller-owned slot that lives in the command context for the session; it
//! is overwritten exactly when a pick completes and is never cleared.

use tracing::debug;

use crate::types::Runnable;

/// Detail string attached to the remembered entry when it is offered again.
pub const RERUN_DETAIL: &str = "rerun";

/// One presentable choice: a runnable plus its display metadata.
///
/// Deliberately a plain composed structure, not a trait object; nothing
/// here needs dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceEntry {
    pub runnable: Runnable,
    /// Secondary display line, e.g. [`RERUN_DETAIL`] for the memoized entry.
    pub detail: Option<String>,
    /// Whether this entry is the remembered previous selection.
    pub is_rerun: bool,
}

impl ChoiceEntry {
    pub fn new(runnable: Runnable) -> Self {
        Self {
            runnable,
            detail: None,
            is_rerun: false,
        }
    }

    /// Primary display line.
    pub fn label(&self) -> &str {
        &self.runnable.label
    }
}

/// The single remembered prior selection.
///
/// Created empty at session start and threaded through the command
/// context rather than held in a process-wide global. Each completed pick
/// replaces the previous value; a cancelled pick leaves it untouched.
#[derive(Debug, Default)]
pub struct SelectionMemo {
    last: Option<ChoiceEntry>,
}

impl SelectionMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// The remembered entry, if a pick has completed this session.
    pub fn last(&self) -> Option<&ChoiceEntry> {
        self.last.as_ref()
    }

    /// Record a completed pick, overwriting the entry's metadata to mark it
    /// as the rerun candidate for the next choice list.
    pub fn record(&mut self, mut entry: ChoiceEntry) {
        entry.is_rerun = true;
        entry.detail = Some(RERUN_DETAIL.to_string());
        debug!(label = %entry.runnable.label, "memoizing selection");
        self.last = Some(entry);
    }
}

/// Build the ordered choice list for a pick.
///
/// - The memoized entry, if present, always comes first.
/// - Every candidate whose descriptor is structurally equal to an entry
///   already in the list is omitted, so the result never shows the same
///   target twice (even when `candidates` itself contains duplicates).
pub fn build_choice_list(candidates: Vec<Runnable>, memo: Option<&ChoiceEntry>) -> Vec<ChoiceEntry> {
    let mut entries: Vec<ChoiceEntry> = Vec::with_capacity(candidates.len() + 1);

    if let Some(prev) = memo {
        entries.push(prev.clone());
    }

    for candidate in candidates {
        if entries.iter().any(|e| e.runnable == candidate) {
            continue;
        }
        entries.push(ChoiceEntry::new(candidate));
    }

    entries
}
