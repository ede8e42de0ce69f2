//! `/pattern` execution and `n` / `N` repeats.

use super::{DispatchResult, Editor};
use crate::navigation::SearchOutcome;
use core_state::EditorError;
use tracing::debug;

pub(super) fn execute(ed: &mut Editor, pattern: &str) -> DispatchResult {
    if pattern.is_empty() {
        return DispatchResult::dirty();
    }
    let idx = ed.pool.index();
    let outcome = ed
        .nav
        .search_forward(ed.pool.current(), &mut ed.views[idx], pattern);
    report(ed, outcome, true)
}

pub(super) fn repeat(ed: &mut Editor, forward: bool) -> DispatchResult {
    if ed.nav.last_search().is_empty() {
        ed.set_error(EditorError::NoPreviousSearch);
        return DispatchResult::dirty();
    }
    let idx = ed.pool.index();
    let buffer = ed.pool.current();
    let view = &mut ed.views[idx];
    let outcome = if forward {
        ed.nav.search_next(buffer, view)
    } else {
        ed.nav.search_prev(buffer, view)
    };
    report(ed, outcome, forward)
}

fn report(ed: &mut Editor, outcome: SearchOutcome, forward: bool) -> DispatchResult {
    debug!(target: "actions.search", ?outcome, forward, "search");
    match outcome {
        SearchOutcome::Found(_) => ed.status.clear(),
        SearchOutcome::FoundWrapped(_) if forward => {
            ed.status = "search hit BOTTOM, continuing at TOP".to_string();
        }
        SearchOutcome::FoundWrapped(_) => {
            ed.status = "search hit TOP, continuing at BOTTOM".to_string();
        }
        SearchOutcome::NotFound => {
            let pattern = ed.nav.last_search().to_string();
            ed.set_error(EditorError::PatternNotFound(pattern));
        }
    }
    DispatchResult::dirty()
}
