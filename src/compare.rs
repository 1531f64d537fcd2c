//! Sequence comparator - aligns a captured action stream against an opener
//!
//! Pure synchronous functions; all collaborators are passed in, so the
//! comparator is testable with a fixed catalog and registry. The recovery
//! heuristic is deliberately single-step: on a mismatch it looks one expected
//! slot ahead and realigns by at most one position, never re-evaluating
//! earlier hypotheses. It is not a general edit-distance alignment.

use crate::actions::{ActionCatalog, CATCH_ALL_NAME, GroupRegistry, OLD_ACTION_NAME, Slot};
use crate::feedback::{Feedback, MessageKind};

/// Message emitted on a perfect run
pub const PERFECT_MESSAGE: &str = "Great job! Opener executed perfectly.";

/// Display name for a decoded slot, group and catch-all slots included.
/// An unregistered group reads as an old action, mirroring the catalog's
/// unknown-id fallback.
pub fn slot_name(slot: Slot, catalog: &dyn ActionCatalog, groups: &GroupRegistry) -> String {
    match slot {
        Slot::Concrete(id) => catalog.action_name(id),
        Slot::CatchAll => CATCH_ALL_NAME.to_string(),
        Slot::Group(raw) => groups
            .resolve(raw)
            .map(|g| g.name().to_string())
            .unwrap_or_else(|| OLD_ACTION_NAME.to_string()),
    }
}

/// Whether a captured action satisfies an expected slot.
///
/// Group slots require membership; an unresolvable group reference is a
/// data-authoring error in the opener and simply never matches. Concrete
/// slots accept an exact id or a fuzzy display-name match, which tolerates
/// action-tier upgrades that rename but conceptually replace an action.
pub fn slots_equal(
    slot: Slot,
    actual: u32,
    catalog: &dyn ActionCatalog,
    groups: &GroupRegistry,
) -> bool {
    match slot {
        Slot::CatchAll => true,
        Slot::Group(raw) => groups.resolve(raw).is_some_and(|g| g.is_member(actual)),
        Slot::Concrete(id) => {
            id == actual || catalog.names_match(&catalog.action_name(id), actual)
        }
    }
}

/// Single-step recovery test: after a mismatch at `opener_index`, does the
/// next expected slot already match the captured action? If so the player
/// skipped one expected action and the walk realigns by one.
fn should_shift(
    expected: &[i32],
    opener_index: usize,
    size: usize,
    used_value: u32,
    catalog: &dyn ActionCatalog,
    groups: &GroupRegistry,
) -> bool {
    if opener_index + 1 >= size {
        return false;
    }
    let next = Slot::decode(expected[opener_index + 1]);
    expected[opener_index + 1] == used_value as i32
        || catalog.names_match(&slot_name(next, catalog, groups), used_value)
}

/// Compare a captured action stream against the expected opener slots.
///
/// `on_wrong` is invoked with the expected-sequence index of every mismatch,
/// so the editor can highlight the slot. The returned feedback holds one
/// Success line for a perfect run, one Error line per mismatch otherwise,
/// and a trailing Info line when the walk realigned.
pub fn compare(
    expected: &[i32],
    used: &[u32],
    catalog: &dyn ActionCatalog,
    groups: &GroupRegistry,
    mut on_wrong: impl FnMut(usize),
) -> Feedback {
    let mut feedback = Feedback::new();

    // Trailing captures beyond the opener length were already cut off by the
    // recorder's own early-stop logic; ignore any that slipped through.
    let used = &used[..used.len().min(expected.len())];

    // Exact path first so the common case short-circuits
    if expected.len() == used.len() && expected.iter().zip(used).all(|(&e, &u)| e == u as i32) {
        feedback.add(MessageKind::Success, PERFECT_MESSAGE);
        return feedback;
    }

    let size = expected.len().min(used.len());
    let mut shift = 0usize;
    let mut error = false;
    let mut i = 0usize;

    while i + shift < size {
        let opener_index = i + shift;
        let slot = Slot::decode(expected[opener_index]);

        if !slots_equal(slot, used[i], catalog, groups) {
            error = true;
            feedback.add(
                MessageKind::Error,
                format!(
                    "Difference in action {}: Substituted {} for {}",
                    i + 1,
                    slot_name(slot, catalog, groups),
                    catalog.action_name(used[i])
                ),
            );
            on_wrong(opener_index);

            if should_shift(expected, opener_index, size, used[i], catalog, groups) {
                shift += 1;
            }
        }

        i += 1;
    }

    if !error && shift == 0 {
        feedback.add(MessageKind::Success, PERFECT_MESSAGE);
    }

    if shift != 0 {
        feedback.add(
            MessageKind::Info,
            format!(
                "You shifted your opener by {} {}.",
                shift,
                if shift == 1 { "action" } else { "actions" }
            ),
        );
    }

    feedback
}
