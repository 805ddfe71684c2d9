//! Goto-definition: jump to the definition of a selection, or slice to the
//! candidates when several different definitions share its addresses.

use crate::listing::{Element, Listing};
use crate::resolver;
use crate::types::{ElementId, Mark, NavKind, TagPair};
use crate::view::{ScrollRequest, Transition, ViewState};

/// Default upper bound on the scroll animation.
pub const DEFAULT_SCROLL_MS: u64 = 200;

/// Outcome of the ambiguity check over the collected targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Several targets with differing address sequences; rows were sliced.
    Ambiguous,
    /// No definition shares the selection's addresses.
    NoTarget,
    /// Nothing at or above the origin carries the navigable tags.
    Unresolved,
    /// All targets agree; the first one is scrolled to.
    Unique,
}

/// Go to the definition of the navigable fact at `origin`.
///
/// Marks are cleared first. The resolved origin element is marked as a use
/// and every navigable definition sharing an address with it is marked as a
/// goto target, replacing a use mark on the same element. Targets whose
/// address sequences are all identical (position by position) count as one
/// definition and the first is scrolled to; otherwise every row except the
/// origin's and the targets' is hidden.
pub fn goto_definition(
    listing: &Listing,
    view: &ViewState,
    kind: NavKind,
    origin: &ElementId,
    scroll_duration_ms: u64,
) -> (Transition, Navigation) {
    let pair = TagPair::navigable(kind);
    let mut next = view.clone();
    next.clear_marks();

    let Some(resolved) = resolver::resolve(listing, origin, pair) else {
        return (Transition::to(next), Navigation::Unresolved);
    };
    next.mark(&resolved.element, Mark::Use);

    let mut targets: Vec<&Element> = Vec::new();
    for element in listing.elements_tagged(pair.def) {
        if resolved.addresses.intersects(&element.addresses) {
            next.mark(&element.id, Mark::Goto);
            targets.push(element);
        }
    }

    let Some(first) = targets.first() else {
        tracing::debug!(%origin, "goto found no definition");
        return (Transition::to(next), Navigation::NoTarget);
    };

    if targets_agree(&targets) {
        tracing::debug!(%origin, target = %first.id, "goto scrolls to definition");
        let scroll = ScrollRequest {
            duration_ms: scroll_duration_ms,
            element: first.id.clone(),
            row: first.row,
        };
        return (Transition { scroll: Some(scroll), view: next }, Navigation::Unique);
    }

    tracing::debug!(%origin, candidates = targets.len(), "goto is ambiguous, slicing candidates");
    next.hide_all_rows(listing);
    if let Some(origin_element) = listing.element(&resolved.element) {
        next.show_row(origin_element.row);
    }
    for target in &targets {
        next.show_row(target.row);
    }
    return (Transition::to(next), Navigation::Ambiguous);
}

/// True if every target carries the same address sequence, in the same order.
fn targets_agree(targets: &[&Element]) -> bool {
    let Some((first, rest)) = targets.split_first() else {
        return true;
    };
    return rest.iter().all(|t| return t.addresses == first.addresses);
}
