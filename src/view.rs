//! The view state: every mark and every hidden row, owned in one value.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::listing::Listing;
use crate::types::{ElementId, Mark, RowId};

/// Marks and row visibility over a listing.
///
/// Operations take the current state and return the next one. A `ViewState`
/// holds at most one mark per element, so marking an element replaces any
/// mark it already had.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    /// Rows currently hidden. Every other row is visible.
    hidden_rows: BTreeSet<RowId>,
    /// Element id to its mark.
    marks: BTreeMap<ElementId, Mark>,
}

impl ViewState {
    /// Drop every mark, keep row visibility.
    pub(crate) fn clear_marks(&mut self) {
        self.marks.clear();
    }

    /// Rows currently hidden.
    pub fn hidden_rows(&self) -> impl Iterator<Item = RowId> + '_ {
        return self.hidden_rows.iter().copied();
    }

    /// Hide every row of the listing.
    pub(crate) fn hide_all_rows(&mut self, listing: &Listing) {
        self.hidden_rows = listing.rows().iter().map(|row| return row.id).collect();
    }

    /// The state of a freshly loaded listing: no marks, every row visible.
    pub fn initial() -> Self {
        return Self::default();
    }

    /// True if the row is visible.
    pub fn is_row_visible(&self, row: RowId) -> bool {
        return !self.hidden_rows.contains(&row);
    }

    /// Set the mark of an element, replacing any previous mark.
    pub(crate) fn mark(&mut self, element: &ElementId, mark: Mark) {
        self.marks.insert(element.clone(), mark);
    }

    /// The mark of an element, if any.
    pub fn mark_of(&self, element: &ElementId) -> Option<Mark> {
        return self.marks.get(element).copied();
    }

    /// Every marked element, ordered by id.
    pub fn marks(&self) -> impl Iterator<Item = (&ElementId, Mark)> {
        return self.marks.iter().map(|(id, mark)| return (id, *mark));
    }

    /// Number of marked elements.
    pub fn mark_count(&self) -> usize {
        return self.marks.len();
    }

    /// Make every row visible.
    pub(crate) fn show_all_rows(&mut self) {
        self.hidden_rows.clear();
    }

    /// Make one row visible.
    pub(crate) fn show_row(&mut self, row: RowId) {
        self.hidden_rows.remove(&row);
    }
}

/// Fire-and-forget request to bring an element into view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrollRequest {
    /// Upper bound on the scroll animation.
    pub duration_ms: u64,
    /// The element to bring into view.
    pub element: ElementId,
    /// The row holding the element.
    pub row: RowId,
}

/// Result of applying one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Scroll requested by the operation; only goto produces one.
    pub scroll: Option<ScrollRequest>,
    /// The next view state.
    pub view: ViewState,
}

impl Transition {
    /// A transition that only replaces the view.
    pub const fn to(view: ViewState) -> Self {
        return Self { scroll: None, view };
    }
}
