//! Slice engine: restrict visible rows to those holding related facts.

use crate::highlight;
use crate::listing::Listing;
use crate::types::{AddressSet, FactKind, TagPair};
use crate::view::ViewState;

/// Make every row visible; marks are kept.
pub fn show_all_rows(view: &ViewState) -> ViewState {
    let mut next = view.clone();
    next.show_all_rows();
    return next;
}

/// Show only the rows holding definitions or uses of `kind` related to `addresses`.
///
/// Marks are replaced by the related facts and every marked element's row is
/// the only kind of row left visible. With no address set the current view is
/// returned unchanged, so a selection outside any fact leaves an existing
/// slice in place.
pub fn slice_to_related(
    listing: &Listing,
    view: &ViewState,
    kind: FactKind,
    addresses: Option<&AddressSet>,
) -> ViewState {
    let Some(addresses) = addresses else {
        tracing::debug!(%kind, "nothing to slice on, view unchanged");
        return view.clone();
    };

    let mut next = highlight::clear_all(view);
    next.hide_all_rows(listing);
    let marked = highlight::mark_related(listing, &mut next, TagPair::fact(kind), addresses);
    for element in &marked {
        next.show_row(element.row);
    }
    tracing::debug!(
        %kind,
        marked = marked.len(),
        visible = listing.rows().len().saturating_sub(next.hidden_rows().count()),
        "sliced listing"
    );
    return next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::types::{Address, Mark, RowId};

    fn set(ids: &[&str]) -> AddressSet {
        let addresses: Vec<Address> = ids.iter().map(|id| return Address((*id).to_string())).collect();
        return AddressSet::from_addresses(&addresses);
    }

    fn visible_rows(listing: &Listing, view: &ViewState) -> Vec<usize> {
        return listing
            .rows()
            .iter()
            .filter(|row| return view.is_row_visible(row.id))
            .map(|row| return row.id.0)
            .collect();
    }

    #[test]
    fn slice_keeps_only_rows_with_related_facts() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        let view = slice_to_related(&listing, &ViewState::initial(), FactKind::Variable, Some(&set(&["y1"])));
        assert_eq!(visible_rows(&listing, &view), vec![1, 2]);
    }

    #[test]
    fn visible_rows_are_exactly_rows_with_marks() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        for (kind, address) in [
            (FactKind::Variable, "x1"),
            (FactKind::Value, "v1"),
            (FactKind::CallSite, "f1"),
            (FactKind::Condition, "c1"),
            (FactKind::Variable, "unknown"),
        ] {
            let view = slice_to_related(&listing, &ViewState::initial(), kind, Some(&set(&[address])));
            for row in listing.rows() {
                let has_mark = row.elements.iter().any(|id| return view.mark_of(id).is_some());
                assert_eq!(view.is_row_visible(row.id), has_mark, "{kind} {address} {}", row.id);
            }
        }
    }

    #[test]
    fn slice_replaces_previous_marks() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        let before = highlight::show_all(&listing, FactKind::CallSite);
        let view = slice_to_related(&listing, &before, FactKind::Value, Some(&set(&["v1"])));
        let marks: Vec<(String, Mark)> = view.marks().map(|(id, m)| return (id.to_string(), m)).collect();
        assert_eq!(
            marks,
            vec![("one".to_string(), Mark::Def), ("x-val".to_string(), Mark::Use)]
        );
    }

    #[test]
    fn slice_without_addresses_leaves_view_untouched() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        let before = slice_to_related(&listing, &ViewState::initial(), FactKind::Variable, Some(&set(&["x1"])));
        let after = slice_to_related(&listing, &before, FactKind::Variable, None);
        assert_eq!(before, after);
        assert!(after.mark_count() > 0);
    }

    #[test]
    fn show_all_rows_keeps_marks() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        let sliced = slice_to_related(&listing, &ViewState::initial(), FactKind::Variable, Some(&set(&["x1"])));
        let view = show_all_rows(&sliced);
        assert!(view.is_row_visible(RowId(4)));
        assert_eq!(view.mark_count(), sliced.mark_count());
    }
}
