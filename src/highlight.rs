//! Highlight engine: def/use marks over one fact kind at a time.

use crate::listing::{Element, Listing};
use crate::resolver;
use crate::types::{AddressSet, ElementId, FactKind, Mark, Role, TagPair};
use crate::view::ViewState;

/// Remove every def/use/goto mark; row visibility is kept.
pub fn clear_all(view: &ViewState) -> ViewState {
    let mut next = view.clone();
    next.clear_marks();
    return next;
}

/// Mark every use and definition of `pair` accepted by `filter`.
///
/// Uses are marked before definitions, so an element carrying both tags ends
/// up marked as a definition. Returns the marked elements in marking order.
pub(crate) fn mark_pair<'a>(
    listing: &'a Listing,
    view: &mut ViewState,
    pair: TagPair,
    filter: impl Fn(&Element) -> bool,
) -> Vec<&'a Element> {
    let mut marked = Vec::new();
    for (tag, mark) in [(pair.usage, Mark::Use), (pair.def, Mark::Def)] {
        for element in listing.elements_tagged(tag).filter(|e| return filter(e)) {
            view.mark(&element.id, mark);
            marked.push(element);
        }
    }
    return marked;
}

/// Mark every use and definition of `pair` whose addresses meet `addresses`.
pub(crate) fn mark_related<'a>(
    listing: &'a Listing,
    view: &mut ViewState,
    pair: TagPair,
    addresses: &AddressSet,
) -> Vec<&'a Element> {
    return mark_pair(listing, view, pair, |e| return addresses.intersects(&e.addresses));
}

/// Show every row and mark every definition and use of `kind`.
pub fn show_all(listing: &Listing, kind: FactKind) -> ViewState {
    let mut next = ViewState::initial();
    let marked = mark_pair(listing, &mut next, TagPair::fact(kind), |_| return true);
    tracing::debug!(%kind, marked = marked.len(), "highlighted all facts");
    return next;
}

/// Show every row and mark the definitions and uses of `kind` related to `addresses`.
///
/// An element is related when it shares at least one address with the set.
pub fn show_related(listing: &Listing, kind: FactKind, addresses: &AddressSet) -> ViewState {
    let mut next = ViewState::initial();
    let marked = mark_related(listing, &mut next, TagPair::fact(kind), addresses);
    tracing::debug!(%kind, marked = marked.len(), "highlighted related facts");
    return next;
}

/// Mark the `DEF-tag`/`USE-tag` elements linked to the selection.
///
/// Elements are linked when their address lists are identical. Selecting a
/// definition marks it and its linked uses. Selecting a use marks every linked
/// use and definition, with the selection itself marked as the definition.
/// Rows are left as they are; a selection outside any linked element changes
/// nothing.
pub fn show_linked(listing: &Listing, view: &ViewState, origin: &ElementId) -> ViewState {
    let pair = TagPair::linked();
    let Some(selected) = resolver::nearest_tagged(listing, origin, pair) else {
        tracing::debug!(%origin, "selection is not linked");
        return view.clone();
    };

    let mut next = clear_all(view);
    let linked = |e: &Element| return e.addresses == selected.addresses;
    let marked = match selected.role_in(pair) {
        Some(Role::Def) => {
            let uses: Vec<&Element> = listing.elements_tagged(pair.usage).filter(|e| return linked(*e)).collect();
            for element in &uses {
                next.mark(&element.id, Mark::Use);
            }
            uses.len()
        },
        _ => mark_pair(listing, &mut next, pair, linked).len(),
    };
    next.mark(&selected.id, Mark::Def);
    tracing::debug!(%origin, element = %selected.id, marked, "highlighted linked facts");
    return next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::types::{Address, RowId};

    fn set(ids: &[&str]) -> AddressSet {
        let addresses: Vec<Address> = ids.iter().map(|id| return Address((*id).to_string())).collect();
        return AddressSet::from_addresses(&addresses);
    }

    fn marked_ids(view: &ViewState) -> Vec<(String, Mark)> {
        return view.marks().map(|(id, mark)| return (id.to_string(), mark)).collect();
    }

    #[test]
    fn show_all_marks_every_variable_fact() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        let view = show_all(&listing, FactKind::Variable);
        assert_eq!(
            marked_ids(&view),
            vec![
                ("a-def".to_string(), Mark::Def),
                ("x-def".to_string(), Mark::Def),
                ("x-use".to_string(), Mark::Use),
                ("y-arg".to_string(), Mark::Use),
                ("y-def".to_string(), Mark::Def),
                ("y-use".to_string(), Mark::Use),
            ]
        );
    }

    #[test]
    fn show_all_is_idempotent_for_every_kind() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        for kind in FactKind::ALL {
            let once = show_all(&listing, kind);
            let twice = show_all(&listing, kind);
            assert_eq!(once, twice, "{kind}");
        }
    }

    #[test]
    fn show_all_restores_row_visibility_and_drops_other_kinds() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        let mut sliced = show_all(&listing, FactKind::Value);
        sliced.hide_all_rows(&listing);

        let view = show_all(&listing, FactKind::CallSite);
        assert_eq!(view.hidden_rows().count(), 0);
        assert_eq!(
            marked_ids(&view),
            vec![("call".to_string(), Mark::Use), ("f-def".to_string(), Mark::Def)]
        );
    }

    #[test]
    fn show_related_marks_exactly_the_intersecting_elements() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        let addresses = set(&["y1"]);
        let view = show_related(&listing, FactKind::Variable, &addresses);
        for element in listing.elements() {
            let Some(role) = element.role_in(TagPair::fact(FactKind::Variable)) else {
                assert_eq!(view.mark_of(&element.id), None, "{}", element.id);
                continue;
            };
            let expected = addresses.intersects(&element.addresses).then_some(match role {
                Role::Def => Mark::Def,
                Role::Use => Mark::Use,
            });
            assert_eq!(view.mark_of(&element.id), expected, "{}", element.id);
        }
        assert_eq!(view.mark_count(), 3);
    }

    #[test]
    fn show_related_is_idempotent() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        for (kind, address) in [(FactKind::Variable, "y1"), (FactKind::Value, "v1"), (FactKind::CallSite, "f1")] {
            let once = show_related(&listing, kind, &set(&[address]));
            let twice = show_related(&listing, kind, &set(&[address]));
            assert_eq!(once, twice, "{kind}");
            assert!(once.mark_count() > 0, "{kind}");
        }
    }

    #[test]
    fn selecting_a_linked_definition_marks_it_and_its_uses() {
        let listing = Listing::parse(fixtures::LINKED).unwrap();
        let view = show_linked(&listing, &ViewState::initial(), &ElementId::from("f-def"));
        assert_eq!(
            marked_ids(&view),
            vec![
                ("f-call".to_string(), Mark::Use),
                ("f-def".to_string(), Mark::Def),
                ("f-ref".to_string(), Mark::Use),
            ]
        );
    }

    #[test]
    fn selecting_a_linked_use_turns_it_into_the_definition() {
        let listing = Listing::parse(fixtures::LINKED).unwrap();
        let view = show_linked(&listing, &ViewState::initial(), &ElementId::from("f-name"));
        assert_eq!(
            marked_ids(&view),
            vec![
                ("f-call".to_string(), Mark::Def),
                ("f-def".to_string(), Mark::Def),
                ("f-redef".to_string(), Mark::Def),
                ("f-ref".to_string(), Mark::Use),
            ]
        );
    }

    #[test]
    fn linked_elements_need_identical_address_lists() {
        let listing = Listing::parse(fixtures::LINKED).unwrap();
        let view = show_linked(&listing, &ViewState::initial(), &ElementId::from("g-def"));
        // g-use shares f1 with g-def but its list differs
        assert_eq!(marked_ids(&view), vec![("g-def".to_string(), Mark::Def)]);
    }

    #[test]
    fn unlinked_selection_changes_nothing() {
        let listing = Listing::parse(fixtures::LINKED).unwrap();
        let before = show_linked(&listing, &ViewState::initial(), &ElementId::from("f-def"));
        let mut sliced = before.clone();
        sliced.hide_all_rows(&listing);
        assert_eq!(show_linked(&listing, &sliced, &ElementId::from("plain")), sliced);

        let after = show_linked(&listing, &sliced, &ElementId::from("g-def"));
        assert_eq!(after.hidden_rows().count(), listing.rows().len());
        assert_eq!(after.mark_of(&ElementId::from("f-def")), None);
    }

    #[test]
    fn show_related_matches_on_any_shared_address() {
        let listing = Listing::parse(fixtures::AMBIGUOUS).unwrap();
        let view = show_related(&listing, FactKind::Variable, &set(&["a2", "nope"]));
        assert_eq!(marked_ids(&view), vec![("d1".to_string(), Mark::Def)]);
    }

    #[test]
    fn element_with_both_roles_is_marked_def() {
        let content = r#"{"rows":[{"elements":[{"id":"e1","class":"ENV-USE ENV-DEF","address":"a1"}]}]}"#;
        let listing = Listing::parse(content).unwrap();
        let view = show_all(&listing, FactKind::Variable);
        assert_eq!(view.mark_of(&ElementId::from("e1")), Some(Mark::Def));
    }

    #[test]
    fn clear_all_keeps_visibility() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        let mut view = show_all(&listing, FactKind::Variable);
        view.hide_all_rows(&listing);
        let cleared = clear_all(&view);
        assert_eq!(cleared.mark_count(), 0);
        assert!(!cleared.is_row_visible(RowId(0)));
    }
}
