//! Address resolution: from a selected element to the addresses it refers to.

use crate::listing::{Element, Listing};
use crate::types::{AddressSet, ElementId, TagPair};

/// The nearest tagged ancestor found for a selection, with its addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Addresses of the tagged element.
    pub addresses: AddressSet,
    /// The tagged element itself (the origin of the selection).
    pub element: ElementId,
}

/// Find the nearest element at or above `origin` tagged with either side of `pair`.
///
/// Selections often land on nested decoration inside a tagged element, so the
/// walk starts at the origin and climbs parent links until it leaves the
/// annotated hierarchy.
pub fn nearest_tagged<'a>(listing: &'a Listing, origin: &ElementId, pair: TagPair) -> Option<&'a Element> {
    let mut current = listing.element(origin);
    while let Some(element) = current {
        if element.role_in(pair).is_some() {
            return Some(element);
        }
        current = listing.parent_of(element);
    }
    return None;
}

/// Resolve the address set a selection refers to for a tag pair.
///
/// Returns `None` when no tagged ancestor exists or `origin` is not in the
/// listing. A tagged ancestor without addresses resolves to an empty set,
/// which matches nothing downstream.
pub fn resolve(listing: &Listing, origin: &ElementId, pair: TagPair) -> Option<Resolved> {
    let Some(element) = nearest_tagged(listing, origin, pair) else {
        tracing::debug!(%origin, def = %pair.def, "no tagged ancestor");
        return None;
    };

    let addresses = AddressSet::from_addresses(&element.addresses);
    tracing::debug!(%origin, element = %element.id, addresses = ?addresses.as_slice(), "resolved selection");
    return Some(Resolved { addresses, element: element.id.clone() });
}
