//! Listing statistics: what a listing holds and where goto would be ambiguous.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use serde::Serialize;

use crate::listing::{Element, Listing};
use crate::types::{Address, ElementId, FactKind, NavKind, Tag, TagPair};

/// An address whose navigable definitions disagree on their address sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousAddress {
    /// The shared address.
    pub address: Address,
    /// Definitions carrying the address, document order.
    pub definitions: Vec<ElementId>,
    /// Navigable kind of the definitions.
    pub kind: NavKind,
}

/// Summary of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Distinct addresses per fact kind.
    pub addresses: BTreeMap<FactKind, usize>,
    /// Addresses for which goto would slice instead of scroll.
    pub ambiguous: Vec<AmbiguousAddress>,
    /// Total element count.
    pub elements: usize,
    /// Element count per tag token.
    pub per_tag: BTreeMap<String, usize>,
    /// Total row count.
    pub rows: usize,
    /// Elements carrying at least one tag.
    pub tagged: usize,
}

impl Stats {
    /// Gather statistics over a listing.
    pub fn collect(listing: &Listing) -> Self {
        let mut per_tag = BTreeMap::new();
        for tag in Tag::all() {
            per_tag.insert(tag.to_string(), listing.elements_tagged(tag).count());
        }

        let addresses = FactKind::ALL
            .into_iter()
            .map(|kind| return (kind, distinct_addresses(listing, TagPair::fact(kind)).len()))
            .collect();

        let ambiguous = NavKind::ALL
            .into_iter()
            .flat_map(|kind| return ambiguous_addresses(listing, kind))
            .collect();

        return Self {
            addresses,
            ambiguous,
            elements: listing.elements().len(),
            per_tag,
            rows: listing.rows().len(),
            tagged: listing.elements().iter().filter(|e| return !e.tags.is_empty()).count(),
        };
    }

    /// Render as markdown.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Listing\n");
        let _ = writeln!(out, "Rows:     {}", self.rows);
        let _ = writeln!(out, "Elements: {} ({} tagged)\n", self.elements, self.tagged);

        out.push_str("## Tags\n\n| Tag | Elements |\n|-----|----------|\n");
        for (tag, count) in &self.per_tag {
            let _ = writeln!(out, "| {tag} | {count} |");
        }

        out.push_str("\n## Addresses\n\n");
        for (kind, count) in &self.addresses {
            let _ = writeln!(out, "- {kind}: {count}");
        }

        out.push_str("\n## Ambiguous goto targets\n\n");
        if self.ambiguous.is_empty() {
            out.push_str("(none)\n");
        }
        for entry in &self.ambiguous {
            let definitions = entry.definitions.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            let _ = writeln!(out, "- {} `{}`: {definitions}", entry.kind.label(), entry.address);
        }
        return out;
    }
}

/// Addresses where two or more navigable definitions differ in their sequences.
fn ambiguous_addresses(listing: &Listing, kind: NavKind) -> Vec<AmbiguousAddress> {
    let pair = TagPair::navigable(kind);
    let mut by_address: BTreeMap<&Address, Vec<&Element>> = BTreeMap::new();
    for element in listing.elements_tagged(pair.def) {
        let unique: BTreeSet<&Address> = element.addresses.iter().collect();
        for address in unique {
            by_address.entry(address).or_default().push(element);
        }
    }

    let mut ambiguous = Vec::new();
    for (address, definitions) in by_address {
        let Some((first, rest)) = definitions.split_first() else {
            continue;
        };
        if rest.iter().all(|d| return d.addresses == first.addresses) {
            continue;
        }
        tracing::debug!(%address, candidates = definitions.len(), "ambiguous goto address");
        ambiguous.push(AmbiguousAddress {
            address: address.clone(),
            definitions: definitions.iter().map(|d| return d.id.clone()).collect(),
            kind,
        });
    }
    return ambiguous;
}

/// Distinct addresses carried by the definitions and uses of a pair.
fn distinct_addresses(listing: &Listing, pair: TagPair) -> BTreeSet<&Address> {
    return listing
        .elements()
        .iter()
        .filter(|e| return e.role_in(pair).is_some())
        .flat_map(|e| return e.addresses.iter())
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn counts_rows_elements_and_tags() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        let stats = Stats::collect(&listing);
        assert_eq!(stats.rows, 5);
        assert_eq!(stats.elements, 12);
        assert_eq!(stats.tagged, 11);
        assert_eq!(stats.per_tag["ENV-USE"], 3);
        assert_eq!(stats.per_tag["DVAL-DEF"], 1);
        assert_eq!(stats.addresses[&FactKind::Variable], 3);
        assert!(stats.ambiguous.is_empty());
    }

    #[test]
    fn reports_addresses_with_disagreeing_definitions() {
        let listing = Listing::parse(fixtures::AMBIGUOUS).unwrap();
        let stats = Stats::collect(&listing);
        assert_eq!(stats.ambiguous.len(), 1);
        let entry = &stats.ambiguous[0];
        assert_eq!(entry.address, Address("a1".to_string()));
        assert_eq!(entry.kind, NavKind::Variable);
        assert_eq!(entry.definitions, vec![ElementId::from("d1"), ElementId::from("d2")]);
        assert!(stats.to_markdown().contains("- Variable Def `a1`: d1, d2"));
    }
}
