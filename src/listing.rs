//! Annotated listing: the rendered rows and tagged elements the engine reads.
//!
//! The listing is loaded once from the JSON document contract and never
//! mutated afterwards. Elements are flattened into document order with
//! parent links so the resolver can walk the containment hierarchy.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::types::{Address, ElementId, Role, RowId, Tag, TagPair};

/// One tagged element of the listing.
#[derive(Debug, Clone)]
pub struct Element {
    /// Address identifiers in listing order; empty for elements outside any relation.
    pub addresses: Vec<Address>,
    /// Unique id within the listing.
    pub id: ElementId,
    /// Enclosing tagged element, if this one is nested.
    pub parent: Option<ElementId>,
    /// The display row holding this element.
    pub row: RowId,
    /// Category tags parsed from the class tokens.
    pub tags: BTreeSet<Tag>,
    /// Source text covered by the element.
    pub text: String,
}

impl Element {
    /// True if the element carries the given tag.
    pub fn has_tag(&self, tag: Tag) -> bool {
        return self.tags.contains(&tag);
    }

    /// The role this element plays for a tag pair, definition first.
    pub fn role_in(&self, pair: TagPair) -> Option<Role> {
        if self.has_tag(pair.def) {
            return Some(Role::Def);
        }
        if self.has_tag(pair.usage) {
            return Some(Role::Use);
        }
        return None;
    }
}

/// A display row (one source line).
#[derive(Debug, Clone)]
pub struct Row {
    /// Elements directly or indirectly inside this row, document order.
    pub elements: Vec<ElementId>,
    /// Position of the row in the listing.
    pub id: RowId,
    /// Source line number, when the renderer provided one.
    pub line: Option<u32>,
    /// Display text of the row.
    pub text: String,
}

/// The whole annotated listing.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    /// Every element in document order.
    elements: Vec<Element>,
    /// Element id to position in `elements`.
    index: HashMap<ElementId, usize>,
    /// Rows in document order.
    rows: Vec<Row>,
}

impl Listing {
    /// Look up an element by id.
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        let position = *self.index.get(id)?;
        return self.elements.get(position);
    }

    /// Every element in document order.
    pub fn elements(&self) -> &[Element] {
        return &self.elements;
    }

    /// Elements carrying `tag`, document order.
    pub fn elements_tagged(&self, tag: Tag) -> impl Iterator<Item = &Element> {
        return self.elements.iter().filter(move |e| return e.has_tag(tag));
    }

    /// The enclosing tagged element of `element`, if any.
    pub fn parent_of(&self, element: &Element) -> Option<&Element> {
        return element.parent.as_ref().and_then(|id| return self.element(id));
    }

    /// Parse a listing from its JSON document.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if the content is not valid JSON of the expected
    /// shape, or `Error::ListingCorrupt` if element ids are empty or repeated.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: RawListing = serde_json::from_str(content)?;
        return Self::from_raw(raw);
    }

    /// Read and parse a listing from disk.
    ///
    /// # Errors
    ///
    /// Returns `Error::ListingNotFound` if the file doesn't exist,
    /// `Error::Io` for other read failures, or any error from [`Listing::parse`].
    pub fn read(path: &Path) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ListingNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        let listing = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            rows = listing.rows.len(),
            elements = listing.elements.len(),
            "loaded listing"
        );
        return Ok(listing);
    }

    /// Look up a row by id.
    pub fn row(&self, id: RowId) -> Option<&Row> {
        return self.rows.get(id.0);
    }

    /// Rows in document order.
    pub fn rows(&self) -> &[Row] {
        return &self.rows;
    }

    /// Flatten the raw document into rows and parent-linked elements.
    ///
    /// # Errors
    ///
    /// Returns `Error::ListingCorrupt` on empty or duplicate element ids.
    fn from_raw(raw: RawListing) -> Result<Self, Error> {
        let mut listing = Self::default();
        for (position, raw_row) in raw.rows.into_iter().enumerate() {
            let row_id = RowId(position);
            let mut row_elements = Vec::new();
            for raw_element in raw_row.elements {
                listing.push_element_tree(raw_element, row_id, None, &mut row_elements)?;
            }
            listing.rows.push(Row {
                elements: row_elements,
                id: row_id,
                line: raw_row.line,
                text: raw_row.text,
            });
        }
        return Ok(listing);
    }

    /// Add an element and its descendants, pre-order, under `parent`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ListingCorrupt` on empty or duplicate element ids.
    fn push_element_tree(
        &mut self,
        raw: RawElement,
        row: RowId,
        parent: Option<&ElementId>,
        row_elements: &mut Vec<ElementId>,
    ) -> Result<(), Error> {
        if raw.id.trim().is_empty() {
            return Err(Error::ListingCorrupt {
                reason: format!("element with empty id in {row}"),
            });
        }
        let id = ElementId(raw.id);
        if self.index.contains_key(&id) {
            return Err(Error::ListingCorrupt {
                reason: format!("duplicate element id `{id}` in {row}"),
            });
        }

        let addresses = parse_address_list(&raw.address);
        let repeats = addresses.iter().enumerate().any(|(i, a)| return addresses.iter().take(i).any(|b| return b == a));
        if repeats {
            tracing::warn!(%id, address = %raw.address, "element repeats an address");
        }
        let element = Element {
            addresses,
            id: id.clone(),
            parent: parent.cloned(),
            row,
            tags: parse_class_tokens(&raw.class),
            text: raw.text,
        };
        self.index.insert(id.clone(), self.elements.len());
        self.elements.push(element);
        row_elements.push(id.clone());

        for child in raw.children {
            self.push_element_tree(child, row, Some(&id), row_elements)?;
        }
        return Ok(());
    }
}

/// Split a comma-joined address attribute, dropping empty segments.
/// Segments are opaque and kept byte for byte.
fn parse_address_list(raw: &str) -> Vec<Address> {
    return raw
        .split(',')
        .filter(|segment| return !segment.is_empty())
        .map(|segment| return Address(segment.to_string()))
        .collect();
}

/// Keep the class tokens that belong to the tag vocabulary.
fn parse_class_tokens(raw: &str) -> BTreeSet<Tag> {
    return raw.split_whitespace().filter_map(|token| return token.parse().ok()).collect();
}

/// Raw JSON shape of a listing document.
#[derive(Deserialize)]
struct RawListing {
    /// Rows in display order.
    #[serde(default)]
    rows: Vec<RawRow>,
}

/// Raw JSON shape of a row.
#[derive(Deserialize)]
struct RawRow {
    /// Top-level elements of the row.
    #[serde(default)]
    elements: Vec<RawElement>,
    /// Optional source line number.
    #[serde(default)]
    line: Option<u32>,
    /// Display text of the row.
    #[serde(default)]
    text: String,
}

/// Raw JSON shape of an element.
#[derive(Deserialize)]
struct RawElement {
    /// Comma-joined address identifiers.
    #[serde(default)]
    address: String,
    /// Nested elements.
    #[serde(default)]
    children: Vec<RawElement>,
    /// Whitespace-separated class tokens.
    #[serde(default)]
    class: String,
    /// Unique element id.
    id: String,
    /// Covered source text.
    #[serde(default)]
    text: String,
}
