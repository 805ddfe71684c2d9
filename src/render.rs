//! Report output: the visible outcome of a transition, as text or JSON.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::listing::Listing;
use crate::types::{Address, ElementId, Mark, RowId};
use crate::view::{ScrollRequest, Transition};

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Pretty-printed JSON.
    Json,
    /// Human-readable listing with marks.
    Text,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return match s {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(Error::UnknownFormat { name: s.to_string() }),
        };
    }
}

/// One marked element in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkedElement {
    /// Addresses of the element.
    pub addresses: Vec<Address>,
    /// Element id.
    pub element: ElementId,
    /// The element's mark.
    pub mark: Mark,
    /// Row holding the element.
    pub row: RowId,
    /// Source text of the element.
    pub text: String,
}

/// Serialisable projection of a transition over a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Hidden row indices, ascending.
    pub hidden_rows: Vec<RowId>,
    /// Marked elements in document order.
    pub marks: Vec<MarkedElement>,
    /// Scroll requested by the last operation.
    pub scroll: Option<ScrollRequest>,
    /// Visible row indices, ascending.
    pub visible_rows: Vec<RowId>,
}

impl Report {
    /// Project a transition onto the listing it was computed over.
    pub fn new(listing: &Listing, transition: &Transition) -> Self {
        let view = &transition.view;
        let marks = listing
            .elements()
            .iter()
            .filter_map(|element| {
                let mark = view.mark_of(&element.id)?;
                return Some(MarkedElement {
                    addresses: element.addresses.clone(),
                    element: element.id.clone(),
                    mark,
                    row: element.row,
                    text: element.text.clone(),
                });
            })
            .collect();
        let (visible_rows, hidden_rows): (Vec<RowId>, Vec<RowId>) = listing
            .rows()
            .iter()
            .map(|row| return row.id)
            .partition(|id| return view.is_row_visible(*id));

        return Self {
            hidden_rows,
            marks,
            scroll: transition.scroll.clone(),
            visible_rows,
        };
    }
}

/// Render a report in the requested format.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn render(listing: &Listing, report: &Report, format: Format) -> Result<String, Error> {
    return match format {
        Format::Json => Ok(serde_json::to_string_pretty(report)?),
        Format::Text => Ok(render_text(listing, report)),
    };
}

/// Render visible rows with their marks; runs of hidden rows collapse to one line.
fn render_text(listing: &Listing, report: &Report) -> String {
    let mut out = String::new();
    let mut hidden_run = 0_usize;

    for row in listing.rows() {
        if !report.visible_rows.contains(&row.id) {
            hidden_run = hidden_run.saturating_add(1);
            continue;
        }
        flush_hidden_run(&mut out, &mut hidden_run);

        let line = row.line.map_or_else(|| return row.id.0.saturating_add(1).to_string(), |l| return l.to_string());
        let _ = writeln!(out, "{line:>5} | {}", row.text);
        for marked in report.marks.iter().filter(|m| return m.row == row.id) {
            let addresses = marked.addresses.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
            let _ = writeln!(
                out,
                "      | {:<4} {} {:?} [{addresses}]",
                marked.mark.to_string(),
                marked.element,
                marked.text
            );
        }
    }
    flush_hidden_run(&mut out, &mut hidden_run);

    if let Some(scroll) = &report.scroll {
        let _ = writeln!(
            out,
            "scroll: {} ({}) within {} ms",
            scroll.element, scroll.row, scroll.duration_ms
        );
    }
    return out;
}

/// Emit the collapsed marker for a run of hidden rows and reset the counter.
fn flush_hidden_run(out: &mut String, hidden_run: &mut usize) {
    if *hidden_run == 0 {
        return;
    }
    let plural = if *hidden_run == 1 { "row" } else { "rows" };
    let _ = writeln!(out, "  ... | ({hidden_run} {plural} hidden)");
    *hidden_run = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Command, Engine};
    use crate::fixtures;
    use crate::view::ViewState;

    fn apply(listing: &Listing, name: &str, origin: Option<&str>) -> Transition {
        let op = name.parse::<Command>().unwrap().bind(listing, origin).unwrap();
        return Engine::new(listing).apply(&ViewState::initial(), &op);
    }

    #[test]
    fn report_lists_marks_in_document_order() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        let report = Report::new(&listing, &apply(&listing, "all-var", None));
        let ids: Vec<&str> = report.marks.iter().map(|m| return m.element.as_str()).collect();
        assert_eq!(ids, vec!["x-def", "y-def", "x-use", "y-use", "y-arg", "a-def"]);
        assert_eq!(report.visible_rows.len(), 5);
        assert!(report.hidden_rows.is_empty());
    }

    #[test]
    fn text_collapses_hidden_rows() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        let report = Report::new(&listing, &apply(&listing, "sli-call", Some("call")));
        let text = render(&listing, &report, Format::Text).unwrap();
        assert_eq!(
            text,
            "  ... | (2 rows hidden)\n\
             \x20   3 | if (y) f(y);\n\
             \x20     | use  call \"f(y)\" [f1]\n\
             \x20   4 | function f(a) {}\n\
             \x20     | def  f-def \"f\" [f1]\n\
             \x20 ... | (1 row hidden)\n"
        );
    }

    #[test]
    fn text_ends_with_the_scroll_request() {
        let listing = Listing::parse(fixtures::PROGRAM).unwrap();
        let report = Report::new(&listing, &apply(&listing, "goto-var", Some("y-arg")));
        let text = render(&listing, &report, Format::Text).unwrap();
        assert!(text.ends_with("scroll: y-def (row 1) within 200 ms\n"), "{text}");
    }

    #[test]
    fn json_report_names_marks_in_lowercase() {
        let listing = Listing::parse(fixtures::AMBIGUOUS).unwrap();
        let report = Report::new(&listing, &apply(&listing, "goto-var", Some("u")));
        let json = render(&listing, &report, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["hidden_rows"], serde_json::json!([2]));
        assert_eq!(value["marks"][0]["mark"], "goto");
        assert_eq!(value["scroll"], serde_json::Value::Null);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(matches!("yaml".parse::<Format>(), Err(Error::UnknownFormat { .. })));
    }
}
