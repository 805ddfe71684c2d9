//! Highlight, slice, and goto-definition over an annotated def/use listing.
//!
//! A [`listing::Listing`] is a read-only document of rows and nested
//! elements, each tagged with def/use roles and the analysis addresses it
//! stands for. Commands from [`dispatch`] turn one [`view::ViewState`] into
//! the next: marking related elements, hiding unrelated rows, or scrolling to
//! the definition of a selected use.

pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod fingerprint;
pub mod goto;
pub mod highlight;
pub mod info;
pub mod listing;
pub mod render;
pub mod resolver;
pub mod script;
pub mod slice;
pub mod stats;
pub mod types;
pub mod view;
pub mod watch;

#[cfg(test)]
mod fixtures;
