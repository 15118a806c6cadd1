//! URL intake and crawl-duration estimation.
//!
//! This crate provides:
//! - [`UrlList`] — ordered, deduplicated pending-URL collection with
//!   single-add and bulk-import entry points
//! - [`estimate`] — deterministic crawl-duration heuristics

pub mod estimate;
pub mod list;

pub use estimate::{estimate, estimate_seconds, format_duration};
pub use list::{ImportSummary, UrlList};
