//! Scraped-metadata normalization and classification.
//!
//! This crate provides:
//! - [`classify`] — noise filtering and semantic grouping of raw
//!   key/value metadata into display-ready [`CategorizedMetadata`]
//! - [`text`] — bullet-structure detection and truncation for free-text
//!   descriptions
//! - [`tiers`] — discrete labels for continuous AI scores
//! - [`catalog`] — record cleaning for the external catalog sink

pub mod catalog;
pub mod classify;
pub mod text;
pub mod tiers;

pub use catalog::{clean_product_record, coerce_price};
pub use classify::{
    CategorizedMetadata, MetadataGroup, NoisePolicy, format_key, format_value, organize,
    organize_with,
};
pub use text::{TRUNCATE_LIMIT, TextBlock, Truncated, detect_bullet_structure, truncate};
pub use tiers::{confidence_tier, sentiment_tier};
