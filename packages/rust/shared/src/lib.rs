//! Shared types, error model, and configuration for ScrapeFlow.
//!
//! This crate is the foundation depended on by all other ScrapeFlow crates.
//! It provides:
//! - [`ScrapeFlowError`] — the unified error type
//! - Domain types ([`CrawlRequest`], [`CrawlTask`], [`CrawlRecord`], [`AiProvider`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, SubmissionConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{Result, ScrapeFlowError};
pub use types::{
    AiAnalysis, AiProvider, CrawlOptions, CrawlRecord, CrawlRequest, CrawlTask, ProcessedData,
    RawMetadataMap, TaskId,
};
