//! Batch crawl submission.
//!
//! This crate provides:
//! - [`SubmissionSink`] — the one-task-at-a-time sink contract, with
//!   [`HttpSink`] as the JSON-over-HTTP implementation
//! - [`submit_batch`] — fan-out of one shared request across N URLs with
//!   per-task failure isolation

pub mod batch;
pub mod sink;

pub use batch::{BatchOutcome, TaskFailure, submit_batch};
pub use sink::{HttpSink, SubmissionSink, SubmitAck};
