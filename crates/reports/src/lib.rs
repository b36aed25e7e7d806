//! Completion and revenue reporting over the status history ledger.
//!
//! The status history is the source of truth for when an order was
//! completed; order records supply the price. Aggregation is a pure
//! function over both, with [`ReportService`] as the store-backed
//! convenience wrapper.

pub mod summary;

mod service;

pub use service::ReportService;
pub use summary::{CompletionBucket, Period, completion_report};
