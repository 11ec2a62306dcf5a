//! Report subcommands, one module per tool.
//!
//! Each module connects once, issues the administrative commands it needs,
//! and prints a report. Per-collection and per-section failures are logged
//! and skipped so one broken namespace never aborts a whole run.

pub mod current_ops;
pub mod index_check;
pub mod index_usage;
pub mod replica_sizes;
pub mod sharded_sizes;
pub mod sharded_summary;
