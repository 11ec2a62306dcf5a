//! Administrative toolkit for MongoDB deployments.
//!
//! One subcommand per tool: running-operation triage, index redundancy and
//! usage analysis, collection size reports for replicated and sharded
//! clusters, and a sharded-cluster summary digest.

pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod connection;
pub mod error;
pub mod helpers;
pub mod models;
