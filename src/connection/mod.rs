//! MongoDB connection management and administrative operations.
//!
//! This module provides:
//! - `ConnectionManager`: connection setup and database/collection listing
//! - `ops`: administrative command wrappers (indexes, stats, admin)
//!
//! Every driver call returns typed records; raw BSON never leaves this
//! layer.

pub mod manager;
pub mod ops;

pub use manager::ConnectionManager;
