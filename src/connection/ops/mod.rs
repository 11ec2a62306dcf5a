//! Administrative operations split into focused modules.

pub mod admin;
pub mod indexes;
pub mod stats;
