// Data structures and types

pub mod connection;
pub mod index;
pub mod ops;
pub mod stats;

pub use connection::ConnectTarget;
pub use index::{IndexDescriptor, IndexDirection, IndexKey, IndexUsageRecord};
pub use ops::CurrentOp;
pub use stats::{
    BuildInfo, CollectionStats, OpCounters, OplogWindow, ReplSetMember, ReplSetStatus,
    SecuritySummary, ServerMemory, ServerStatus, ShardEntry,
};

use mongodb::bson::{Bson, Document};

/// Lenient numeric extraction: server numbers arrive as int32, int64 or
/// double depending on version and field.
pub(crate) fn bson_to_u64(value: &Bson) -> Option<u64> {
    match value {
        Bson::Int32(v) => u64::try_from(*v).ok(),
        Bson::Int64(v) => u64::try_from(*v).ok(),
        Bson::Double(v) if *v >= 0.0 => Some(*v as u64),
        _ => None,
    }
}

pub(crate) fn bson_to_i64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        Bson::Double(v) => Some(*v as i64),
        _ => None,
    }
}

pub(crate) fn bson_to_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

pub(crate) fn doc_u64(doc: &Document, key: &str) -> u64 {
    doc.get(key).and_then(bson_to_u64).unwrap_or(0)
}

pub(crate) fn doc_i64(doc: &Document, key: &str) -> i64 {
    doc.get(key).and_then(bson_to_i64).unwrap_or(0)
}

pub(crate) fn doc_f64(doc: &Document, key: &str) -> f64 {
    doc.get(key).and_then(bson_to_f64).unwrap_or(0.0)
}

pub(crate) fn doc_str(doc: &Document, key: &str) -> String {
    doc.get_str(key).unwrap_or_default().to_string()
}
