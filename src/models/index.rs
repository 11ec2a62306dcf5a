//! Typed views of the index catalog and `$indexStats` output.
//!
//! Raw BSON documents are converted into these records at the connection
//! boundary so the analysis code never touches loosely-typed data.

use mongodb::IndexModel;
use mongodb::bson::{Bson, DateTime, Document};
use serde::Serialize;

use super::{bson_to_u64, doc_str};

/// Sort direction or special type of one indexed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IndexDirection {
    Ascending,
    Descending,
    Text,
    Hashed,
    Other(String),
}

impl IndexDirection {
    pub fn from_bson(value: &Bson) -> Self {
        match value {
            Bson::Int32(1) | Bson::Int64(1) => Self::Ascending,
            Bson::Int32(-1) | Bson::Int64(-1) => Self::Descending,
            Bson::Double(v) if *v == 1.0 => Self::Ascending,
            Bson::Double(v) if *v == -1.0 => Self::Descending,
            Bson::String(s) if s == "text" => Self::Text,
            Bson::String(s) if s == "hashed" => Self::Hashed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Display form matching the shell's index spec notation.
    pub fn label(&self) -> String {
        match self {
            Self::Ascending => "1".to_string(),
            Self::Descending => "-1".to_string(),
            Self::Text => "\"text\"".to_string(),
            Self::Hashed => "\"hashed\"".to_string(),
            Self::Other(raw) => raw.clone(),
        }
    }
}

/// One indexed field with its direction. Position within the key list is
/// semantically significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexKey {
    pub field: String,
    pub direction: IndexDirection,
}

impl IndexKey {
    pub fn new(field: impl Into<String>, direction: IndexDirection) -> Self {
        Self { field: field.into(), direction }
    }
}

/// Metadata for one index as reported by the collection's index catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDescriptor {
    pub name: String,
    pub keys: Vec<IndexKey>,
}

impl IndexDescriptor {
    /// Extract from a raw catalog document (`listIndexes` shape). The BSON
    /// document type preserves field insertion order, so key order survives.
    pub fn from_catalog_doc(doc: &Document) -> Self {
        let name = doc_str(doc, "name");
        let keys = doc
            .get_document("key")
            .map(Self::keys_from_spec)
            .unwrap_or_default();
        Self { name, keys }
    }

    /// Extract from a driver `IndexModel`. A missing name (possible on
    /// models built client-side) is synthesized from the key spec the same
    /// way the server names indexes.
    pub fn from_index_model(model: &IndexModel) -> Self {
        let keys = Self::keys_from_spec(&model.keys);
        let name = model
            .options
            .as_ref()
            .and_then(|options| options.name.clone())
            .unwrap_or_else(|| {
                keys.iter()
                    .map(|key| format!("{}_{}", key.field, key.direction.label()))
                    .collect::<Vec<_>>()
                    .join("_")
            });
        Self { name, keys }
    }

    fn keys_from_spec(spec: &Document) -> Vec<IndexKey> {
        spec.iter()
            .map(|(field, direction)| IndexKey {
                field: field.clone(),
                direction: IndexDirection::from_bson(direction),
            })
            .collect()
    }

    /// Shell-style key spec for display, e.g. `{ a: 1, b: -1 }`.
    pub fn key_spec(&self) -> String {
        let fields = self
            .keys
            .iter()
            .map(|key| format!("{}: {}", key.field, key.direction.label()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{ {fields} }}")
    }
}

/// Usage counters for one index from the `$indexStats` aggregation stage.
///
/// Counters reset on server restart, so a freshly restarted server reports
/// every index as unused.
#[derive(Debug, Clone, Serialize)]
pub struct IndexUsageRecord {
    pub name: String,
    /// Operations served by this index since the counter was last reset.
    pub ops_count: u64,
    pub since: Option<DateTime>,
    pub host: Option<String>,
    pub shard: Option<String>,
    pub key: Option<Document>,
    pub spec: Option<Document>,
}

impl IndexUsageRecord {
    pub fn from_stats_doc(doc: &Document) -> Self {
        let accesses = doc.get_document("accesses").ok();
        Self {
            name: doc_str(doc, "name"),
            ops_count: accesses
                .and_then(|accesses| accesses.get("ops"))
                .and_then(bson_to_u64)
                .unwrap_or(0),
            since: accesses.and_then(|accesses| accesses.get_datetime("since").ok()).copied(),
            host: doc.get_str("host").ok().map(str::to_string),
            shard: doc.get_str("shard").ok().map(str::to_string),
            key: doc.get_document("key").ok().cloned(),
            spec: doc.get_document("spec").ok().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_catalog_doc_preserves_key_order() {
        let descriptor = IndexDescriptor::from_catalog_doc(&doc! {
            "v": 2,
            "name": "b_1_a_-1",
            "key": { "b": 1, "a": -1 },
        });
        assert_eq!(descriptor.name, "b_1_a_-1");
        assert_eq!(
            descriptor.keys,
            vec![
                IndexKey::new("b", IndexDirection::Ascending),
                IndexKey::new("a", IndexDirection::Descending),
            ]
        );
    }

    #[test]
    fn test_missing_key_spec_yields_empty_keys() {
        let descriptor = IndexDescriptor::from_catalog_doc(&doc! { "name": "broken" });
        assert_eq!(descriptor.name, "broken");
        assert!(descriptor.keys.is_empty());
    }

    #[test]
    fn test_direction_from_double_and_strings() {
        assert_eq!(IndexDirection::from_bson(&Bson::Double(1.0)), IndexDirection::Ascending);
        assert_eq!(
            IndexDirection::from_bson(&Bson::String("hashed".to_string())),
            IndexDirection::Hashed
        );
    }

    #[test]
    fn test_usage_record_from_stats_doc() {
        let record = IndexUsageRecord::from_stats_doc(&doc! {
            "name": "a_1",
            "key": { "a": 1 },
            "host": "db0:27017",
            "accesses": { "ops": 42_i64, "since": DateTime::from_millis(0) },
            "shard": "shard01",
        });
        assert_eq!(record.name, "a_1");
        assert_eq!(record.ops_count, 42);
        assert_eq!(record.shard.as_deref(), Some("shard01"));
        assert!(record.since.is_some());
    }

    #[test]
    fn test_usage_record_missing_accesses_counts_zero() {
        let record = IndexUsageRecord::from_stats_doc(&doc! { "name": "a_1" });
        assert_eq!(record.ops_count, 0);
    }
}
