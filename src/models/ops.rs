//! Typed view of `currentOp` entries.

use mongodb::bson::{Bson, Document};
use serde::Serialize;

use super::{doc_f64, doc_i64, doc_str};

/// One entry of `currentOp.inprog`. Fields not reported by the server
/// (resource usage is version- and platform-dependent) default to zero.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentOp {
    pub opid: String,
    pub op: String,
    pub ns: String,
    pub secs_running: i64,
    pub cpu_usage: f64,
    pub mem_usage: f64,
    pub client: String,
    pub desc: String,
}

impl CurrentOp {
    pub fn from_doc(doc: &Document) -> Self {
        Self {
            // opid is an int on a mongod, "shard:opid" on a mongos
            opid: match doc.get("opid") {
                Some(Bson::String(opid)) => opid.clone(),
                Some(opid) => opid.to_string(),
                None => String::new(),
            },
            op: doc_str(doc, "op"),
            ns: doc_str(doc, "ns"),
            secs_running: doc_i64(doc, "secs_running"),
            cpu_usage: doc_f64(doc, "cpu_usage"),
            mem_usage: doc_f64(doc, "mem_usage"),
            client: doc_str(doc, "client"),
            desc: doc_str(doc, "desc"),
        }
    }

    /// Database part of the namespace (`db.collection`).
    pub fn database(&self) -> &str {
        self.ns.split('.').next().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_from_doc_extracts_core_fields() {
        let op = CurrentOp::from_doc(&doc! {
            "opid": 4312,
            "op": "query",
            "ns": "shop.orders",
            "secs_running": 12_i64,
            "client": "10.0.0.5:54321",
            "desc": "conn42",
        });
        assert_eq!(op.opid, "4312");
        assert_eq!(op.ns, "shop.orders");
        assert_eq!(op.secs_running, 12);
        assert_eq!(op.database(), "shop");
        assert_eq!(op.cpu_usage, 0.0);
    }

    #[test]
    fn test_database_of_empty_namespace() {
        let op = CurrentOp::from_doc(&doc! { "opid": 1 });
        assert_eq!(op.database(), "");
    }
}
