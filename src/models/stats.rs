//! Typed views of the server's statistics and topology commands
//! (`collStats`, `serverStatus`, `buildInfo`, `listShards`,
//! `replSetGetStatus`, `usersInfo`/`rolesInfo`).

use mongodb::bson::{DateTime, Document};
use serde::Serialize;

use super::{doc_f64, doc_i64, doc_str, doc_u64};

/// Subset of `collStats` consumed by the size reports.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionStats {
    /// Document count (`count`)
    pub document_count: u64,
    /// Uncompressed data size in bytes (`size`)
    pub data_size: u64,
    /// On-disk size in bytes (`storageSize`)
    pub storage_size: u64,
    pub index_count: u64,
    /// Combined index size in bytes (`totalIndexSize`)
    pub total_index_size: u64,
    pub avg_obj_size: u64,
    /// Present and true when the collection is sharded
    pub sharded: bool,
}

impl CollectionStats {
    pub fn from_doc(doc: &Document) -> Self {
        Self {
            document_count: doc_u64(doc, "count"),
            data_size: doc_u64(doc, "size"),
            storage_size: doc_u64(doc, "storageSize"),
            index_count: doc
                .get_document("indexSizes")
                .map(|sizes| sizes.len() as u64)
                .unwrap_or(0),
            total_index_size: doc_u64(doc, "totalIndexSize"),
            avg_obj_size: doc_u64(doc, "avgObjSize"),
            sharded: doc.get_bool("sharded").unwrap_or_else(|_| doc.contains_key("sharded")),
        }
    }
}

/// `serverStatus.mem` figures, reported by the server in megabytes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerMemory {
    pub resident_mb: u64,
    pub virtual_mb: u64,
}

impl ServerMemory {
    pub fn headroom_mb(&self) -> u64 {
        self.virtual_mb.saturating_sub(self.resident_mb)
    }

    pub fn used_percent(&self) -> f64 {
        if self.virtual_mb == 0 {
            return 0.0;
        }
        self.resident_mb as f64 / self.virtual_mb as f64 * 100.0
    }
}

/// `serverStatus.opcounters`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpCounters {
    pub insert: u64,
    pub query: u64,
    pub update: u64,
    pub delete: u64,
    pub getmore: u64,
    pub command: u64,
}

impl OpCounters {
    pub fn rows(&self) -> [(&'static str, u64); 6] {
        [
            ("Insert", self.insert),
            ("Query", self.query),
            ("Update", self.update),
            ("Delete", self.delete),
            ("GetMore", self.getmore),
            ("Command", self.command),
        ]
    }
}

/// Subset of `serverStatus` used by the reports.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerStatus {
    pub host: String,
    pub process: String,
    pub pid: i64,
    pub uptime_millis: u64,
    pub db_path: Option<String>,
    pub mem: ServerMemory,
    pub opcounters: OpCounters,
}

impl ServerStatus {
    pub fn from_doc(doc: &Document) -> Self {
        let mem = doc.get_document("mem").ok();
        let opcounters = doc.get_document("opcounters").ok();
        Self {
            host: doc_str(doc, "host"),
            process: doc_str(doc, "process"),
            pid: doc_i64(doc, "pid"),
            uptime_millis: doc_u64(doc, "uptimeMillis"),
            db_path: doc
                .get_document("storageEngine")
                .ok()
                .and_then(|engine| engine.get_str("dbPath").ok())
                .map(str::to_string),
            mem: mem
                .map(|mem| ServerMemory {
                    resident_mb: doc_u64(mem, "resident"),
                    virtual_mb: doc_u64(mem, "virtual"),
                })
                .unwrap_or_default(),
            opcounters: opcounters
                .map(|counters| OpCounters {
                    insert: doc_u64(counters, "insert"),
                    query: doc_u64(counters, "query"),
                    update: doc_u64(counters, "update"),
                    delete: doc_u64(counters, "delete"),
                    getmore: doc_u64(counters, "getmore"),
                    command: doc_u64(counters, "command"),
                })
                .unwrap_or_default(),
        }
    }
}

/// Subset of `buildInfo`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildInfo {
    pub version: String,
    pub bits: i64,
}

impl BuildInfo {
    pub fn from_doc(doc: &Document) -> Self {
        Self { version: doc_str(doc, "version"), bits: doc_i64(doc, "bits") }
    }
}

/// Security posture summary derived from `usersInfo`, `rolesInfo` and
/// `buildInfo` probes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SecuritySummary {
    pub users: usize,
    pub roles: usize,
    pub auth_enabled: bool,
    pub ssl_enabled: bool,
}

impl SecuritySummary {
    pub fn from_docs(users: &Document, roles: &Document, build_info: &Document) -> Self {
        Self {
            users: users.get_array("users").map(|users| users.len()).unwrap_or(0),
            roles: roles.get_array("roles").map(|roles| roles.len()).unwrap_or(0),
            auth_enabled: build_info
                .get_document("setParameter")
                .ok()
                .and_then(|params| params.get_array("authenticationMechanisms").ok())
                .is_some_and(|mechanisms| !mechanisms.is_empty()),
            ssl_enabled: build_info.contains_key("ssl"),
        }
    }
}

/// One shard from `listShards`.
#[derive(Debug, Clone, Serialize)]
pub struct ShardEntry {
    pub id: String,
    /// Connection string, `rs0/host1:27018,host2:27018` for replica-set
    /// backed shards or a bare `host:port` for standalone ones.
    pub host: String,
}

impl ShardEntry {
    pub fn from_doc(doc: &Document) -> Self {
        Self { id: doc_str(doc, "_id"), host: doc_str(doc, "host") }
    }

    /// Replica set name, when the shard is replica-set backed.
    pub fn replica_set(&self) -> Option<&str> {
        self.host.split_once('/').map(|(set, _)| set)
    }

    /// Member addresses, without the replica set prefix.
    pub fn members(&self) -> Vec<&str> {
        let hosts = self.host.split_once('/').map_or(self.host.as_str(), |(_, hosts)| hosts);
        hosts.split(',').filter(|host| !host.is_empty()).collect()
    }
}

/// One member of `replSetGetStatus.members`.
#[derive(Debug, Clone, Serialize)]
pub struct ReplSetMember {
    pub id: i64,
    pub name: String,
    /// Human-readable state, e.g. `PRIMARY` or `SECONDARY`
    pub state: String,
    pub election_date: Option<DateTime>,
}

/// `replSetGetStatus` digest.
#[derive(Debug, Clone, Serialize)]
pub struct ReplSetStatus {
    pub set: String,
    pub members: Vec<ReplSetMember>,
}

impl ReplSetStatus {
    pub fn from_doc(doc: &Document) -> Self {
        let members = doc
            .get_array("members")
            .map(|members| {
                members
                    .iter()
                    .filter_map(|member| member.as_document())
                    .map(|member| ReplSetMember {
                        id: doc_i64(member, "_id"),
                        name: doc_str(member, "name"),
                        state: doc_str(member, "stateStr"),
                        election_date: member.get_datetime("electionDate").ok().copied(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { set: doc_str(doc, "set"), members }
    }
}

/// Oplog size and time window figures for one replica set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OplogWindow {
    pub size_mb: f64,
    pub used_mb: f64,
    pub length_hours: f64,
    pub last_election: Option<DateTime>,
}

impl OplogWindow {
    /// Combine `collStats` on `local.oplog.rs` with the first/last oplog
    /// entry timestamps (seconds since epoch).
    pub fn from_stats(stats: &Document, first_ts_secs: u32, last_ts_secs: u32) -> Self {
        Self {
            size_mb: doc_f64(stats, "storageSize") / (1024.0 * 1024.0),
            used_mb: doc_f64(stats, "size") / (1024.0 * 1024.0),
            length_hours: f64::from(last_ts_secs.saturating_sub(first_ts_secs)) / 3600.0,
            last_election: None,
        }
    }
}
