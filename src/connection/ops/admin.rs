//! Cluster administration commands: currentOp, topology and security
//! introspection, oplog figures.

use mongodb::Client;
use mongodb::bson::{Bson, Document, doc};

use crate::connection::ConnectionManager;
use crate::error::{Error, Result};
use crate::models::{CurrentOp, OplogWindow, ReplSetStatus, SecuritySummary, ShardEntry};

impl ConnectionManager {
    /// Fetch in-progress operations via `currentOp` (runs in Tokio runtime)
    pub fn current_ops(&self, client: &Client) -> Result<Vec<CurrentOp>> {
        let client = client.clone();
        self.runtime.block_on(async {
            let reply = client.database("admin").run_command(doc! { "currentOp": 1 }).await?;
            let ops = reply
                .get_array("inprog")
                .map_err(|_| Error::Parse("currentOp reply has no inprog array".to_string()))?
                .iter()
                .filter_map(Bson::as_document)
                .map(CurrentOp::from_doc)
                .collect();
            Ok(ops)
        })
    }

    /// Replica set name from the `hello` command, `None` on a standalone
    /// server (runs in Tokio runtime)
    pub fn replica_set_name(&self, client: &Client) -> Result<Option<String>> {
        let client = client.clone();
        self.runtime.block_on(async {
            let reply = client.database("admin").run_command(doc! { "hello": 1 }).await?;
            Ok(reply.get_str("setName").ok().map(str::to_string))
        })
    }

    /// Shards registered in the cluster via `listShards` (runs in Tokio
    /// runtime). Fails when the target is not a mongos.
    pub fn list_shards(&self, client: &Client) -> Result<Vec<ShardEntry>> {
        let client = client.clone();
        self.runtime.block_on(async {
            let reply = client.database("admin").run_command(doc! { "listShards": 1 }).await?;
            let shards = reply
                .get_array("shards")
                .map_err(|_| Error::Parse("listShards reply has no shards array".to_string()))?
                .iter()
                .filter_map(Bson::as_document)
                .map(ShardEntry::from_doc)
                .collect();
            Ok(shards)
        })
    }

    /// `replSetGetStatus` digest (runs in Tokio runtime)
    pub fn repl_set_status(&self, client: &Client) -> Result<ReplSetStatus> {
        let client = client.clone();
        self.runtime.block_on(async {
            let reply =
                client.database("admin").run_command(doc! { "replSetGetStatus": 1 }).await?;
            Ok(ReplSetStatus::from_doc(&reply))
        })
    }

    /// User/role counts and auth/SSL posture (runs in Tokio runtime)
    pub fn security_summary(&self, client: &Client) -> Result<SecuritySummary> {
        let client = client.clone();
        self.runtime.block_on(async {
            let admin = client.database("admin");
            let users = admin.run_command(doc! { "usersInfo": 1 }).await?;
            let roles = admin.run_command(doc! { "rolesInfo": 1 }).await?;
            let build_info = admin.run_command(doc! { "buildInfo": 1 }).await?;
            Ok(SecuritySummary::from_docs(&users, &roles, &build_info))
        })
    }

    /// Oplog size and time window for the replica set this client is
    /// connected to (runs in Tokio runtime). Requires access to the
    /// `local` database, so the client must point at a member, not a
    /// mongos.
    pub fn oplog_window(&self, client: &Client) -> Result<OplogWindow> {
        let client = client.clone();
        let status = self.repl_set_status(&client)?;
        self.runtime.block_on(async {
            let local = client.database("local");
            let stats = local.run_command(doc! { "collStats": "oplog.rs" }).await?;
            let oplog = local.collection::<Document>("oplog.rs");

            let first = oplog.find_one(doc! {}).sort(doc! { "$natural": 1 }).await?;
            let last = oplog.find_one(doc! {}).sort(doc! { "$natural": -1 }).await?;
            let first_secs = first.as_ref().and_then(entry_ts_secs).unwrap_or(0);
            let last_secs = last.as_ref().and_then(entry_ts_secs).unwrap_or(first_secs);

            let mut window = OplogWindow::from_stats(&stats, first_secs, last_secs);
            window.last_election =
                status.members.iter().find_map(|member| member.election_date);
            Ok(window)
        })
    }
}

fn entry_ts_secs(entry: &Document) -> Option<u32> {
    match entry.get("ts") {
        Some(Bson::Timestamp(ts)) => Some(ts.time),
        _ => None,
    }
}
