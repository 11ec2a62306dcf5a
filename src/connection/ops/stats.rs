//! Database and collection statistics operations.

use mongodb::Client;
use mongodb::bson::doc;

use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::models::{BuildInfo, CollectionStats, ServerStatus};

impl ConnectionManager {
    /// Fetch collection stats (runs in Tokio runtime)
    pub fn collection_stats(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
    ) -> Result<CollectionStats> {
        let client = client.clone();
        let database = database.to_string();
        let collection = collection.to_string();
        self.runtime.block_on(async {
            let db = client.database(&database);
            let stats = db.run_command(doc! { "collStats": collection }).await?;
            Ok(CollectionStats::from_doc(&stats))
        })
    }

    /// Fetch the serverStatus digest (runs in Tokio runtime)
    pub fn server_status(&self, client: &Client) -> Result<ServerStatus> {
        let client = client.clone();
        self.runtime.block_on(async {
            let status =
                client.database("admin").run_command(doc! { "serverStatus": 1 }).await?;
            Ok(ServerStatus::from_doc(&status))
        })
    }

    /// Fetch buildInfo (runs in Tokio runtime)
    pub fn build_info(&self, client: &Client) -> Result<BuildInfo> {
        let client = client.clone();
        self.runtime.block_on(async {
            let info = client.database("admin").run_command(doc! { "buildInfo": 1 }).await?;
            Ok(BuildInfo::from_doc(&info))
        })
    }
}
