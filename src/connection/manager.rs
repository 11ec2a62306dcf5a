//! Core ConnectionManager struct and basic connection methods.

use mongodb::Client;
use mongodb::bson::doc;
use mongodb::results::CollectionSpecification;
use tokio::runtime::Runtime;

use crate::error::Result;
use crate::models::ConnectTarget;

/// Databases excluded from `--all-databases` style iteration.
pub const SYSTEM_DATABASES: [&str; 3] = ["admin", "local", "config"];

/// Owns the Tokio runtime that all MongoDB driver calls run on.
pub struct ConnectionManager {
    pub(crate) runtime: Runtime,
}

impl ConnectionManager {
    /// Create a new connection manager
    pub fn new() -> Self {
        let runtime = Runtime::new().expect("Failed to create Tokio runtime");
        Self { runtime }
    }

    /// Connect to MongoDB and ping to verify (runs in Tokio runtime)
    pub fn connect(&self, target: &ConnectTarget) -> Result<Client> {
        let uri = target.uri();
        log::debug!("connecting to {}", target.redacted_uri());
        self.runtime.block_on(async {
            let client = Client::with_uri_str(&uri).await?;
            client.database("admin").run_command(doc! { "ping": 1 }).await?;
            Ok(client)
        })
    }

    /// Connect to a single member address (`host:port`), used to reach
    /// shard replica sets directly (runs in Tokio runtime)
    pub fn connect_member(&self, address: &str) -> Result<Client> {
        let uri = format!("mongodb://{address}/?directConnection=true");
        log::debug!("connecting to member {address}");
        self.runtime.block_on(async {
            let client = Client::with_uri_str(&uri).await?;
            client.database("admin").run_command(doc! { "ping": 1 }).await?;
            Ok(client)
        })
    }

    /// List database names, sorted (runs in Tokio runtime)
    pub fn list_databases(&self, client: &Client) -> Result<Vec<String>> {
        let client = client.clone();
        self.runtime.block_on(async {
            let mut databases = client.list_database_names().await?;
            databases.sort_unstable_by_key(|name| name.to_lowercase());
            Ok(databases)
        })
    }

    /// List database names excluding the system databases (runs in Tokio
    /// runtime)
    pub fn list_user_databases(&self, client: &Client) -> Result<Vec<String>> {
        let mut databases = self.list_databases(client)?;
        databases.retain(|name| !SYSTEM_DATABASES.contains(&name.as_str()));
        Ok(databases)
    }

    /// List all collection names in a database (runs in Tokio runtime)
    pub fn list_collection_names(&self, client: &Client, database: &str) -> Result<Vec<String>> {
        let client = client.clone();
        let database = database.to_string();
        self.runtime.block_on(async {
            let db = client.database(&database);
            let mut names = db.list_collection_names().await?;
            names.sort_unstable_by_key(|name| name.to_lowercase());
            Ok(names)
        })
    }

    /// List collection specs in a database; specs carry the collection
    /// type, letting callers skip views (runs in Tokio runtime)
    pub fn list_collection_specs(
        &self,
        client: &Client,
        database: &str,
    ) -> Result<Vec<CollectionSpecification>> {
        use futures::TryStreamExt;

        let client = client.clone();
        let database = database.to_string();
        self.runtime.block_on(async {
            let db = client.database(&database);
            let cursor = db.list_collections().await?;
            let mut specs: Vec<CollectionSpecification> = cursor.try_collect().await?;
            specs.sort_unstable_by_key(|spec| spec.name.to_lowercase());
            Ok(specs)
        })
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
