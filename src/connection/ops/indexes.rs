//! Index catalog and usage statistics for MongoDB collections.

use mongodb::Client;
use mongodb::IndexModel;
use mongodb::bson::{Document, doc};

use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::models::{IndexDescriptor, IndexUsageRecord};

impl ConnectionManager {
    /// Read a collection's index catalog (runs in Tokio runtime)
    pub fn list_indexes(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
    ) -> Result<Vec<IndexDescriptor>> {
        use futures::TryStreamExt;

        let client = client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<Document>(&collection);
            let cursor = coll.list_indexes().await?;
            let models: Vec<IndexModel> = cursor.try_collect().await?;
            Ok(models.iter().map(IndexDescriptor::from_index_model).collect())
        })
    }

    /// Run the `$indexStats` aggregation for a collection (runs in Tokio
    /// runtime). Fails on servers that do not support the stage or when
    /// the caller lacks the required privilege; callers are expected to
    /// continue with the next collection.
    pub fn index_usage(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
    ) -> Result<Vec<IndexUsageRecord>> {
        use futures::TryStreamExt;

        let client = client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<Document>(&collection);
            let cursor = coll.aggregate([doc! { "$indexStats": {} }]).await?;
            let stats: Vec<Document> = cursor.try_collect().await?;
            Ok(stats.iter().map(IndexUsageRecord::from_stats_doc).collect())
        })
    }
}
