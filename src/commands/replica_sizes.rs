//! Per-collection sizes on a replica set deployment.

use mongodb::results::CollectionType;

use crate::cli::ReplicaSizesArgs;
use crate::connection::ConnectionManager;
use crate::error::{Error, Result};
use crate::helpers::{format_bytes, format_number};

pub fn run(manager: &ConnectionManager, args: &ReplicaSizesArgs) -> Result<()> {
    let client = manager.connect(&args.connect.target())?;

    let set_name = manager.replica_set_name(&client)?.ok_or_else(|| {
        Error::NotReplicaSet("server reports no replica set name".to_string())
    })?;
    println!("Replica set: {set_name}");
    println!();

    for database in manager.list_databases(&client)? {
        println!("Database: {database}");
        let specs = match manager.list_collection_specs(&client, &database) {
            Ok(specs) => specs,
            Err(err) => {
                log::warn!("skipping database '{database}': {err}");
                continue;
            }
        };

        for spec in specs {
            if matches!(spec.collection_type, CollectionType::View) {
                println!("  Collection: {} is a view, skipping stats", spec.name);
                continue;
            }
            match manager.collection_stats(&client, &database, &spec.name) {
                Ok(stats) => println!(
                    "  Collection: {}, {} documents, data size {}",
                    spec.name,
                    format_number(stats.document_count),
                    format_bytes(stats.data_size),
                ),
                Err(err) => {
                    log::warn!("stats unavailable for {database}.{}: {err}", spec.name)
                }
            }
        }
    }
    Ok(())
}
