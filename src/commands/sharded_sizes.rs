//! Per-database collection size tables on a sharded cluster.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use mongodb::results::CollectionType;

use crate::cli::ShardedSizesArgs;
use crate::connection::ConnectionManager;
use crate::error::{Error, Result};
use crate::helpers::{format_bytes, format_number};

const MB: u64 = 1024 * 1024;

pub fn run(manager: &ConnectionManager, args: &ShardedSizesArgs) -> Result<()> {
    let client = manager.connect(&args.connect.target())?;

    let shards = manager
        .list_shards(&client)
        .map_err(|err| Error::NotSharded(format!("listShards failed: {err}")))?;
    if shards.is_empty() {
        return Err(Error::NotSharded("no shards registered".to_string()));
    }

    let mut total_documents = 0u64;
    let mut total_storage_size = 0u64;
    let mut total_index_size = 0u64;

    for database in manager.list_databases(&client)? {
        println!("Database: {database}");
        let specs = match manager.list_collection_specs(&client, &database) {
            Ok(specs) => specs,
            Err(err) => {
                log::warn!("skipping database '{database}': {err}");
                continue;
            }
        };

        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            "Collection",
            "Documents",
            "Data Size",
            "Storage Size",
            "Indexes",
            "Index Size",
            "Avg Obj Size",
        ]);

        for spec in specs {
            if matches!(spec.collection_type, CollectionType::View) {
                println!("  Collection: {} is a view, skipping stats", spec.name);
                continue;
            }
            let stats = match manager.collection_stats(&client, &database, &spec.name) {
                Ok(stats) => stats,
                Err(err) => {
                    log::warn!("stats unavailable for {database}.{}: {err}", spec.name);
                    continue;
                }
            };

            total_documents += stats.document_count;
            total_storage_size += stats.storage_size;
            total_index_size += stats.total_index_size;

            table.add_row(vec![
                spec.name.clone(),
                format_number(stats.document_count),
                format_bytes(stats.data_size),
                format_bytes(stats.storage_size),
                stats.index_count.to_string(),
                format_bytes(stats.total_index_size),
                format_bytes(stats.avg_obj_size),
            ]);
        }

        println!("{table}");
        println!();
    }

    println!("Total Documents: {}", format_number(total_documents));
    println!("Total Storage Size: {}", format_bytes(total_storage_size));
    println!("Total Index Size: {}", format_bytes(total_index_size));

    match manager.server_status(&client) {
        Ok(status) => {
            let mem = status.mem;
            println!("RAM Headroom: {}", format_bytes(mem.headroom_mb() * MB));
            println!(
                "RAM Used: {} ({:.1}%)",
                format_bytes(mem.resident_mb * MB),
                mem.used_percent(),
            );
        }
        Err(err) => log::warn!("serverStatus unavailable: {err}"),
    }
    Ok(())
}
