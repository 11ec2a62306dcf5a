//! Raw `$indexStats` dump per collection.

use mongodb::Client;

use crate::cli::IndexUsageArgs;
use crate::connection::ConnectionManager;
use crate::error::{Error, Result};
use crate::models::IndexUsageRecord;

pub fn run(manager: &ConnectionManager, args: &IndexUsageArgs) -> Result<()> {
    let client = manager.connect(&args.connect.target())?;
    let mut records = Vec::new();

    if args.show_all {
        for database in manager.list_databases(&client)? {
            if args.ignore_databases.contains(&database) {
                println!("Ignoring database {database}");
                continue;
            }
            let collections = match manager.list_collection_names(&client, &database) {
                Ok(collections) => collections,
                Err(err) => {
                    log::warn!("skipping database '{database}': {err}");
                    continue;
                }
            };
            for collection in collections {
                println!("Running index stats for {database}.{collection}");
                collect(manager, &client, &database, &collection, &mut records);
            }
        }
    } else {
        let (Some(database), Some(collection)) = (&args.database, &args.collection) else {
            return Err(Error::InvalidArguments(
                "specify both --database and --collection unless --show-all is used"
                    .to_string(),
            ));
        };
        println!("Running index stats for {database}.{collection}");
        collect(manager, &client, database, collection, &mut records);
    }

    if !records.is_empty() {
        println!();
        for record in &records {
            print_record(record);
        }
    }

    println!("Total number of results returned: {}", records.len());
    Ok(())
}

fn collect(
    manager: &ConnectionManager,
    client: &Client,
    database: &str,
    collection: &str,
    out: &mut Vec<IndexUsageRecord>,
) {
    match manager.index_usage(client, database, collection) {
        Ok(mut records) => out.append(&mut records),
        Err(err) => log::warn!("index stats unavailable for {database}.{collection}: {err}"),
    }
}

fn print_record(record: &IndexUsageRecord) {
    println!("name: {}", record.name);
    println!("key: {}", record.key.as_ref().map(|key| key.to_string()).unwrap_or_default());
    println!("host: {}", record.host.as_deref().unwrap_or(""));
    println!("ops: {}", record.ops_count);
    println!(
        "since: {}",
        record
            .since
            .and_then(|since| since.try_to_rfc3339_string().ok())
            .unwrap_or_default()
    );
    println!("shard: {}", record.shard.as_deref().unwrap_or(""));
    println!(
        "spec: {}",
        record
            .spec
            .as_ref()
            .and_then(|spec| serde_json::to_string(spec).ok())
            .unwrap_or_default()
    );
    println!();
}
