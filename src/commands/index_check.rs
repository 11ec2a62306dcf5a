//! Duplicate (prefix-redundant) and unused index detection.

use crate::analyzer::{find_redundant_indexes, find_unused_indexes};
use crate::cli::IndexCheckArgs;
use crate::connection::ConnectionManager;
use crate::error::{Error, Result};

pub fn run(manager: &ConnectionManager, args: &IndexCheckArgs) -> Result<()> {
    let check_duplicated = args.check_duplicated || args.check_all;
    let check_unused = args.check_unused || args.check_all;
    if !check_duplicated && !check_unused {
        return Err(Error::InvalidArguments(
            "specify --check-duplicated, --check-unused or --check-all".to_string(),
        ));
    }

    let client = manager.connect(&args.connect.target())?;

    let databases = if args.all_databases {
        manager.list_user_databases(&client)?
    } else if !args.databases.is_empty() {
        args.databases.clone()
    } else {
        return Err(Error::InvalidArguments(
            "specify --all-databases or --databases".to_string(),
        ));
    };

    let mut finding = 1usize;
    for database in &databases {
        let collections = if args.all_collections {
            match manager.list_collection_names(&client, database) {
                Ok(collections) => collections,
                Err(err) => {
                    log::warn!("skipping database '{database}': {err}");
                    continue;
                }
            }
        } else if !args.collections.is_empty() {
            args.collections.clone()
        } else {
            log::warn!(
                "no collections specified for database '{database}'; \
                 use --all-collections or --collections"
            );
            continue;
        };

        for collection in &collections {
            if check_duplicated {
                match manager.list_indexes(&client, database, collection) {
                    Ok(descriptors) => {
                        let redundant = find_redundant_indexes(&descriptors);
                        if !redundant.is_empty() {
                            let names =
                                redundant.iter().map(String::as_str).collect::<Vec<_>>();
                            println!(
                                "{finding}- In database '{database}', collection \
                                 '{collection}', drop indexes: [{}]",
                                names.join(", ")
                            );
                            finding += 1;
                        }
                    }
                    Err(err) => log::warn!(
                        "duplicate-index check failed for {database}.{collection}: {err}"
                    ),
                }
            }

            if check_unused {
                match manager.index_usage(&client, database, collection) {
                    Ok(usage) => {
                        let unused = find_unused_indexes(&usage);
                        if !unused.is_empty() {
                            println!(
                                "{finding}- In database '{database}', collection \
                                 '{collection}', unused indexes: [{}] \
                                 (usage counters reset on server restart)",
                                unused.join(", ")
                            );
                            finding += 1;
                        }
                    }
                    Err(err) => log::warn!(
                        "unused-index check unavailable for {database}.{collection}: {err}"
                    ),
                }
            }
        }
    }

    if finding == 1 {
        println!("No findings.");
    }
    Ok(())
}
