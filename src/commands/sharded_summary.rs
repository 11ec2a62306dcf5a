//! Sharded cluster status digest.

use std::collections::BTreeSet;

use chrono::Local;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use mongodb::Client;

use crate::cli::ShardedSummaryArgs;
use crate::connection::ConnectionManager;
use crate::error::{Error, Result};
use crate::helpers::{format_bytes, format_number, format_uptime};
use crate::models::{OplogWindow, ShardEntry};

pub fn run(manager: &ConnectionManager, args: &ShardedSummaryArgs) -> Result<()> {
    let client = manager.connect(&args.connect.target())?;

    let shards = manager
        .list_shards(&client)
        .map_err(|err| Error::NotSharded(format!("listShards failed: {err}")))?;
    if shards.is_empty() {
        return Err(Error::NotSharded("no shards registered".to_string()));
    }

    println!("######## mongokit - MongoDB Sharded Summary ########");
    println!();

    print_instances(manager, &shards);
    print_report(manager, &client);
    print_running_ops(manager, &client);
    print_security(manager, &client);
    print_oplog(manager, &shards);
    print_cluster_wide(manager, &client);
    Ok(())
}

/// Connect to one member of each distinct replica set backing the shards.
fn shard_set_clients(
    manager: &ConnectionManager,
    shards: &[ShardEntry],
) -> Vec<(String, Client)> {
    let mut seen = BTreeSet::new();
    let mut clients = Vec::new();
    for shard in shards {
        let Some(set_name) = shard.replica_set() else {
            log::warn!("shard '{}' is not replica-set backed, skipping", shard.id);
            continue;
        };
        if !seen.insert(set_name.to_string()) {
            continue;
        }
        let Some(member) = shard.members().first().copied() else {
            continue;
        };
        match manager.connect_member(member) {
            Ok(client) => clients.push((set_name.to_string(), client)),
            Err(err) => log::warn!("cannot reach member {member} of '{set_name}': {err}"),
        }
    }
    clients
}

fn print_instances(manager: &ConnectionManager, shards: &[ShardEntry]) {
    println!("# Instances ####################################################################");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Host", "Type", "ReplSet"]);

    for (set_name, client) in shard_set_clients(manager, shards) {
        match manager.repl_set_status(&client) {
            Ok(status) => {
                for member in status.members {
                    table.add_row(vec![
                        member.id.to_string(),
                        member.name,
                        member.state,
                        set_name.clone(),
                    ]);
                }
            }
            Err(err) => log::warn!("replSetGetStatus failed for '{set_name}': {err}"),
        }
    }

    println!("{table}");
    println!();
}

fn print_report(manager: &ConnectionManager, client: &Client) {
    println!("# Report #######################################################################");

    let status = manager.server_status(client);
    let build = manager.build_info(client);
    let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());
    let now = Local::now();

    let mut rows: Vec<(&str, String)> = vec![
        ("User", user),
        ("Time", now.format("%Y-%m-%d %H:%M:%S").to_string()),
    ];
    match &status {
        Ok(status) => {
            let started = now - chrono::Duration::milliseconds(status.uptime_millis as i64);
            rows.push(("Hostname", status.host.clone()));
            rows.push(("PID Owner", status.pid.to_string()));
            rows.push(("Started", started.format("%Y-%m-%d %H:%M:%S").to_string()));
            rows.push(("Uptime", format_uptime(status.uptime_millis)));
            rows.push(("Datadir", status.db_path.clone().unwrap_or_else(|| "N/A".to_string())));
            rows.push(("Process Type", status.process.clone()));
        }
        Err(err) => log::warn!("serverStatus unavailable: {err}"),
    }
    match &build {
        Ok(build) => {
            rows.push(("Version", build.version.clone()));
            rows.push(("Built On", format!("{} bits", build.bits)));
        }
        Err(err) => log::warn!("buildInfo unavailable: {err}"),
    }

    for (key, value) in rows {
        println!("{key:>25} | {value}");
    }
    println!();
}

fn print_running_ops(manager: &ConnectionManager, client: &Client) {
    println!("# Running Ops ##################################################################");
    match manager.server_status(client) {
        Ok(status) => {
            for (kind, count) in status.opcounters.rows() {
                println!("{kind:<13} {}", format_number(count));
            }
        }
        Err(err) => {
            log::warn!("serverStatus unavailable: {err}");
            println!("N/A");
        }
    }
    println!();
}

fn print_security(manager: &ConnectionManager, client: &Client) {
    println!("# Security #####################################################################");
    match manager.security_summary(client) {
        Ok(summary) => {
            println!("{:<13} {}", "Users", summary.users);
            println!("{:<13} {}", "Roles", summary.roles);
            println!("{:<13} {}", "Auth", enabled(summary.auth_enabled));
            println!("{:<13} {}", "SSL", enabled(summary.ssl_enabled));
        }
        Err(err) => {
            log::warn!("security info unavailable: {err}");
            println!("N/A");
        }
    }
    println!();
}

fn print_oplog(manager: &ConnectionManager, shards: &[ShardEntry]) {
    println!("# Oplog ########################################################################");

    let mut combined = OplogWindow::default();
    let mut sampled = 0usize;
    for (set_name, client) in shard_set_clients(manager, shards) {
        match manager.oplog_window(&client) {
            Ok(window) => {
                combined.size_mb += window.size_mb;
                combined.used_mb += window.used_mb;
                combined.length_hours += window.length_hours;
                if combined.last_election.is_none() {
                    combined.last_election = window.last_election;
                }
                sampled += 1;
            }
            Err(err) => log::warn!("oplog info unavailable for '{set_name}': {err}"),
        }
    }

    if sampled == 0 {
        println!("N/A");
    } else {
        println!("{:<15} {:.2} MB", "Oplog Size", combined.size_mb);
        println!("{:<15} {:.2} MB", "Oplog Used", combined.used_mb);
        println!("{:<15} {:.2} hours", "Oplog Length", combined.length_hours);
        println!(
            "{:<15} {}",
            "Last Election",
            combined
                .last_election
                .and_then(|date| date.try_to_rfc3339_string().ok())
                .unwrap_or_else(|| "N/A".to_string()),
        );
    }
    println!();
}

fn print_cluster_wide(manager: &ConnectionManager, client: &Client) {
    println!("# Cluster wide #################################################################");

    let databases = match manager.list_databases(client) {
        Ok(databases) => databases,
        Err(err) => {
            log::warn!("listDatabases failed: {err}");
            println!("N/A");
            println!();
            return;
        }
    };

    let mut total_collections = 0usize;
    let mut sharded_collections = 0usize;
    let mut unsharded_collections = 0usize;
    let mut sharded_data_size = 0u64;
    let mut unsharded_data_size = 0u64;

    for database in &databases {
        let collections = match manager.list_collection_names(client, database) {
            Ok(collections) => collections,
            Err(err) => {
                log::warn!("skipping database '{database}': {err}");
                continue;
            }
        };
        total_collections += collections.len();
        for collection in &collections {
            match manager.collection_stats(client, database, collection) {
                Ok(stats) if stats.sharded => {
                    sharded_collections += 1;
                    sharded_data_size += stats.data_size;
                }
                Ok(stats) => {
                    unsharded_collections += 1;
                    unsharded_data_size += stats.data_size;
                }
                Err(err) => {
                    log::warn!("stats unavailable for {database}.{collection}: {err}")
                }
            }
        }
    }

    println!("{:<25} {}", "Databases", databases.len());
    println!("{:<25} {}", "Collections", total_collections);
    println!("{:<25} {}", "Sharded Collections", sharded_collections);
    println!("{:<25} {}", "Unsharded Collections", unsharded_collections);
    println!("{:<25} {}", "Sharded Data Size", format_bytes(sharded_data_size));
    println!("{:<25} {}", "Unsharded Data Size", format_bytes(unsharded_data_size));
    println!();
}

fn enabled(flag: bool) -> &'static str {
    if flag { "enabled" } else { "disabled" }
}
