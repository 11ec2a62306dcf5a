//! Running operations sorted by resource usage.

use std::cmp::Ordering;

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};

use crate::cli::{CurrentOpsArgs, ResourceKind, SortOrder};
use crate::connection::ConnectionManager;
use crate::error::{Error, Result};
use crate::models::CurrentOp;

pub fn run(manager: &ConnectionManager, args: &CurrentOpsArgs) -> Result<()> {
    let check_mem = args.check == Some(ResourceKind::Mem) || args.check_both;
    let check_cpu = args.check == Some(ResourceKind::Cpu) || args.check_both;
    if !check_mem && !check_cpu {
        return Err(Error::InvalidArguments(
            "specify --check <mem|cpu> or --check-both".to_string(),
        ));
    }

    let client = manager.connect(&args.connect.target())?;
    let mut ops = manager.current_ops(&client)?;

    if !args.ignore_databases.is_empty() {
        ops.retain(|op| !args.ignore_databases.iter().any(|db| db == op.database()));
    }

    // Primary order is seconds running; resource usage breaks ties.
    ops.sort_by(|a, b| {
        let by_secs = match args.order_by {
            SortOrder::Desc => b.secs_running.cmp(&a.secs_running),
            SortOrder::Asc => a.secs_running.cmp(&b.secs_running),
        };
        by_secs.then_with(|| {
            resource_usage(b, check_mem, check_cpu)
                .partial_cmp(&resource_usage(a, check_mem, check_cpu))
                .unwrap_or(Ordering::Equal)
        })
    });

    if let Some(limit) = args.limit {
        ops.truncate(limit);
    }

    if ops.is_empty() {
        println!("No running operations matched.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "OpId",
        "Op",
        "Namespace",
        "Secs Running",
        "CPU",
        "Mem",
        "Client",
        "Desc",
    ]);
    for op in &ops {
        table.add_row(vec![
            op.opid.clone(),
            op.op.clone(),
            op.ns.clone(),
            op.secs_running.to_string(),
            format!("{:.1}", op.cpu_usage),
            format!("{:.1}", op.mem_usage),
            op.client.clone(),
            op.desc.clone(),
        ]);
    }
    println!("{table}");
    println!("\n{} operation(s) shown.", ops.len());
    Ok(())
}

fn resource_usage(op: &CurrentOp, check_mem: bool, check_cpu: bool) -> f64 {
    let mut usage = 0.0;
    if check_cpu {
        usage += op.cpu_usage;
    }
    if check_mem {
        usage += op.mem_usage;
    }
    usage
}
