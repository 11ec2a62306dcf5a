use clap::Parser;

use mongokit::cli::{Cli, Command};
use mongokit::commands;
use mongokit::connection::ConnectionManager;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let manager = ConnectionManager::new();

    let result = match &cli.command {
        Command::CurrentOps(args) => commands::current_ops::run(&manager, args),
        Command::IndexCheck(args) => commands::index_check::run(&manager, args),
        Command::IndexUsage(args) => commands::index_usage::run(&manager, args),
        Command::ReplicaSizes(args) => commands::replica_sizes::run(&manager, args),
        Command::ShardedSizes(args) => commands::sharded_sizes::run(&manager, args),
        Command::ShardedSummary(args) => commands::sharded_summary::run(&manager, args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
