//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::models::ConnectTarget;

#[derive(Parser)]
#[command(name = "mongokit", version)]
#[command(about = "Administrative toolkit for MongoDB deployments")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Report running operations sorted by resource usage
    CurrentOps(CurrentOpsArgs),

    /// Detect duplicated (prefix-redundant) and unused indexes
    IndexCheck(IndexCheckArgs),

    /// Dump per-index usage statistics ($indexStats)
    IndexUsage(IndexUsageArgs),

    /// Per-collection sizes on a replica set deployment
    ReplicaSizes(ReplicaSizesArgs),

    /// Per-database collection size tables on a sharded cluster
    ShardedSizes(ShardedSizesArgs),

    /// Sharded cluster status digest
    ShardedSummary(ShardedSummaryArgs),
}

/// Connection flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConnectArgs {
    /// MongoDB host
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// MongoDB port
    #[arg(long, default_value_t = 27017)]
    pub port: u16,

    /// Username for authentication
    #[arg(long)]
    pub user: Option<String>,

    /// Password for authentication
    #[arg(long, env = "MONGOKIT_PASSWORD")]
    pub password: Option<String>,

    /// Authentication database
    #[arg(long, default_value = "admin")]
    pub auth_db: String,

    /// Replica set name to target
    #[arg(long)]
    pub replica_set: Option<String>,
}

impl ConnectArgs {
    pub fn target(&self) -> ConnectTarget {
        ConnectTarget {
            host: self.host.clone(),
            port: self.port,
            username: self.user.clone(),
            password: self.password.clone(),
            auth_db: self.auth_db.clone(),
            replica_set: self.replica_set.clone(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Mem,
    Cpu,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Args, Debug)]
pub struct CurrentOpsArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Sort by memory or CPU usage
    #[arg(long, value_enum)]
    pub check: Option<ResourceKind>,

    /// Sort by both memory and CPU usage
    #[arg(long)]
    pub check_both: bool,

    /// Order results by seconds running
    #[arg(long, value_enum, default_value_t = SortOrder::Desc)]
    pub order_by: SortOrder,

    /// Limit the number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Databases whose operations are excluded from the report
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub ignore_databases: Vec<String>,
}

#[derive(Args, Debug)]
pub struct IndexCheckArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Run checks for duplicated indexes
    #[arg(long)]
    pub check_duplicated: bool,

    /// Run checks for unused indexes
    #[arg(long)]
    pub check_unused: bool,

    /// Run all checks, both duplicated and unused
    #[arg(long)]
    pub check_all: bool,

    /// Check all databases, excluding system databases
    #[arg(long)]
    pub all_databases: bool,

    /// Comma separated list of databases to check
    #[arg(long, value_delimiter = ',')]
    pub databases: Vec<String>,

    /// Check all collections in the selected databases
    #[arg(long)]
    pub all_collections: bool,

    /// Comma separated list of collections to check
    #[arg(long, value_delimiter = ',')]
    pub collections: Vec<String>,
}

#[derive(Args, Debug)]
pub struct IndexUsageArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// The database holding the collection
    #[arg(long)]
    pub database: Option<String>,

    /// The collection to inspect
    #[arg(long)]
    pub collection: Option<String>,

    /// Run for every collection in the cluster
    #[arg(long)]
    pub show_all: bool,

    /// Databases to skip when --show-all is used
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub ignore_databases: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ReplicaSizesArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

#[derive(Args, Debug)]
pub struct ShardedSizesArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

#[derive(Args, Debug)]
pub struct ShardedSummaryArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}
