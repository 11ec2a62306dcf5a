//! Tests for BSON → typed record extraction, driven by literal documents
//! shaped like real server replies.

use mongodb::IndexModel;
use mongodb::bson::{DateTime, doc};

use mongokit::analyzer::{find_redundant_indexes, find_unused_indexes};
use mongokit::models::{
    CollectionStats, CurrentOp, IndexDescriptor, IndexDirection, IndexUsageRecord,
    ReplSetStatus, ShardEntry,
};

#[test]
fn index_model_without_name_synthesizes_server_style_name() {
    let model = IndexModel::builder().keys(doc! { "user_id": 1, "created_at": -1 }).build();
    let descriptor = IndexDescriptor::from_index_model(&model);
    assert_eq!(descriptor.name, "user_id_1_created_at_-1");
    assert_eq!(descriptor.keys.len(), 2);
    assert_eq!(descriptor.keys[1].direction, IndexDirection::Descending);
}

#[test]
fn index_model_with_named_options_keeps_name() {
    let options =
        mongodb::options::IndexOptions::builder().name("by_user".to_string()).build();
    let model =
        IndexModel::builder().keys(doc! { "user_id": 1 }).options(options).build();
    assert_eq!(IndexDescriptor::from_index_model(&model).name, "by_user");
}

#[test]
fn key_spec_renders_shell_notation() {
    let descriptor = IndexDescriptor::from_catalog_doc(&doc! {
        "name": "a_1_b_hashed",
        "key": { "a": 1, "b": "hashed" },
    });
    assert_eq!(descriptor.key_spec(), "{ a: 1, b: \"hashed\" }");
}

#[test]
fn extracted_catalog_feeds_redundancy_analysis() {
    // Catalog shaped like a listIndexes batch.
    let catalog = [
        doc! { "v": 2, "name": "_id_", "key": { "_id": 1 } },
        doc! { "v": 2, "name": "a_1", "key": { "a": 1 } },
        doc! { "v": 2, "name": "a_1_b_1", "key": { "a": 1, "b": 1 } },
    ];
    let descriptors: Vec<IndexDescriptor> =
        catalog.iter().map(IndexDescriptor::from_catalog_doc).collect();

    let redundant = find_redundant_indexes(&descriptors);
    assert_eq!(redundant.into_iter().collect::<Vec<_>>(), vec!["a_1".to_string()]);
}

#[test]
fn extracted_index_stats_feed_unused_analysis() {
    let stats = [
        doc! {
            "name": "a_1",
            "key": { "a": 1 },
            "host": "db0:27017",
            "accesses": { "ops": 0_i64, "since": DateTime::from_millis(1_700_000_000_000) },
        },
        doc! {
            "name": "_id_",
            "key": { "_id": 1 },
            "host": "db0:27017",
            "accesses": { "ops": 15_024_i64, "since": DateTime::from_millis(1_700_000_000_000) },
        },
    ];
    let records: Vec<IndexUsageRecord> =
        stats.iter().map(IndexUsageRecord::from_stats_doc).collect();

    assert_eq!(find_unused_indexes(&records), vec!["a_1"]);
}

#[test]
fn collection_stats_tolerates_numeric_type_mix() {
    // Servers report sizes as int32, int64 or double depending on magnitude.
    let stats = CollectionStats::from_doc(&doc! {
        "count": 3_i64,
        "size": 1024.0,
        "storageSize": 4096,
        "totalIndexSize": 8192_i64,
    });
    assert_eq!(stats.document_count, 3);
    assert_eq!(stats.data_size, 1024);
    assert_eq!(stats.storage_size, 4096);
    assert_eq!(stats.total_index_size, 8192);
    assert_eq!(stats.index_count, 0);
}

#[test]
fn current_op_with_mongos_opid() {
    let op = CurrentOp::from_doc(&doc! {
        "opid": "shard01:2231",
        "op": "getmore",
        "ns": "logs.entries",
        "secs_running": 301_i64,
    });
    assert_eq!(op.opid, "shard01:2231");
    assert_eq!(op.database(), "logs");
}

#[test]
fn shard_entries_from_list_shards_reply() {
    let reply = doc! {
        "shards": [
            { "_id": "shard01", "host": "rs0/db0:27018,db1:27018,db2:27018" },
            { "_id": "shard02", "host": "rs1/db3:27018,db4:27018" },
        ],
        "ok": 1.0,
    };
    let shards: Vec<ShardEntry> = reply
        .get_array("shards")
        .unwrap()
        .iter()
        .map(|shard| ShardEntry::from_doc(shard.as_document().unwrap()))
        .collect();

    assert_eq!(shards.len(), 2);
    assert_eq!(shards[0].replica_set(), Some("rs0"));
    assert_eq!(shards[0].members().len(), 3);
    assert_eq!(shards[1].members()[0], "db3:27018");
}

#[test]
fn repl_set_status_election_date() {
    let status = ReplSetStatus::from_doc(&doc! {
        "set": "rs0",
        "members": [
            {
                "_id": 0,
                "name": "db0:27018",
                "stateStr": "PRIMARY",
                "electionDate": DateTime::from_millis(1_700_000_000_000),
            },
            { "_id": 1, "name": "db1:27018", "stateStr": "SECONDARY" },
        ],
    });
    assert!(status.members[0].election_date.is_some());
    assert!(status.members[1].election_date.is_none());
}
