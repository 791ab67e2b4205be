// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction lifecycle over the mock transport

#[path = "testutils/mod.rs"]
mod testutils;

use rushdb_sdk::{Error, RushDb};
use serde_json::json;
use testutils::mock_transport::MockTransport;

#[test]
fn test_begin_and_commit() {
    testutils::init_logging();
    let transport = MockTransport::new();
    transport.respond(json!({"data": {"id": "tx-42"}}));
    let db = RushDb::new("key", &transport);

    let tx = db.transactions().begin(None).unwrap();
    assert_eq!(tx.id(), "tx-42");
    assert_eq!(transport.last_request().body, Some(json!({"ttl": 5000})));

    db.records()
        .update("r1", json!({"name": "x"}), Some(&tx))
        .unwrap();
    assert_eq!(transport.last_request().header("X-Transaction-Id"), Some("tx-42"));

    db.transactions().commit(tx).unwrap();
    let commit = transport.last_request();
    assert_eq!(commit.path, "/tx/tx-42/commit");
    assert_eq!(commit.body, Some(json!({})));
}

#[test]
fn test_begin_with_custom_ttl() {
    let transport = MockTransport::new();
    transport.respond(json!({"data": {"id": "tx-1"}}));
    let db = RushDb::new("key", &transport);

    db.transactions().begin(Some(30_000)).unwrap();
    let request = transport.last_request();
    assert_eq!(request.path, "/tx");
    assert_eq!(request.body, Some(json!({"ttl": 30000})));
}

#[test]
fn test_begin_without_id_fails() {
    let transport = MockTransport::new();
    transport.respond(json!({"data": {}}));
    let db = RushDb::new("key", &transport);

    let err = db.transactions().begin(None).unwrap_err();
    assert!(matches!(err, Error::Transaction(_)));
}

#[test]
fn test_run_commits_on_success() {
    let transport = MockTransport::new();
    transport.respond(json!({"data": {"id": "tx-7"}}));
    let db = RushDb::new("key", &transport);

    let value = db
        .transactions()
        .run(None, |tx| {
            db.records().set("r1", json!({"a": 1}), Some(tx))?;
            Ok(7)
        })
        .unwrap();
    assert_eq!(value, 7);

    let paths: Vec<String> = transport.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/tx", "/records/r1", "/tx/tx-7/commit"]);
}

#[test]
fn test_run_rolls_back_on_error() {
    let transport = MockTransport::new();
    transport
        .respond(json!({"data": {"id": "tx-8"}}))
        .fail(400, "bad payload");
    let db = RushDb::new("key", &transport);

    let err = db
        .transactions()
        .run(None, |tx| db.records().update("r1", json!({}), Some(tx)))
        .unwrap_err();
    assert!(matches!(err, Error::Remote { status: Some(400), .. }));

    let last = transport.last_request();
    assert_eq!(last.path, "/tx/tx-8/rollback");
    assert_eq!(transport.request_count(), 3);
}

#[test]
fn test_run_keeps_closure_error_when_rollback_fails() {
    let transport = MockTransport::new();
    transport
        .respond(json!({"data": {"id": "tx-9"}}))
        .fail(409, "conflict")
        .fail(500, "rollback failed");
    let db = RushDb::new("key", &transport);

    let err = db
        .transactions()
        .run(None, |tx| db.records().delete_by_id("r1", Some(tx)))
        .unwrap_err();
    match err {
        Error::Remote { message, .. } => assert_eq!(message, "conflict"),
        other => panic!("unexpected error: {:?}", other),
    }
}
