// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Relationships, labels, properties and raw query endpoints

#[path = "testutils/mod.rs"]
mod testutils;

use std::sync::Arc;

use rushdb_sdk::transport::Method;
use rushdb_sdk::{OrderDirection, PaginationParams, PropertyType, RushDb, SearchQuery};
use serde_json::json;
use testutils::mock_transport::MockTransport;

fn relationships_page() -> serde_json::Value {
    json!({
        "data": [
            {"sourceId": "c1", "sourceLabel": "COMPANY", "targetId": "e1", "targetLabel": "EMP", "type": "EMPLOYS"},
            {"sourceId": "c1", "sourceLabel": "COMPANY", "targetId": "e2", "targetLabel": "EMP", "type": "EMPLOYS"}
        ],
        "total": 5
    })
}

#[test]
fn test_find_relationships() {
    let transport = MockTransport::new();
    transport.respond(relationships_page());
    let db = RushDb::new("key", &transport);

    let query = SearchQuery::new().where_clause(json!({"type": "EMPLOYS"}));
    let page = db
        .relationships()
        .find(Some(&query), Some(PaginationParams::new(2, 0)), None)
        .unwrap();

    assert_eq!(page.count(), 2);
    assert!(page.has_more());
    assert_eq!(page[1].target_id, "e2");

    let url = transport
        .last_request()
        .url("https://api.rushdb.com/api/v1")
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.rushdb.com/api/v1/relationships/search?limit=2&skip=0"
    );
}

#[tokio::test]
async fn test_find_relationships_async() {
    testutils::init_logging();
    let transport = Arc::new(MockTransport::new());
    transport.respond(relationships_page());
    let db = RushDb::new("key", Arc::clone(&transport));

    let page = db
        .relationships()
        .find_async(None, Some(PaginationParams::new(2, 2)), None)
        .await
        .unwrap();

    assert_eq!(page.count(), 2);
    assert_eq!(page.skip(), 2);
    assert!(page.has_more());
    assert_eq!(transport.last_request().method, Method::Post);
}

#[test]
fn test_labels_find() {
    let transport = MockTransport::new();
    transport.respond(json!({"data": {"COMPANY": 1, "EMP": 12}}));
    let db = RushDb::new("key", &transport);

    let labels = db
        .labels()
        .find(Some(&SearchQuery::new().where_clause(json!({"name": "Acme"}))), None)
        .unwrap();
    assert_eq!(labels["EMP"], json!(12));
    assert_eq!(transport.last_request().path, "/labels/search");
}

#[test]
fn test_properties_endpoints() {
    let transport = MockTransport::new();
    transport
        .respond(json!({"data": [{"id": "p1", "name": "age", "type": "number", "metadata": null}]}))
        .respond(json!({"data": {"id": "p1", "name": "age", "type": "number"}}))
        .respond(json!({"data": {"min": 18, "max": 65, "values": [18, 30, 65]}}));
    let db = RushDb::new("key", &transport);
    let properties = db.properties();

    let found = properties.find(None, None).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].property_type, PropertyType::Number);

    let property = properties.find_by_id("p1", None).unwrap();
    assert_eq!(property.name, "age");

    let values = properties
        .values("p1", Some(OrderDirection::Desc), Some(0), Some(10), None)
        .unwrap();
    assert_eq!(values.min, Some(18.0));
    assert_eq!(values.values.len(), 3);

    let request = transport.last_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, "/properties/p1/values");
    assert_eq!(
        request.query,
        vec![
            ("sort".to_string(), "desc".to_string()),
            ("skip".to_string(), "0".to_string()),
            ("limit".to_string(), "10".to_string())
        ]
    );

    properties.delete("p1", None).unwrap();
    assert_eq!(transport.last_request().method, Method::Delete);
}

#[test]
fn test_raw_query() {
    let transport = MockTransport::new();
    transport.respond(json!({"data": {"records": []}}));
    let db = RushDb::new("key", &transport);

    db.query()
        .raw("MATCH (n) RETURN n LIMIT $limit", Some(json!({"limit": 5})), None)
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.path, "/query/raw");
    assert_eq!(
        request.body,
        Some(json!({"query": "MATCH (n) RETURN n LIMIT $limit", "params": {"limit": 5}}))
    );
}

#[test]
fn test_ping() {
    let transport = MockTransport::new();
    transport.respond(json!({})).fail(503, "unavailable");
    let db = RushDb::new("key", &transport);

    assert!(db.ping());
    assert!(!db.ping());
}
