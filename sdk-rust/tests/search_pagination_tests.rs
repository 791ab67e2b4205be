// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Walking search results page by page

#[path = "testutils/mod.rs"]
mod testutils;

use rushdb_sdk::{Record, RushDb, SearchQuery, SearchResult};
use serde_json::json;
use testutils::mock_transport::MockTransport;

fn page(ids: &[&str], total: u64) -> serde_json::Value {
    let data: Vec<_> = ids
        .iter()
        .map(|id| json!({"__id": id, "__label": "EMP", "name": id}))
        .collect();
    json!({ "data": data, "total": total })
}

#[test]
fn test_walk_all_pages() {
    testutils::init_logging();
    let transport = MockTransport::new();
    transport
        .respond(page(&["a", "b"], 5))
        .respond(page(&["c", "d"], 5))
        .respond(page(&["e"], 5));
    let db = RushDb::new("key", &transport);

    let mut query = SearchQuery::new().label("EMP").limit(2);
    let mut seen = Vec::new();
    loop {
        let result = db.records().find(Some(&query), None, None).unwrap();
        seen.extend(result.iter().map(|r| r.id().unwrap().to_string()));
        if !result.has_more() {
            break;
        }
        query = query.next_page(result.count() as u64);
    }

    assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
    let skips: Vec<_> = transport
        .requests()
        .iter()
        .map(|r| r.body.as_ref().and_then(|b| b.get("skip").cloned()))
        .collect();
    assert_eq!(skips, vec![None, Some(json!(2)), Some(json!(4))]);
}

#[test]
fn test_missing_total_falls_back_to_page_length() {
    let transport = MockTransport::new();
    transport.respond(json!({"data": [{"__id": "a"}, {"__id": "b"}]}));
    let db = RushDb::new("key", &transport);

    let result = db.records().find(None, None, None).unwrap();
    assert_eq!(result.total(), 2);
    assert!(!result.has_more());
}

#[test]
fn test_page_info_and_slicing() {
    let transport = MockTransport::new();
    transport.respond(page(&["a", "b", "c"], 10));
    let db = RushDb::new("key", &transport);

    let query = SearchQuery::new().skip(3).limit(3);
    let result = db.records().find(Some(&query), None, None).unwrap();

    let info = result.get_page_info();
    assert_eq!(info.total, 10);
    assert_eq!(info.loaded, 3);
    assert_eq!(info.skip, 3);
    assert_eq!(info.limit, Some(3));
    assert!(info.has_more);

    let middle: Vec<&str> = result.slice(1..).iter().map(|r| r.id().unwrap()).collect();
    assert_eq!(middle, vec!["b", "c"]);
    assert!(result.slice(5..9).is_empty());
    assert!(result.get(3).is_err());
    assert_eq!(result.to_string(), "SearchResult(count=3, total=10)");
}

#[test]
fn test_results_convert_to_plain_json() {
    let records = vec![
        Record::from_value(json!({"__id": "a", "__label": "EMP", "name": "Ann"})).unwrap(),
    ];
    let result = SearchResult::new(records, Some(1), Some(SearchQuery::new().limit(1)));

    let dict = result.to_dict();
    assert_eq!(dict["total"], json!(1));
    assert_eq!(dict["data"][0]["name"], json!("Ann"));
}
