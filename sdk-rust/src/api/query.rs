// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Raw query API

use serde_json::{json, Value};

use crate::client::RushDb;
use crate::error::Result;
use crate::models::transaction::{transaction_header, Transaction};
use crate::transport::{ApiRequest, Transport};

/// Raw Cypher endpoint
pub struct QueryApi<'a, T> {
    client: &'a RushDb<T>,
}

impl<'a, T> QueryApi<'a, T> {
    pub(crate) fn new(client: &'a RushDb<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> QueryApi<'_, T> {
    /// Run a Cypher query on the server and return its raw response
    pub fn raw(
        &self,
        query: &str,
        params: Option<Value>,
        transaction: Option<&Transaction>,
    ) -> Result<Value> {
        let mut body = json!({ "query": query });
        if let (Some(params), Value::Object(map)) = (params, &mut body) {
            map.insert("params".to_string(), params);
        }
        let request = ApiRequest::post("/query/raw")
            .with_body(body)
            .with_headers(transaction_header(transaction));
        self.client.request(request)
    }
}
