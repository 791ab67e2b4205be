// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Labels API

use serde_json::Value;

use super::response_data;
use crate::client::RushDb;
use crate::error::Result;
use crate::models::search_query::SearchQuery;
use crate::models::transaction::{transaction_header, Transaction};
use crate::transport::{ApiRequest, Transport};

/// Labels endpoints
pub struct LabelsApi<'a, T> {
    client: &'a RushDb<T>,
}

impl<'a, T> LabelsApi<'a, T> {
    pub(crate) fn new(client: &'a RushDb<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> LabelsApi<'_, T> {
    /// Labels present among the records matching `search_query`, as the
    /// server reports them (label name to record count)
    pub fn find(
        &self,
        search_query: Option<&SearchQuery>,
        transaction: Option<&Transaction>,
    ) -> Result<Value> {
        let body = search_query
            .map(SearchQuery::to_body)
            .unwrap_or_else(|| Value::Object(Default::default()));
        let request = ApiRequest::post("/labels/search")
            .with_body(body)
            .with_headers(transaction_header(transaction));
        let response = self.client.request(request)?;
        Ok(response_data(response))
    }
}
