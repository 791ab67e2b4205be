// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Relationships API
//!
//! Relationship search is the one call offered both blocking and async.
//! Paging goes in the query string; the filter goes in the body.

use serde_json::Value;

use crate::client::RushDb;
use crate::error::Result;
use crate::models::relationship::{PaginationParams, Relationship};
use crate::models::result::SearchResult;
use crate::models::search_query::SearchQuery;
use crate::models::transaction::{transaction_header, Transaction};
use crate::transport::{ApiRequest, AsyncTransport, Transport};

/// Relationships endpoints
pub struct RelationshipsApi<'a, T> {
    client: &'a RushDb<T>,
}

impl<'a, T> RelationshipsApi<'a, T> {
    pub(crate) fn new(client: &'a RushDb<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> RelationshipsApi<'_, T> {
    /// Search relationships
    pub fn find(
        &self,
        search_query: Option<&SearchQuery>,
        pagination: Option<PaginationParams>,
        transaction: Option<&Transaction>,
    ) -> Result<SearchResult<Relationship>> {
        let (request, query) = search_request(search_query, pagination, transaction);
        let response = self.client.request(request)?;
        decode(response, query)
    }
}

impl<T: AsyncTransport> RelationshipsApi<'_, T> {
    /// Async variant of [`find`](RelationshipsApi::find)
    pub async fn find_async(
        &self,
        search_query: Option<&SearchQuery>,
        pagination: Option<PaginationParams>,
        transaction: Option<&Transaction>,
    ) -> Result<SearchResult<Relationship>> {
        let (request, query) = search_request(search_query, pagination, transaction);
        let response = self.client.request_async(request).await?;
        decode(response, query)
    }
}

/// Build the request and the query the result page describes
fn search_request(
    search_query: Option<&SearchQuery>,
    pagination: Option<PaginationParams>,
    transaction: Option<&Transaction>,
) -> (ApiRequest, SearchQuery) {
    let pagination = pagination.unwrap_or_default();
    let mut query = search_query.cloned().unwrap_or_default();

    let request = ApiRequest::post("/relationships/search")
        .with_body(query.to_body())
        .with_query("limit", pagination.limit)
        .with_query("skip", pagination.skip)
        .with_headers(transaction_header(transaction));

    if pagination.skip.is_some() {
        query.skip = pagination.skip;
    }
    if pagination.limit.is_some() {
        query.limit = pagination.limit;
    }
    (request, query)
}

fn decode(response: Value, query: SearchQuery) -> Result<SearchResult<Relationship>> {
    SearchResult::from_response(response, Some(query), |item| {
        Ok(serde_json::from_value(item)?)
    })
}
