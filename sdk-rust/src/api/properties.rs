// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Properties API

use serde_json::Value;

use super::response_data;
use crate::client::RushDb;
use crate::error::{Error, Result};
use crate::models::property::{Property, PropertyValuesData};
use crate::models::search_query::{OrderDirection, SearchQuery};
use crate::models::transaction::{transaction_header, Transaction};
use crate::transport::{ApiRequest, Transport};

/// Properties endpoints
pub struct PropertiesApi<'a, T> {
    client: &'a RushDb<T>,
}

impl<'a, T> PropertiesApi<'a, T> {
    pub(crate) fn new(client: &'a RushDb<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> PropertiesApi<'_, T> {
    /// Properties used by the records matching `search_query`
    pub fn find(
        &self,
        search_query: Option<&SearchQuery>,
        transaction: Option<&Transaction>,
    ) -> Result<Vec<Property>> {
        let body = search_query
            .map(SearchQuery::to_body)
            .unwrap_or_else(|| Value::Object(Default::default()));
        let request = ApiRequest::post("/properties/search")
            .with_body(body)
            .with_headers(transaction_header(transaction));
        match response_data(self.client.request(request)?) {
            Value::Null => Ok(Vec::new()),
            data => Ok(serde_json::from_value(data)?),
        }
    }

    pub fn find_by_id(
        &self,
        property_id: &str,
        transaction: Option<&Transaction>,
    ) -> Result<Property> {
        let request = ApiRequest::get(format!("/properties/{}", property_id))
            .with_headers(transaction_header(transaction));
        match response_data(self.client.request(request)?) {
            Value::Null => Err(Error::NotFound(format!("property '{}'", property_id))),
            data => Ok(serde_json::from_value(data)?),
        }
    }

    /// Delete a property and its values from every record
    pub fn delete(&self, property_id: &str, transaction: Option<&Transaction>) -> Result<Value> {
        let request = ApiRequest::delete(format!("/properties/{}", property_id))
            .with_headers(transaction_header(transaction));
        self.client.request(request)
    }

    /// Distinct values of a property, with min/max for numeric ones
    pub fn values(
        &self,
        property_id: &str,
        sort: Option<OrderDirection>,
        skip: Option<u64>,
        limit: Option<u64>,
        transaction: Option<&Transaction>,
    ) -> Result<PropertyValuesData> {
        let request = ApiRequest::get(format!("/properties/{}/values", property_id))
            .with_query("sort", sort.map(|direction| direction.as_str()))
            .with_query("skip", skip)
            .with_query("limit", limit)
            .with_headers(transaction_header(transaction));
        match response_data(self.client.request(request)?) {
            Value::Null => Ok(PropertyValuesData::default()),
            data => Ok(serde_json::from_value(data)?),
        }
    }
}
