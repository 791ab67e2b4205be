// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Records API
//!
//! Create, read, update and delete records, attach and detach
//! relationships, and bulk-import nested JSON or CSV.

use serde_json::{json, Map, Value};

use super::response_data;
use crate::client::RushDb;
use crate::error::{Error, Result};
use crate::models::record::Record;
use crate::models::relationship::{merge_options, RelationshipDetachOptions, RelationshipOptions};
use crate::models::result::RecordSearchResult;
use crate::models::search_query::SearchQuery;
use crate::models::transaction::{transaction_header, Transaction};
use crate::normalize::{default_create_options, Normalizer};
use crate::transport::{ApiRequest, Transport};

/// Server-side cap used when deleting a list of ids
const DELETE_BY_IDS_LIMIT: u64 = 1000;

/// Records addressed by an attach/detach/delete call
#[derive(Debug, Clone)]
pub enum RecordTarget<'a> {
    Id(&'a str),
    Ids(Vec<String>),
    Record(&'a Record),
    Records(&'a [Record]),
    /// A record object with `__id`, or a list of them
    Json(&'a Value),
}

impl RecordTarget<'_> {
    /// Resolve the target to record ids
    pub fn ids(&self) -> Result<Vec<String>> {
        match self {
            RecordTarget::Id(id) => Ok(vec![id.to_string()]),
            RecordTarget::Ids(ids) => Ok(ids.clone()),
            RecordTarget::Record(record) => Ok(vec![record.id()?.to_string()]),
            RecordTarget::Records(records) => records
                .iter()
                .map(|record| record.id().map(str::to_string))
                .collect(),
            RecordTarget::Json(value) => json_ids(value),
        }
    }
}

fn json_ids(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::String(id) => Ok(vec![id.clone()]),
        Value::Object(map) => match map.get("__id").and_then(Value::as_str) {
            Some(id) => Ok(vec![id.to_string()]),
            None => Err(Error::InvalidOperation(
                "target object has no '__id' field".to_string(),
            )),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(id) => Ok(id.clone()),
                Value::Object(map) => map
                    .get("__id")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        Error::InvalidOperation("target object has no '__id' field".to_string())
                    }),
                other => Err(Error::InvalidOperation(format!(
                    "invalid target format: {}",
                    other
                ))),
            })
            .collect(),
        other => Err(Error::InvalidOperation(format!(
            "invalid target format: {}",
            other
        ))),
    }
}

impl<'a> From<&'a str> for RecordTarget<'a> {
    fn from(id: &'a str) -> Self {
        RecordTarget::Id(id)
    }
}

impl<'a> From<&'a String> for RecordTarget<'a> {
    fn from(id: &'a String) -> Self {
        RecordTarget::Id(id)
    }
}

impl From<String> for RecordTarget<'_> {
    fn from(id: String) -> Self {
        RecordTarget::Ids(vec![id])
    }
}

impl From<Vec<String>> for RecordTarget<'_> {
    fn from(ids: Vec<String>) -> Self {
        RecordTarget::Ids(ids)
    }
}

impl From<&[&str]> for RecordTarget<'_> {
    fn from(ids: &[&str]) -> Self {
        RecordTarget::Ids(ids.iter().map(|id| id.to_string()).collect())
    }
}

impl<'a> From<&'a Record> for RecordTarget<'a> {
    fn from(record: &'a Record) -> Self {
        RecordTarget::Record(record)
    }
}

impl<'a> From<&'a [Record]> for RecordTarget<'a> {
    fn from(records: &'a [Record]) -> Self {
        RecordTarget::Records(records)
    }
}

impl<'a> From<&'a Vec<Record>> for RecordTarget<'a> {
    fn from(records: &'a Vec<Record>) -> Self {
        RecordTarget::Records(records)
    }
}

impl<'a> From<&'a Value> for RecordTarget<'a> {
    fn from(value: &'a Value) -> Self {
        RecordTarget::Json(value)
    }
}

/// Records endpoints
pub struct RecordsApi<'a, T> {
    client: &'a RushDb<T>,
}

impl<'a, T> RecordsApi<'a, T> {
    pub(crate) fn new(client: &'a RushDb<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> RecordsApi<'_, T> {
    /// Create a single record
    pub fn create(
        &self,
        label: &str,
        data: Value,
        options: Option<&Value>,
        transaction: Option<&Transaction>,
    ) -> Result<Record> {
        let body = json!({
            "label": label,
            "data": data,
            "options": options.cloned().unwrap_or_else(default_create_options),
        });
        let request = ApiRequest::post("/records")
            .with_body(body)
            .with_headers(transaction_header(transaction));
        let response = self.client.request(request)?;
        Record::from_value(response_data(response))
    }

    /// Create records from a nested payload in one batched request.
    ///
    /// The payload is normalized first; invalid input fails with
    /// [`Error::Validation`] before anything is sent.
    pub fn create_many(
        &self,
        label: &str,
        data: &Value,
        options: Option<&Value>,
        transaction: Option<&Transaction>,
    ) -> Result<Vec<Record>> {
        self.create_many_with(&Normalizer::default(), label, data, options, transaction)
    }

    /// [`create_many`](Self::create_many) with a custom normalizer
    pub fn create_many_with(
        &self,
        normalizer: &Normalizer,
        label: &str,
        data: &Value,
        options: Option<&Value>,
        transaction: Option<&Transaction>,
    ) -> Result<Vec<Record>> {
        let plan = normalizer.normalize(label, data)?;
        let options = options.cloned().unwrap_or_else(default_create_options);
        let request = ApiRequest::post("/records/import/json")
            .with_body(plan.to_request_body(&options)?)
            .with_headers(transaction_header(transaction));

        let response = self.client.request(request)?;
        records_from(response_data(response))
    }

    /// Import CSV text; parsing happens on the server
    pub fn import_csv(
        &self,
        label: &str,
        csv: &str,
        options: Option<&Value>,
        transaction: Option<&Transaction>,
    ) -> Result<Value> {
        let body = json!({
            "label": label,
            "data": csv,
            "options": options.cloned().unwrap_or_else(default_create_options),
        });
        let request = ApiRequest::post("/records/import/csv")
            .with_body(body)
            .with_headers(transaction_header(transaction));
        self.client.request(request)
    }

    /// Replace all fields of a record
    pub fn set(&self, record_id: &str, data: Value, transaction: Option<&Transaction>) -> Result<Value> {
        let request = ApiRequest::put(format!("/records/{}", record_id))
            .with_body(data)
            .with_headers(transaction_header(transaction));
        self.client.request(request)
    }

    /// Merge fields into a record
    pub fn update(
        &self,
        record_id: &str,
        data: Value,
        transaction: Option<&Transaction>,
    ) -> Result<Value> {
        let request = ApiRequest::patch(format!("/records/{}", record_id))
            .with_body(data)
            .with_headers(transaction_header(transaction));
        self.client.request(request)
    }

    /// Create relationships from `source` to every target
    pub fn attach<'s, 't>(
        &self,
        source: impl Into<RecordTarget<'s>>,
        target: impl Into<RecordTarget<'t>>,
        options: Option<&RelationshipOptions>,
        transaction: Option<&Transaction>,
    ) -> Result<Value> {
        let (source_id, body) = relationship_body(source.into(), target.into(), options)?;
        let request = ApiRequest::post(format!("/relationships/{}", source_id))
            .with_body(body)
            .with_headers(transaction_header(transaction));
        self.client.request(request)
    }

    /// Remove relationships between `source` and every target
    pub fn detach<'s, 't>(
        &self,
        source: impl Into<RecordTarget<'s>>,
        target: impl Into<RecordTarget<'t>>,
        options: Option<&RelationshipDetachOptions>,
        transaction: Option<&Transaction>,
    ) -> Result<Value> {
        let (source_id, body) = relationship_body(source.into(), target.into(), options)?;
        let request = ApiRequest::put(format!("/relationships/{}", source_id))
            .with_body(body)
            .with_headers(transaction_header(transaction));
        self.client.request(request)
    }

    /// Delete every record matching `search_query`
    pub fn delete(&self, search_query: &SearchQuery, transaction: Option<&Transaction>) -> Result<Value> {
        let request = ApiRequest::post("/records/delete")
            .with_body(search_query.to_body())
            .with_headers(transaction_header(transaction));
        self.client.request(request)
    }

    pub fn delete_by_id(&self, record_id: &str, transaction: Option<&Transaction>) -> Result<Value> {
        let request = ApiRequest::delete(format!("/records/{}", record_id))
            .with_headers(transaction_header(transaction));
        self.client.request(request)
    }

    /// Delete a list of records in one request
    pub fn delete_by_ids<S: AsRef<str>>(
        &self,
        record_ids: &[S],
        transaction: Option<&Transaction>,
    ) -> Result<Value> {
        let ids: Vec<&str> = record_ids.iter().map(AsRef::as_ref).collect();
        let body = json!({
            "limit": DELETE_BY_IDS_LIMIT,
            "where": {"$id": {"$in": ids}},
        });
        let request = ApiRequest::post("/records/delete")
            .with_body(body)
            .with_headers(transaction_header(transaction));
        self.client.request(request)
    }

    /// Search records, optionally among those related to `record_id`
    pub fn find(
        &self,
        search_query: Option<&SearchQuery>,
        record_id: Option<&str>,
        transaction: Option<&Transaction>,
    ) -> Result<RecordSearchResult> {
        let path = match record_id {
            Some(id) => format!("/records/{}/search", id),
            None => "/records/search".to_string(),
        };
        let query = search_query.cloned().unwrap_or_default();
        let request = ApiRequest::post(path)
            .with_body(query.to_body())
            .with_headers(transaction_header(transaction));

        let response = self.client.request(request)?;
        RecordSearchResult::from_response(response, Some(query), Record::from_value)
    }

    pub fn find_by_id(&self, record_id: &str, transaction: Option<&Transaction>) -> Result<Record> {
        let request = ApiRequest::get(format!("/records/{}", record_id))
            .with_headers(transaction_header(transaction));
        let response = self.client.request(request)?;
        match response_data(response) {
            Value::Null => Err(Error::NotFound(format!("record '{}'", record_id))),
            data => Record::from_value(data),
        }
    }
}

fn relationship_body<O: serde::Serialize>(
    source: RecordTarget<'_>,
    target: RecordTarget<'_>,
    options: Option<&O>,
) -> Result<(String, Value)> {
    let source_id = source
        .ids()?
        .into_iter()
        .next()
        .ok_or_else(|| Error::InvalidOperation("source record has no id".to_string()))?;
    let target_ids = target.ids()?;

    let mut body = Map::new();
    body.insert("targetIds".to_string(), json!(target_ids));
    merge_options(&mut body, options);
    Ok((source_id, Value::Object(body)))
}

fn records_from(data: Value) -> Result<Vec<Record>> {
    match data {
        Value::Array(items) => items.into_iter().map(Record::from_value).collect(),
        Value::Null => Ok(Vec::new()),
        other => Ok(vec![Record::from_value(other)?]),
    }
}
