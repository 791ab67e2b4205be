// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! API facades
//!
//! Each facade borrows the client and turns typed arguments into one
//! [`ApiRequest`](crate::transport::ApiRequest), then decodes the response.
//! Every call that can join a transaction takes it as an explicit
//! `Option<&Transaction>`.

pub mod labels;
pub mod properties;
pub mod query;
pub mod records;
pub mod relationships;
pub mod transactions;

pub use labels::LabelsApi;
pub use properties::PropertiesApi;
pub use query::QueryApi;
pub use records::{RecordTarget, RecordsApi};
pub use relationships::RelationshipsApi;
pub use transactions::TransactionsApi;

use serde_json::Value;

/// Unwrap the `data` member of a response envelope.
///
/// Responses that are not envelopes are returned unchanged.
pub(crate) fn response_data(response: Value) -> Value {
    match response {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
