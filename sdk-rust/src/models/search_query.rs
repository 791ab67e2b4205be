// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Search query descriptor sent to the search endpoints
//!
//! The `where` tree is kept as raw JSON. The server defines its semantics
//! (field predicates, `$and` / `$or`, `$gte`, `$gt`, `$lt`, `$lte`,
//! `$contains`, `$startsWith`, ...); the SDK only carries it and replays it
//! through [`crate::SearchResult::search_query`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

/// `orderBy` accepts either a bare direction or a per-field map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderBy {
    Direction(OrderDirection),
    Fields(Map<String, Value>),
}

impl From<OrderDirection> for OrderBy {
    fn from(direction: OrderDirection) -> Self {
        OrderBy::Direction(direction)
    }
}

/// Filter, sort and pagination descriptor for `find` calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<Value>,
}

impl SearchQuery {
    /// Create an empty query (matches everything, server default paging)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter tree
    pub fn where_clause(mut self, filter: Value) -> Self {
        self.where_clause = Some(filter);
        self
    }

    /// Restrict to the given labels
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to a single label
    pub fn label(self, label: impl Into<String>) -> Self {
        self.labels([label.into()])
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the ordering, either an [`OrderDirection`] or a field map
    pub fn order_by(mut self, order: impl Into<OrderBy>) -> Self {
        self.order_by = Some(order.into());
        self
    }

    /// Order by a single field
    pub fn order_by_field(self, field: impl Into<String>, direction: OrderDirection) -> Self {
        let mut fields = Map::new();
        fields.insert(
            field.into(),
            serde_json::to_value(direction).unwrap_or(Value::Null),
        );
        self.order_by(OrderBy::Fields(fields))
    }

    pub fn aggregate(mut self, aggregate: Value) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    /// The same query shifted to the page after one of `loaded` items
    pub fn next_page(&self, loaded: u64) -> Self {
        let mut next = self.clone();
        next.skip = Some(self.skip.unwrap_or(0).saturating_add(loaded));
        next
    }

    /// Request body for the search endpoints
    pub fn to_body(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }

    pub fn is_empty(&self) -> bool {
        *self == SearchQuery::default()
    }
}
