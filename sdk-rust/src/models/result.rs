// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Paginated search results
//!
//! [`SearchResult`] wraps one fetched page together with the total match
//! count and the query that produced it. It is an immutable value: no
//! network access, no mutation after construction, and it never caches
//! other pages. Use [`SearchQuery::next_page`] with [`SearchResult::count`]
//! to drive a manual pagination loop.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use std::ops::{Bound, RangeBounds};

use crate::error::{Error, Result};
use crate::models::record::Record;
use crate::models::search_query::SearchQuery;

/// Conversion of a result item into its plain JSON view.
///
/// Records yield their clean data (no `__` fields); raw JSON passes through.
pub trait ToDict {
    fn to_dict(&self) -> Value;
}

impl ToDict for Value {
    fn to_dict(&self) -> Value {
        self.clone()
    }
}

impl ToDict for crate::models::relationship::Relationship {
    fn to_dict(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl ToDict for crate::models::property::Property {
    fn to_dict(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl ToDict for String {
    fn to_dict(&self) -> Value {
        Value::String(self.clone())
    }
}

/// Pagination summary for UIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub total: u64,
    pub loaded: usize,
    pub has_more: bool,
    pub skip: u64,
    pub limit: Option<u64>,
}

/// One page of search results plus pagination metadata
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<T> {
    data: Vec<T>,
    total: u64,
    search_query: SearchQuery,
}

/// Search result over records
pub type RecordSearchResult = SearchResult<Record>;

impl<T> SearchResult<T> {
    /// Create a result page.
    ///
    /// `total` defaults to the page length, `search_query` to an empty query.
    pub fn new(data: Vec<T>, total: Option<u64>, search_query: Option<SearchQuery>) -> Self {
        let total = total.unwrap_or(data.len() as u64);
        Self {
            data,
            total,
            search_query: search_query.unwrap_or_default(),
        }
    }

    /// An empty page for the given query
    pub fn empty(search_query: Option<SearchQuery>) -> Self {
        Self::new(Vec::new(), Some(0), search_query)
    }

    /// Decode a `{ "data": [...], "total": n }` response envelope.
    ///
    /// A missing `total` falls back to the page length; a missing `data`
    /// is an empty page.
    pub fn from_response<F>(
        response: Value,
        search_query: Option<SearchQuery>,
        mut convert: F,
    ) -> Result<Self>
    where
        F: FnMut(Value) -> Result<T>,
    {
        let mut envelope = match response {
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidOperation(format!(
                    "expected a search response object, got {}",
                    other
                )))
            }
        };

        let items = match envelope.remove("data") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => {
                log::warn!("Search response has no 'data' field, treating as empty page");
                Vec::new()
            }
            Some(other) => {
                return Err(Error::InvalidOperation(format!(
                    "expected 'data' to be an array, got {}",
                    other
                )))
            }
        };

        let total = envelope.get("total").and_then(Value::as_u64);
        let data = items
            .into_iter()
            .map(&mut convert)
            .collect::<Result<Vec<T>>>()?;

        Ok(Self::new(data, total, search_query))
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Total number of matches on the server, across all pages
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Query that produced this page
    pub fn search_query(&self) -> &SearchQuery {
        &self.search_query
    }

    /// Number of items on this page
    pub fn count(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` iff the page holds no items
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Records skipped before this page
    pub fn skip(&self) -> u64 {
        self.search_query.skip.unwrap_or(0)
    }

    pub fn limit(&self) -> Option<u64> {
        self.search_query.limit
    }

    /// Whether the server holds matches past the end of this page
    pub fn has_more(&self) -> bool {
        self.total > self.skip().saturating_add(self.count() as u64)
    }

    /// Item at `index`
    pub fn get(&self, index: usize) -> Result<&T> {
        self.data.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.data.len(),
        })
    }

    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    /// Items in `range` as a plain slice.
    ///
    /// Bounds are clamped to the page, so an out-of-range slice is empty
    /// rather than an error.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> &[T] {
        let len = self.data.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len);

        if start >= end {
            &[]
        } else {
            &self.data[start..end]
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Convert every item, keeping the pagination metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> SearchResult<U> {
        SearchResult {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            search_query: self.search_query,
        }
    }

    pub fn get_page_info(&self) -> PageInfo {
        PageInfo {
            total: self.total,
            loaded: self.count(),
            has_more: self.has_more(),
            skip: self.skip(),
            limit: self.limit(),
        }
    }
}

impl<T: ToDict> SearchResult<T> {
    /// Plain JSON view: `{ total, data, search_query }`
    pub fn to_dict(&self) -> Value {
        json!({
            "total": self.total,
            "data": self.data.iter().map(ToDict::to_dict).collect::<Vec<_>>(),
            "search_query": self.search_query.to_body(),
        })
    }
}

impl<T> Default for SearchResult<T> {
    fn default() -> Self {
        Self::new(Vec::new(), None, None)
    }
}

impl<T> std::ops::Index<usize> for SearchResult<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IntoIterator for SearchResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SearchResult<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> std::fmt::Display for SearchResult<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchResult(count={}, total={})", self.count(), self.total)
    }
}

impl<T: Serialize> Serialize for SearchResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SearchResult", 3)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("data", &self.data)?;
        state.serialize_field("search_query", &self.search_query)?;
        state.end()
    }
}
