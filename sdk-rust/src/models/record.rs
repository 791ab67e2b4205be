// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Record model
//!
//! A record is the server's JSON object for one stored entity: user fields
//! plus internal fields prefixed with `__` (`__id`, `__label`,
//! `__proptypes`). The local copy is a snapshot. After `set`, `update`,
//! `attach`, `detach` or `delete` it is no longer authoritative; re-fetch
//! it, or use [`Record::exists`] to probe whether it is still there.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::hash::{Hash, Hasher};

use crate::client::RushDb;
use crate::error::{Error, Result};
use crate::models::relationship::{RelationshipDetachOptions, RelationshipOptions};
use crate::models::result::ToDict;
use crate::models::search_query::SearchQuery;
use crate::models::transaction::Transaction;
use crate::api::records::RecordTarget;
use crate::transport::Transport;

const ID_FIELD: &str = "__id";
const LABEL_FIELD: &str = "__label";
const PROPTYPES_FIELD: &str = "__proptypes";
const INTERNAL_PREFIX: &str = "__";

/// A record returned by the server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    data: Map<String, Value>,
}

impl Record {
    /// Wrap a raw field map
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Wrap a decoded JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            other => Err(Error::InvalidRecord(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn id(&self) -> Result<&str> {
        self.internal_str(ID_FIELD)
    }

    pub fn label(&self) -> Result<&str> {
        self.internal_str(LABEL_FIELD)
    }

    /// Property types the server inferred, keyed by field name
    pub fn proptypes(&self) -> Result<&Value> {
        self.data
            .get(PROPTYPES_FIELD)
            .ok_or_else(|| Error::InvalidRecord(format!("record has no {}", PROPTYPES_FIELD)))
    }

    /// Creation time in milliseconds since the epoch, decoded from the id.
    ///
    /// The first hyphen-separated group of the id plus the first four hex
    /// digits of the second group hold the timestamp. The id does not have
    /// to be a well-formed UUID beyond that prefix.
    pub fn timestamp(&self) -> Result<i64> {
        let id = self.id()?;
        let mut groups = id.split('-');
        let (Some(high), Some(next)) = (groups.next(), groups.next()) else {
            return Err(Error::InvalidRecord(format!(
                "id '{}' has no timestamp prefix",
                id
            )));
        };
        let low: String = next.chars().take(4).collect();
        i64::from_str_radix(&format!("{}{}", high, low), 16).map_err(|e| {
            Error::InvalidRecord(format!("id '{}' has no timestamp prefix: {}", id, e))
        })
    }

    /// Creation date, decoded from the id
    pub fn date(&self) -> Result<DateTime<Utc>> {
        let millis = self.timestamp()?;
        Utc.timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| Error::InvalidRecord(format!("timestamp {} out of range", millis)))
    }

    /// Field value by key, including internal fields
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Field value by key, or `default` when absent
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.data.get(key).unwrap_or(default)
    }

    /// All fields, optionally without the `__` internal ones
    pub fn get_data(&self, exclude_internal: bool) -> Map<String, Value> {
        if exclude_internal {
            self.data
                .iter()
                .filter(|(key, _)| !key.starts_with(INTERNAL_PREFIX))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        } else {
            self.data.clone()
        }
    }

    /// User-defined fields only
    pub fn fields(&self) -> Map<String, Value> {
        self.get_data(true)
    }

    /// Raw field map as received
    pub fn raw(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_raw(self) -> Map<String, Value> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Replace all fields of this record on the server
    pub fn set<T: Transport>(
        &self,
        db: &RushDb<T>,
        data: Value,
        transaction: Option<&Transaction>,
    ) -> Result<Value> {
        db.records().set(self.id()?, data, transaction)
    }

    /// Merge fields into this record on the server
    pub fn update<T: Transport>(
        &self,
        db: &RushDb<T>,
        data: Value,
        transaction: Option<&Transaction>,
    ) -> Result<Value> {
        db.records().update(self.id()?, data, transaction)
    }

    /// Attach other records to this one
    pub fn attach<'t, T: Transport>(
        &self,
        db: &RushDb<T>,
        target: impl Into<RecordTarget<'t>>,
        options: Option<&RelationshipOptions>,
        transaction: Option<&Transaction>,
    ) -> Result<Value> {
        db.records().attach(self, target, options, transaction)
    }

    /// Detach other records from this one
    pub fn detach<'t, T: Transport>(
        &self,
        db: &RushDb<T>,
        target: impl Into<RecordTarget<'t>>,
        options: Option<&RelationshipDetachOptions>,
        transaction: Option<&Transaction>,
    ) -> Result<Value> {
        db.records().detach(self, target, options, transaction)
    }

    /// Delete this record. The local value becomes a dangling handle.
    pub fn delete<T: Transport>(
        &self,
        db: &RushDb<T>,
        transaction: Option<&Transaction>,
    ) -> Result<Value> {
        db.records().delete_by_id(self.id()?, transaction)
    }

    /// Ask the server whether this record still exists.
    ///
    /// A record without an id never exists; otherwise one search round trip.
    pub fn exists<T: Transport>(
        &self,
        db: &RushDb<T>,
        transaction: Option<&Transaction>,
    ) -> Result<bool> {
        let id = match self.data.get(ID_FIELD).and_then(Value::as_str) {
            Some(id) if !id.is_empty() => id,
            _ => return Ok(false),
        };

        let query = SearchQuery::new()
            .where_clause(json!({ "$id": id }))
            .limit(1);
        let found = db.records().find(Some(&query), None, transaction)?;
        Ok(!found.is_empty())
    }

    fn internal_str(&self, field: &str) -> Result<&str> {
        self.data
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidRecord(format!("record has no {}", field)))
    }
}

impl ToDict for Record {
    fn to_dict(&self) -> Value {
        Value::Object(self.fields())
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Ok(a), Ok(b)) => a == b,
            (Err(_), Err(_)) => self.data == other.data,
            _ => false,
        }
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Id-less records compare by content; hashing nothing stays consistent
        if let Ok(id) = self.id() {
            id.hash(state);
        }
    }
}

impl std::ops::Index<&str> for Record {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        &self.data[key]
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.label() {
            Ok(label) => label,
            Err(_) => return write!(f, "Record with {} fields", self.data.len()),
        };

        let name = ["name", "title", "email"]
            .iter()
            .filter_map(|key| self.data.get(*key))
            .find_map(|value| match value {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Null | Value::String(_) => None,
                other => Some(other.to_string()),
            });

        match (name, self.id()) {
            (Some(name), _) => write!(f, "{}: {}", label, name),
            (None, Ok(id)) => write!(f, "{} ({})", label, id),
            (None, Err(_)) => write!(f, "Record with {} fields", self.data.len()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn company() -> Record {
        Record::from_value(json!({
            "__id": "0192a3b4-c5d6-7e8f-9a0b-1c2d3e4f5a6b",
            "__label": "COMPANY",
            "__proptypes": {"name": "string", "rating": "number"},
            "name": "Google LLC",
            "rating": 4.9
        }))
        .unwrap()
    }

    #[test]
    fn test_internal_fields() {
        let record = company();
        assert_eq!(record.id().unwrap(), "0192a3b4-c5d6-7e8f-9a0b-1c2d3e4f5a6b");
        assert_eq!(record.label().unwrap(), "COMPANY");
        assert_eq!(record.proptypes().unwrap()["rating"], "number");
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let record = Record::from_value(json!({"name": "x"})).unwrap();
        assert!(matches!(record.id(), Err(Error::InvalidRecord(_))));
        assert!(record.timestamp().is_err());
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(Record::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn test_timestamp_from_id() {
        let record = company();
        // 0x0192a3b4c5d6
        assert_eq!(record.timestamp().unwrap(), 0x0192_a3b4_c5d6);
        assert_eq!(record.date().unwrap().timestamp_millis(), 0x0192_a3b4_c5d6);
    }

    #[test]
    fn test_timestamp_from_non_uuid_id() {
        let record = Record::from_value(json!({"__id": "0192a3b4-c5d6-custom"})).unwrap();
        assert_eq!(record.timestamp().unwrap(), 0x0192_a3b4_c5d6);

        let record = Record::from_value(json!({"__id": "0192a3b4-c5"})).unwrap();
        assert_eq!(record.timestamp().unwrap(), 0x0192_a3b4_c5);

        let record = Record::from_value(json!({"__id": "no-timestamp"})).unwrap();
        assert!(matches!(record.timestamp(), Err(Error::InvalidRecord(_))));

        let record = Record::from_value(json!({"__id": "plainid"})).unwrap();
        assert!(record.timestamp().is_err());
    }

    #[test]
    fn test_clean_data_excludes_internal() {
        let record = company();
        let fields = record.fields();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("name"));
        assert!(!fields.contains_key("__id"));
        assert_eq!(record.get_data(false).len(), 5);
        assert_eq!(record.to_dict(), json!({"name": "Google LLC", "rating": 4.9}));
    }

    #[test]
    fn test_get_with_default() {
        let record = company();
        let fallback = json!("default");
        assert_eq!(record.get_or("nonexistent", &fallback), "default");
        assert_eq!(record["name"], "Google LLC");
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn test_equality_and_hash_by_id() {
        let a = company();
        let mut b = company().into_raw();
        b.insert("name".to_string(), json!("Renamed"));
        let b = Record::new(b);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);

        let anonymous = Record::from_value(json!({"name": "x"})).unwrap();
        assert_eq!(anonymous, anonymous.clone());
        assert_ne!(anonymous, company());
    }

    #[test]
    fn test_display() {
        assert_eq!(company().to_string(), "COMPANY: Google LLC");

        let unnamed = Record::from_value(json!({"__id": "r1", "__label": "DEPT"})).unwrap();
        assert_eq!(unnamed.to_string(), "DEPT (r1)");

        let bare = Record::from_value(json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(bare.to_string(), "Record with 2 fields");
    }
}
