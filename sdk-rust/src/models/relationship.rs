// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Relationship descriptors and attach/detach options
//!
//! Relationship type strings are opaque labels; the SDK never validates them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Relationship type used for edges induced by nested payloads
pub const DEFAULT_RELATIONSHIP_TYPE: &str = "__RUSHDB__RELATION__DEFAULT__";

/// Edge direction, from the source record's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipDirection {
    In,
    #[default]
    Out,
}

/// A relationship as returned by the relationships search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub source_label: String,
    #[serde(default)]
    pub target_id: String,
    #[serde(default)]
    pub target_label: String,
    #[serde(rename = "type", default)]
    pub relationship_type: String,
}

/// Options for `attach`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipOptions {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<RelationshipDirection>,
}

impl RelationshipOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, relationship_type: impl Into<String>) -> Self {
        self.relationship_type = Some(relationship_type.into());
        self
    }

    pub fn with_direction(mut self, direction: RelationshipDirection) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// One relationship type or several
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeOrTypes {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for TypeOrTypes {
    fn from(value: &str) -> Self {
        TypeOrTypes::One(value.to_string())
    }
}

impl From<String> for TypeOrTypes {
    fn from(value: String) -> Self {
        TypeOrTypes::One(value)
    }
}

impl From<Vec<String>> for TypeOrTypes {
    fn from(value: Vec<String>) -> Self {
        TypeOrTypes::Many(value)
    }
}

/// Options for `detach`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDetachOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_or_types: Option<TypeOrTypes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<RelationshipDirection>,
}

impl RelationshipDetachOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types(mut self, types: impl Into<TypeOrTypes>) -> Self {
        self.type_or_types = Some(types.into());
        self
    }

    pub fn with_direction(mut self, direction: RelationshipDirection) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Merge serialized options into an attach/detach body
pub(crate) fn merge_options<O: Serialize>(body: &mut Map<String, Value>, options: Option<&O>) {
    let Some(options) = options else {
        return;
    };
    if let Ok(Value::Object(fields)) = serde_json::to_value(options) {
        body.extend(fields);
    }
}

/// Pagination for the relationships search endpoint (sent as query string)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
}

impl PaginationParams {
    pub fn new(limit: u64, skip: u64) -> Self {
        Self {
            limit: Some(limit),
            skip: Some(skip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_serialize_with_server_names() {
        let options = RelationshipOptions::new()
            .with_type("HAS_EMPLOYEE")
            .with_direction(RelationshipDirection::In);
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"type": "HAS_EMPLOYEE", "direction": "in"})
        );

        let detach = RelationshipDetachOptions::new()
            .with_types(vec!["A".to_string(), "B".to_string()])
            .with_direction(RelationshipDirection::Out);
        assert_eq!(
            serde_json::to_value(&detach).unwrap(),
            json!({"typeOrTypes": ["A", "B"], "direction": "out"})
        );
    }

    #[test]
    fn test_relationship_deserializes() {
        let rel: Relationship = serde_json::from_value(json!({
            "sourceId": "s1",
            "sourceLabel": "PROJECT",
            "targetId": "t1",
            "targetLabel": "EMPLOYEE",
            "type": "HAS_EMPLOYEE"
        }))
        .unwrap();
        assert_eq!(rel.relationship_type, "HAS_EMPLOYEE");
        assert_eq!(rel.target_label, "EMPLOYEE");
    }

    #[test]
    fn test_merge_skips_missing_options() {
        let mut body = Map::new();
        body.insert("targetIds".to_string(), json!(["a"]));
        merge_options::<RelationshipOptions>(&mut body, None);
        assert_eq!(Value::Object(body), json!({"targetIds": ["a"]}));
    }
}
