// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Nested payload normalization
//!
//! Flattens a JSON tree of labeled objects into a creation plan for one
//! batched request. Inside each object:
//! - a key holding an object, or a non-empty array of objects, is a relation
//!   key: every such object becomes a child node labeled with the key
//! - every other key (string, number, boolean, null, datetime strings,
//!   arrays of those) stays a scalar field on the current node
//!
//! Nodes are numbered depth-first in input key order, so every parent comes
//! before its children. Each child gets an edge from its parent, typed with
//! [`DEFAULT_RELATIONSHIP_TYPE`] unless overridden, always directed `out`
//! from the parent.
//!
//! Traversal uses an explicit work stack; no depth limit is imposed here,
//! though the server may enforce its own.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::models::relationship::{RelationshipDirection, DEFAULT_RELATIONSHIP_TYPE};

/// Link from a node to one of its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildLink {
    pub index: usize,
    pub relationship_type: String,
}

/// One record to create: its label and scalar fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedNode {
    pub label: String,
    pub data: Map<String, Value>,
    /// Children in traversal order; the edges list carries the same links
    #[serde(skip)]
    pub children: Vec<ChildLink>,
}

/// Relationship to create between two plan nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEdge {
    /// Index of the parent node
    pub source: usize,
    /// Index of the child node
    pub target: usize,
    #[serde(rename = "type")]
    pub relationship_type: String,
    pub direction: RelationshipDirection,
}

/// Flattened nodes and edges for a nested payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizationPlan {
    label: String,
    nodes: Vec<NormalizedNode>,
    #[serde(rename = "relationships")]
    edges: Vec<PlanEdge>,
    #[serde(skip)]
    roots: Vec<usize>,
}

impl NormalizationPlan {
    /// Label of the root object(s)
    pub fn root_label(&self) -> &str {
        &self.label
    }

    pub fn nodes(&self) -> &[NormalizedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[PlanEdge] {
        &self.edges
    }

    /// Indices of the root nodes, in input order
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child nodes of `index`, in traversal order
    pub fn children_of(&self, index: usize) -> impl Iterator<Item = (&NormalizedNode, &str)> {
        self.nodes
            .get(index)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |link| {
                self.nodes
                    .get(link.index)
                    .map(|child| (child, link.relationship_type.as_str()))
            })
    }

    /// JSON body for the batched create request
    pub fn to_request_body(&self, options: &Value) -> Result<Value> {
        let mut body = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut body {
            map.insert("options".to_string(), options.clone());
        }
        Ok(body)
    }
}

/// Work item: an object waiting to become a node
struct Pending<'a> {
    label: String,
    object: &'a Map<String, Value>,
    parent: Option<usize>,
    path: String,
}

/// Flattens nested payloads into [`NormalizationPlan`]s
#[derive(Debug, Clone)]
pub struct Normalizer {
    relationship_type: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            relationship_type: DEFAULT_RELATIONSHIP_TYPE.to_string(),
        }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom relationship type for induced parent→child edges
    pub fn with_relationship_type(mut self, relationship_type: impl Into<String>) -> Self {
        self.relationship_type = relationship_type.into();
        self
    }

    pub fn relationship_type(&self) -> &str {
        &self.relationship_type
    }

    /// Flatten `data` (an object or a list of objects) labeled `label`.
    ///
    /// Either the whole tree is valid and a complete plan is returned, or
    /// the first structural problem is reported as [`Error::Validation`].
    pub fn normalize(&self, label: &str, data: &Value) -> Result<NormalizationPlan> {
        let mut stack: Vec<Pending<'_>> = match data {
            Value::Object(object) => vec![Pending {
                label: label.to_string(),
                object,
                parent: None,
                path: String::new(),
            }],
            Value::Array(items) => {
                let mut roots = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::Object(object) => roots.push(Pending {
                            label: label.to_string(),
                            object,
                            parent: None,
                            path: format!("[{}]", i),
                        }),
                        _ => {
                            return Err(Error::validation(
                                label,
                                format!("[{}]", i),
                                "root list must contain only objects",
                            ))
                        }
                    }
                }
                roots.reverse();
                roots
            }
            _ => {
                return Err(Error::validation(
                    label,
                    "",
                    "root must be an object or a list of objects",
                ))
            }
        };

        let mut nodes: Vec<NormalizedNode> = Vec::new();
        let mut edges: Vec<PlanEdge> = Vec::new();
        let mut roots: Vec<usize> = Vec::new();

        while let Some(pending) = stack.pop() {
            let index = nodes.len();
            let mut scalars = Map::new();
            let mut relations: Vec<(&String, Vec<&Map<String, Value>>, bool)> = Vec::new();

            for (key, value) in pending.object {
                match classify(value) {
                    Shape::Scalar => {
                        scalars.insert(key.clone(), value.clone());
                    }
                    Shape::Relation { children, indexed } => {
                        relations.push((key, children, indexed))
                    }
                    Shape::Mixed => {
                        return Err(Error::validation(
                            label,
                            join_path(&pending.path, key),
                            "array mixes objects and non-object values",
                        ))
                    }
                    Shape::Nested => {
                        return Err(Error::validation(
                            label,
                            join_path(&pending.path, key),
                            "nested arrays are not supported",
                        ))
                    }
                }
            }

            nodes.push(NormalizedNode {
                label: pending.label,
                data: scalars,
                children: Vec::new(),
            });

            match pending.parent {
                Some(parent) => {
                    edges.push(PlanEdge {
                        source: parent,
                        target: index,
                        relationship_type: self.relationship_type.clone(),
                        direction: RelationshipDirection::Out,
                    });
                    nodes[parent].children.push(ChildLink {
                        index,
                        relationship_type: self.relationship_type.clone(),
                    });
                }
                None => roots.push(index),
            }

            // Reverse push so children pop in input order
            for (key, children, indexed) in relations.into_iter().rev() {
                let key_path = join_path(&pending.path, key);
                for (i, child) in children.into_iter().enumerate().rev() {
                    stack.push(Pending {
                        label: key.clone(),
                        object: child,
                        parent: Some(index),
                        path: if indexed {
                            format!("{}[{}]", key_path, i)
                        } else {
                            key_path.clone()
                        },
                    });
                }
            }
        }

        log::debug!(
            "Normalized '{}' payload into {} nodes and {} relationships",
            label,
            nodes.len(),
            edges.len()
        );

        Ok(NormalizationPlan {
            label: label.to_string(),
            nodes,
            edges,
            roots,
        })
    }
}

/// Flatten `data` with the default relationship type
pub fn normalize(label: &str, data: &Value) -> Result<NormalizationPlan> {
    Normalizer::default().normalize(label, data)
}

/// Default options for create/import requests
pub fn default_create_options() -> Value {
    json!({"returnResult": true, "suggestTypes": true})
}

enum Shape<'a> {
    Scalar,
    /// `indexed` is set for arrays, whose children get `[i]` in key paths
    Relation {
        children: Vec<&'a Map<String, Value>>,
        indexed: bool,
    },
    Mixed,
    Nested,
}

fn classify(value: &Value) -> Shape<'_> {
    match value {
        Value::Object(object) => Shape::Relation {
            children: vec![object],
            indexed: false,
        },
        Value::Array(items) => {
            let objects: Vec<&Map<String, Value>> =
                items.iter().filter_map(Value::as_object).collect();
            if objects.is_empty() {
                if items.iter().any(Value::is_array) {
                    Shape::Nested
                } else {
                    Shape::Scalar
                }
            } else if objects.len() == items.len() {
                Shape::Relation {
                    children: objects,
                    indexed: true,
                }
            } else {
                Shape::Mixed
            }
        }
        _ => Shape::Scalar,
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
