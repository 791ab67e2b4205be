// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! RushDB SDK - Rust client core for the RushDB graph database REST API
//!
//! The crate shapes requests and interprets responses for RushDB. It turns
//! nested JSON into a flat import plan of records and parent/child edges,
//! wraps search responses in a paginated [`SearchResult`], and threads
//! transactions explicitly through every call. The HTTP round trip itself
//! is performed by a [`Transport`] supplied by the application.
//!
//! # Quick Start
//!
//! ```no_run
//! use rushdb_sdk::{ApiRequest, Result, RushDb, SearchQuery, Transport};
//! use serde_json::{json, Value};
//!
//! struct MyTransport;
//!
//! impl Transport for MyTransport {
//!     fn send(&self, request: ApiRequest) -> Result<Value> {
//!         // Perform the HTTP call with the client of your choice
//!         # let _ = request;
//!         Ok(json!({"data": [], "total": 0}))
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let db = RushDb::new("api-key", MyTransport);
//!
//! db.records().create_many(
//!     "COMPANY",
//!     &json!({"name": "Acme", "DEPARTMENT": [{"name": "R&D"}]}),
//!     None,
//!     None,
//! )?;
//!
//! let query = SearchQuery::new().label("DEPARTMENT").limit(10);
//! let page = db.records().find(Some(&query), None, None)?;
//! if page.has_more() {
//!     let next = query.next_page(page.count() as u64);
//!     db.records().find(Some(&next), None, None)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Application Code                      │
//! └─────────────────────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  RushDb (this crate)                    │
//! │  - records / labels / properties        │
//! │  - relationships / transactions / query │
//! │  - Normalizer (nested JSON -> plan)     │
//! │  - SearchResult (paged containers)      │
//! └─────────────────────────────────────────┘
//!                  │  ApiRequest
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  Transport / AsyncTransport (app)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`client`] - Client and configuration
//! - [`api`] - Per-resource API facades
//! - [`normalize`] - Nested payload normalization
//! - [`models`] - Records, queries, results, relationships, transactions
//! - [`transport`] - Request type and transport traits
//! - [`token`] - API key prefix parsing
//! - [`error`] - Error types and handling

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod normalize;
pub mod token;
pub mod transport;

// Re-export main types for convenience
pub use api::RecordTarget;
pub use client::{ClientConfig, RushDb, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use models::{
    OrderBy, OrderDirection, PageInfo, PaginationParams, Property, PropertyType,
    PropertyValuesData, Record, RecordSearchResult, Relationship, RelationshipDetachOptions,
    RelationshipDirection, RelationshipOptions, SearchQuery, SearchResult, ToDict, Transaction,
    TypeOrTypes, DEFAULT_RELATIONSHIP_TYPE,
};
pub use normalize::{normalize, ChildLink, NormalizationPlan, NormalizedNode, Normalizer, PlanEdge};
pub use token::{extract_token_settings, PlanType, TokenSettings};
pub use transport::{ApiRequest, AsyncTransport, Method, Transport};
