// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Data model shared by the API facades

pub mod property;
pub mod record;
pub mod relationship;
pub mod result;
pub mod search_query;
pub mod transaction;

pub use property::{Property, PropertyType, PropertyValuesData};
pub use record::Record;
pub use relationship::{
    PaginationParams, Relationship, RelationshipDetachOptions, RelationshipDirection,
    RelationshipOptions, TypeOrTypes, DEFAULT_RELATIONSHIP_TYPE,
};
pub use result::{PageInfo, RecordSearchResult, SearchResult, ToDict};
pub use search_query::{OrderBy, OrderDirection, SearchQuery};
pub use transaction::{Transaction, DEFAULT_TRANSACTION_TTL_MS, TRANSACTION_HEADER};
