// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction token
//!
//! A transaction is a server-issued id. It is threaded explicitly through
//! every call as `Option<&Transaction>` and turned into a request header;
//! nothing about it is stored globally.

use serde::{Deserialize, Serialize};

/// Header carrying the transaction id
pub const TRANSACTION_HEADER: &str = "X-Transaction-Id";

/// Default transaction time-to-live in milliseconds
pub const DEFAULT_TRANSACTION_TTL_MS: u64 = 5000;

/// Handle to an open server-side transaction.
///
/// Not `Clone`: committing or rolling back consumes the handle, so a
/// completed transaction cannot be used again.
#[derive(Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    id: String,
}

impl Transaction {
    /// Wrap an existing transaction id (e.g. one received from another process)
    pub fn from_id(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn into_id(self) -> String {
        self.id
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Transaction({})", self.id)
    }
}

/// Header pair for an optional transaction
pub(crate) fn transaction_header(transaction: Option<&Transaction>) -> Option<(String, String)> {
    transaction
        .filter(|tx| !tx.id.is_empty())
        .map(|tx| (TRANSACTION_HEADER.to_string(), tx.id.clone()))
}
