// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transactions API
//!
//! `begin` returns a [`Transaction`] handle; `commit` and `rollback` consume
//! it. [`TransactionsApi::run`] wraps a closure so the handle is always
//! resolved one way or the other.

use serde_json::{json, Value};

use super::response_data;
use crate::client::RushDb;
use crate::error::{Error, Result};
use crate::models::transaction::{Transaction, DEFAULT_TRANSACTION_TTL_MS};
use crate::transport::{ApiRequest, Transport};

/// Transaction endpoints
pub struct TransactionsApi<'a, T> {
    client: &'a RushDb<T>,
}

impl<'a, T> TransactionsApi<'a, T> {
    pub(crate) fn new(client: &'a RushDb<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> TransactionsApi<'_, T> {
    /// Open a transaction; `ttl` is in milliseconds
    pub fn begin(&self, ttl: Option<u64>) -> Result<Transaction> {
        let ttl = ttl.unwrap_or(DEFAULT_TRANSACTION_TTL_MS);
        let request = ApiRequest::post("/tx").with_body(json!({ "ttl": ttl }));
        let data = response_data(self.client.request(request)?);

        let id = data
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                Error::Transaction(format!("server returned no transaction id: {}", data))
            })?;

        log::debug!("Transaction {} started (ttl {} ms)", id, ttl);
        Ok(Transaction::from_id(id))
    }

    pub fn commit(&self, transaction: Transaction) -> Result<Value> {
        self.finish(transaction, "commit")
    }

    pub fn rollback(&self, transaction: Transaction) -> Result<Value> {
        self.finish(transaction, "rollback")
    }

    /// Run `f` inside a fresh transaction.
    ///
    /// Commits when `f` returns `Ok`. On `Err` the transaction is rolled back
    /// and the closure's error is returned; a failing rollback is only logged.
    pub fn run<R, F>(&self, ttl: Option<u64>, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        let transaction = self.begin(ttl)?;
        match f(&transaction) {
            Ok(value) => {
                self.commit(transaction)?;
                Ok(value)
            }
            Err(e) => {
                let id = transaction.id().to_string();
                if let Err(rollback_error) = self.rollback(transaction) {
                    log::warn!("Rollback of transaction {} failed: {}", id, rollback_error);
                }
                Err(e)
            }
        }
    }

    fn finish(&self, transaction: Transaction, action: &str) -> Result<Value> {
        let id = transaction.into_id();
        if id.is_empty() {
            return Err(Error::Transaction(format!("cannot {} a transaction without id", action)));
        }
        let request = ApiRequest::post(format!("/tx/{}/{}", id, action)).with_body(json!({}));
        let response = self.client.request(request)?;
        log::debug!("Transaction {} {}", id, action);
        Ok(response)
    }
}
