// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Client entry point and configuration

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{
    LabelsApi, PropertiesApi, QueryApi, RecordsApi, RelationshipsApi, TransactionsApi,
};
use crate::error::Result;
use crate::models::transaction::TRANSACTION_HEADER;
use crate::token::{extract_token_settings, TokenSettings};
use crate::transport::{ApiRequest, AsyncTransport, Transport};

/// Default RushDB cloud endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.rushdb.com";

/// Client configuration
///
/// Deserializable so applications can embed it in their own config files;
/// loading those files is left to the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Base URL without trailing slashes
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// RushDB client
///
/// Owns a configuration and a transport and hands out borrowed API facades.
/// Sync calls need `T: Transport`; the async relationship lookup needs
/// `T: AsyncTransport`.
#[derive(Debug)]
pub struct RushDb<T> {
    config: ClientConfig,
    transport: T,
}

impl<T> RushDb<T> {
    /// Client for the default endpoint
    pub fn new(api_key: impl Into<String>, transport: T) -> Self {
        Self::with_config(ClientConfig::new(api_key), transport)
    }

    pub fn with_config(mut config: ClientConfig, transport: T) -> Self {
        config.base_url = config.normalized_base_url().to_string();
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Plan settings encoded in the API key prefix, if any
    pub fn token_settings(&self) -> Option<TokenSettings> {
        extract_token_settings(&self.config.api_key).0
    }

    pub fn records(&self) -> RecordsApi<'_, T> {
        RecordsApi::new(self)
    }

    pub fn labels(&self) -> LabelsApi<'_, T> {
        LabelsApi::new(self)
    }

    pub fn properties(&self) -> PropertiesApi<'_, T> {
        PropertiesApi::new(self)
    }

    pub fn relationships(&self) -> RelationshipsApi<'_, T> {
        RelationshipsApi::new(self)
    }

    pub fn transactions(&self) -> TransactionsApi<'_, T> {
        TransactionsApi::new(self)
    }

    pub fn query(&self) -> QueryApi<'_, T> {
        QueryApi::new(self)
    }
}

impl<T: Transport> RushDb<T> {
    pub(crate) fn request(&self, request: ApiRequest) -> Result<Value> {
        let request = request.resolve(&self.config.base_url)?;
        log_request(&request);
        self.transport.send(request)
    }

    /// Check whether the server answers
    pub fn ping(&self) -> bool {
        match self.request(ApiRequest::get("/")) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("Ping failed: {}", e);
                false
            }
        }
    }
}

impl<T: AsyncTransport> RushDb<T> {
    pub(crate) async fn request_async(&self, request: ApiRequest) -> Result<Value> {
        let request = request.resolve(&self.config.base_url)?;
        log_request(&request);
        self.transport.send(request).await
    }
}

fn log_request(request: &ApiRequest) {
    log::debug!(
        "{} {} (transaction: {})",
        request.method,
        request
            .endpoint
            .as_ref()
            .map_or(request.path.as_str(), |url| url.as_str()),
        request.header(TRANSACTION_HEADER).unwrap_or("none")
    );
}
