// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory transport that records requests and replays canned responses

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use rushdb_sdk::{ApiRequest, AsyncTransport, Error, Result, Transport};
use serde_json::{json, Value};

#[derive(Default)]
pub struct MockTransport {
    sent: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<Value>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response body
    pub fn respond(&self, body: Value) -> &Self {
        self.responses.lock().push_back(Ok(body));
        self
    }

    /// Queue a server error
    pub fn fail(&self, status: u16, message: &str) -> &Self {
        let body = json!({ "message": message });
        self.responses
            .lock()
            .push_back(Err(Error::from_remote_body(Some(status), body)));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.sent.lock().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.sent
            .lock()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn request_count(&self) -> usize {
        self.sent.lock().len()
    }

    fn next(&self, request: ApiRequest) -> Result<Value> {
        self.sent.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "success": true })))
    }
}

impl Transport for MockTransport {
    fn send(&self, request: ApiRequest) -> Result<Value> {
        self.next(request)
    }
}

#[async_trait]
impl AsyncTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        self.next(request)
    }
}
