// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stub handler implementations for testing and placeholder purposes.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::RunContext;
use crate::errors::HandlerError;
use crate::traits::Handler;

/// Returns a canned value on every invocation.
pub struct StubHandler {
    name: String,
    value: Value,
}

impl StubHandler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Value::Null,
        }
    }

    pub fn returning(mut self, value: Value) -> Self {
        self.value = value;
        self
    }
}

#[async_trait]
impl Handler for StubHandler {
    async fn invoke(&self, _args: Value, _ctx: &RunContext) -> Result<Value, HandlerError> {
        Ok(self.value.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Always fails with a fixed message.
pub struct FailingHandler {
    name: String,
    message: String,
}

impl FailingHandler {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl Handler for FailingHandler {
    async fn invoke(&self, _args: Value, _ctx: &RunContext) -> Result<Value, HandlerError> {
        Err(HandlerError::new(self.message.clone()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Sleeps before answering, for timeout scenarios.
pub struct SlowHandler {
    name: String,
    delay: Duration,
    value: Value,
}

impl SlowHandler {
    pub fn new(name: impl Into<String>, delay: Duration, value: Value) -> Self {
        Self {
            name: name.into(),
            delay,
            value,
        }
    }
}

#[async_trait]
impl Handler for SlowHandler {
    async fn invoke(&self, _args: Value, _ctx: &RunContext) -> Result<Value, HandlerError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.value.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Registered but reports itself unavailable, for fallback scenarios.
pub struct UnavailableHandler {
    name: String,
}

impl UnavailableHandler {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Handler for UnavailableHandler {
    async fn invoke(&self, _args: Value, _ctx: &RunContext) -> Result<Value, HandlerError> {
        Err(HandlerError::new(format!(
            "handler '{}' is not available",
            self.name
        )))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Records the resolved args it was invoked with.
pub struct RecordingHandler {
    name: String,
    value: Value,
    calls: Mutex<Vec<Value>>,
}

impl RecordingHandler {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Args seen so far, in invocation order.
    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().expect("recording lock poisoned").clone()
    }
}

#[async_trait]
impl Handler for RecordingHandler {
    async fn invoke(&self, args: Value, _ctx: &RunContext) -> Result<Value, HandlerError> {
        self.calls
            .lock()
            .expect("recording lock poisoned")
            .push(args);
        Ok(self.value.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
