//! Test doubles for the engine traits
//!
//! [`StaticEngine`] implements all three engine traits over in-memory state:
//! invocations are scripted ahead of time, query replies match on substrings
//! of the rendered selection, and everything the runtime sends is recorded
//! for assertions. No I/O anywhere.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value as JsonValue;

use crate::descriptor::CallDescriptor;
use crate::engine::{CallBoundary, QueryExecutor, SchemaRegistry};
use crate::error::EngineError;
use crate::ops::{RegistryOp, SchemaId};
use crate::selection::Selection;

#[derive(Debug, Default)]
struct EngineState {
    pending_calls: VecDeque<CallDescriptor>,
    replies: Vec<(String, JsonValue)>,
    submissions: Vec<(String, Vec<RegistryOp>)>,
    executed: Vec<String>,
    returned_value: Option<JsonValue>,
    returned_error: Option<String>,
}

/// An in-memory engine scripted by the test.
#[derive(Debug, Default)]
pub struct StaticEngine {
    state: Mutex<EngineState>,
}

impl StaticEngine {
    /// Create an engine with nothing scripted.
    pub fn new() -> Self {
        StaticEngine::default()
    }

    /// Script the next invocation [`CallBoundary::current_call`] hands out.
    pub fn push_call(&self, call: CallDescriptor) {
        self.state.lock().pending_calls.push_back(call);
    }

    /// Script a query reply: any executed selection whose rendered form
    /// contains `needle` answers with `data`. Earlier entries win.
    pub fn reply(&self, needle: impl Into<String>, data: JsonValue) {
        self.state.lock().replies.push((needle.into(), data));
    }

    /// Every schema submission so far, in order.
    pub fn submissions(&self) -> Vec<(String, Vec<RegistryOp>)> {
        self.state.lock().submissions.clone()
    }

    /// The operations of the most recent schema submission.
    pub fn last_submission(&self) -> Vec<RegistryOp> {
        self.state
            .lock()
            .submissions
            .last()
            .map(|(_, ops)| ops.clone())
            .unwrap_or_default()
    }

    /// Every executed query, rendered, in order.
    pub fn executed_queries(&self) -> Vec<String> {
        self.state.lock().executed.clone()
    }

    /// The value reported through [`CallBoundary::return_value`], if any.
    pub fn returned_value(&self) -> Option<JsonValue> {
        self.state.lock().returned_value.clone()
    }

    /// The message reported through [`CallBoundary::return_error`], if any.
    pub fn returned_error(&self) -> Option<String> {
        self.state.lock().returned_error.clone()
    }
}

#[async_trait]
impl SchemaRegistry for StaticEngine {
    async fn submit(&self, module: &str, ops: &[RegistryOp]) -> Result<SchemaId, EngineError> {
        let mut state = self.state.lock();
        state.submissions.push((module.to_string(), ops.to_vec()));
        Ok(SchemaId(format!("{}@{}", module, state.submissions.len())))
    }
}

#[async_trait]
impl QueryExecutor for StaticEngine {
    async fn execute(&self, selection: &Selection) -> Result<JsonValue, EngineError> {
        let rendered = selection.render();
        let mut state = self.state.lock();
        state.executed.push(rendered.clone());
        state
            .replies
            .iter()
            .find(|(needle, _)| rendered.contains(needle.as_str()))
            .map(|(_, data)| data.clone())
            .ok_or(EngineError::MissingData { query: rendered })
    }
}

#[async_trait]
impl CallBoundary for StaticEngine {
    async fn current_call(&self) -> Result<CallDescriptor, EngineError> {
        self.state
            .lock()
            .pending_calls
            .pop_front()
            .ok_or_else(|| EngineError::Transport("no invocation scripted".to_string()))
    }

    async fn return_value(&self, value: &JsonValue) -> Result<(), EngineError> {
        self.state.lock().returned_value = Some(value.clone());
        Ok(())
    }

    async fn return_error(&self, message: &str) -> Result<(), EngineError> {
        self.state.lock().returned_error = Some(message.to_string());
        Ok(())
    }
}
