//! Engine traits
//!
//! Three narrow, object-safe traits cover the whole engine conversation.
//! Production transports implement them over the session protocol; tests use
//! [`crate::testing::StaticEngine`].

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::descriptor::CallDescriptor;
use crate::error::EngineError;
use crate::ops::{RegistryOp, SchemaId};
use crate::selection::Selection;

/// Accepts schema registrations.
#[async_trait]
pub trait SchemaRegistry: Send + Sync {
    /// Apply `ops` in order as the schema of `module` and return the
    /// registry's identifier for the accepted schema.
    async fn submit(&self, module: &str, ops: &[RegistryOp]) -> Result<SchemaId, EngineError>;
}

/// Runs query selections.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute a rendered selection and return the response data. The caller
    /// extracts its payload via [`Selection::extract`].
    async fn execute(&self, selection: &Selection) -> Result<JsonValue, EngineError>;
}

/// The invocation transport: one inbound call, one outbound outcome.
#[async_trait]
pub trait CallBoundary: Send + Sync {
    /// Fetch the invocation this process was started to serve.
    async fn current_call(&self) -> Result<CallDescriptor, EngineError>;

    /// Report a successful result, JSON-encoded.
    async fn return_value(&self, value: &JsonValue) -> Result<(), EngineError>;

    /// Report a failure message.
    async fn return_error(&self, message: &str) -> Result<(), EngineError>;
}
