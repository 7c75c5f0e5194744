//! Invocation entry points
//!
//! One process serves one engine call: fetch the call descriptor, build the
//! schema, then either register it or dispatch the requested function.
//! Exactly one outcome goes back over the boundary, a value on success or a
//! message through the error channel, and the error also propagates to the
//! caller so the process can exit non-zero.

use std::sync::Arc;

use axon_catalog::Catalog;
use axon_client::{CallBoundary, CallDescriptor, QueryExecutor, SchemaRegistry};
use axon_introspect::introspect;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::bindings::Bindings;
use crate::cancel::CancelToken;
use crate::config::Manifest;
use crate::dispatch::Dispatcher;
use crate::error::RuntimeError;
use crate::registrar::register;

/// Manifest file name looked up next to the module entry point.
pub const MANIFEST_FILE: &str = "axon.json";

/// The engine connections a serving process needs.
#[derive(Clone)]
pub struct EngineHandles {
    /// Invocation transport.
    pub boundary: Arc<dyn CallBoundary>,
    /// Schema registration target.
    pub registry: Arc<dyn SchemaRegistry>,
    /// Query execution for handles and proxies.
    pub executor: Arc<dyn QueryExecutor>,
}

/// Full module entry point: apply `axon.json` overrides, then serve the
/// current call.
pub async fn run(
    mut catalog: Catalog,
    bindings: Bindings,
    handles: &EngineHandles,
) -> Result<(), RuntimeError> {
    Manifest::load(MANIFEST_FILE).apply(&mut catalog);
    serve(&catalog, bindings, handles).await
}

/// Serve the current call with a fresh cancellation token.
pub async fn serve(
    catalog: &Catalog,
    bindings: Bindings,
    handles: &EngineHandles,
) -> Result<(), RuntimeError> {
    serve_with_cancel(catalog, bindings, handles, CancelToken::new()).await
}

/// Serve the current call. The token is handed to the invoked handler;
/// hosts wiring shutdown signals cancel it from outside.
pub async fn serve_with_cancel(
    catalog: &Catalog,
    bindings: Bindings,
    handles: &EngineHandles,
    cancel: CancelToken,
) -> Result<(), RuntimeError> {
    let call = handles
        .boundary
        .current_call()
        .await
        .map_err(RuntimeError::Engine)?;

    match drive(catalog, bindings, handles, &call, cancel).await {
        Ok(value) => {
            handles
                .boundary
                .return_value(&value)
                .await
                .map_err(RuntimeError::Engine)?;
            Ok(())
        }
        Err(err) => {
            // Best effort: the original error is what the caller needs to
            // see even if the engine is also unreachable.
            if let Err(report) = handles.boundary.return_error(&err.to_string()).await {
                warn!("failed to report invocation error: {}", report);
            }
            Err(err)
        }
    }
}

async fn drive(
    catalog: &Catalog,
    bindings: Bindings,
    handles: &EngineHandles,
    call: &CallDescriptor,
    cancel: CancelToken,
) -> Result<JsonValue, RuntimeError> {
    let schema = Arc::new(introspect(catalog)?);

    if call.is_registration() {
        info!("registering module {:?}", schema.name);
        let id = register(&schema, handles.registry.as_ref()).await?;
        return Ok(JsonValue::String(id.0));
    }

    info!(
        "serving {}.{}",
        call.parent_name,
        if call.is_constructor() {
            "<constructor>"
        } else {
            &call.function_name
        }
    );
    let dispatcher = Dispatcher::new(schema, Arc::new(bindings), Arc::clone(&handles.executor));
    Ok(dispatcher.dispatch(call, cancel).await?)
}
