//! Invocation dispatch
//!
//! One [`Dispatcher::dispatch`] call serves one engine invocation: locate
//! the parent type, rebuild or construct its state, coerce the declared
//! arguments, run the bound handler, and render the result. Handler
//! failures and panics are caught here and become dispatch errors; nothing
//! a handler does can take down the serving loop uncaught.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axon_client::{CallDescriptor, QueryExecutor};
use axon_schema::{ArgumentDef, ModuleSchema, ObjectDef, TypeKind};
use futures::FutureExt;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::bindings::{Bindings, Ctx, Handler};
use crate::cancel::CancelToken;
use crate::convert::Decoder;
use crate::error::DispatchError;
use crate::normalize::normalize;
use crate::registry;
use crate::value::{ObjectState, Value};

/// Serves invocations against one resolved schema and handler table.
#[derive(Clone)]
pub struct Dispatcher {
    schema: Arc<ModuleSchema>,
    bindings: Arc<Bindings>,
    engine: Arc<dyn QueryExecutor>,
}

impl Dispatcher {
    /// Create a dispatcher over the given schema and bindings.
    pub fn new(
        schema: Arc<ModuleSchema>,
        bindings: Arc<Bindings>,
        engine: Arc<dyn QueryExecutor>,
    ) -> Self {
        Dispatcher {
            schema,
            bindings,
            engine,
        }
    }

    /// Serve one invocation and return the JSON-encoded result.
    pub async fn dispatch(
        &self,
        call: &CallDescriptor,
        cancel: CancelToken,
    ) -> Result<JsonValue, DispatchError> {
        // Invocation and registration usually run in different processes;
        // make sure interface lookups work either way.
        registry::populate(&self.schema);

        let object = self
            .schema
            .object(&call.parent_name)
            .ok_or_else(|| DispatchError::UnknownObject {
                name: call.parent_name.clone(),
            })?;
        let decoder = Decoder::new(Arc::clone(&self.schema), Arc::clone(&self.engine));
        let ctx = Ctx {
            engine: Arc::clone(&self.engine),
            cancel,
        };

        if call.is_constructor() {
            debug!("constructing {}", object.name);
            return self.construct(object, call, &decoder, ctx).await;
        }

        let func = object
            .function(&call.function_name)
            .ok_or_else(|| DispatchError::UnknownFunction {
                parent: object.name.clone(),
                function: call.function_name.clone(),
            })?;
        debug!("dispatching {}.{}", object.name, func.name);

        let parent = self
            .hydrate_parent(object, call, &decoder, ctx.clone())
            .await?;
        let args = coerce(&func.arguments, call, &decoder, &func.name)?;
        let handler = self
            .bindings
            .function(&object.name, &func.name)
            .ok_or_else(|| DispatchError::MissingBinding {
                component: object.name.clone(),
                function: func.name.clone(),
            })?;

        let result = invoke_handler(handler, ctx, parent, args).await?;
        normalize(&result, &self.schema, &self.engine).await
    }

    /// Serve a constructor call. With no bound constructor, the default
    /// behavior stores each coerced argument under its wire name.
    async fn construct(
        &self,
        object: &ObjectDef,
        call: &CallDescriptor,
        decoder: &Decoder,
        ctx: Ctx,
    ) -> Result<JsonValue, DispatchError> {
        let declared = object
            .constructor
            .as_ref()
            .map(|c| c.arguments.as_slice())
            .unwrap_or(&[]);
        let args = coerce(declared, call, decoder, "constructor")?;

        if let Some(handler) = self.bindings.constructor(&object.name) {
            let result = invoke_handler(handler, ctx, Value::Null, args).await?;
            return normalize(&result, &self.schema, &self.engine).await;
        }

        let mut state = ObjectState::new(&object.name);
        for (arg, value) in declared.iter().zip(args) {
            state.set(&arg.name, value);
        }
        normalize(&Value::Object(state), &self.schema, &self.engine).await
    }

    /// Rebuild the receiver for a method call.
    ///
    /// With a bound constructor and declared constructor parameters, the
    /// stored state is fed back through the constructor and the remaining
    /// declared fields are overlaid on its result, so computed construction
    /// state survives the round trip. Otherwise the stored state hydrates
    /// directly.
    async fn hydrate_parent(
        &self,
        object: &ObjectDef,
        call: &CallDescriptor,
        decoder: &Decoder,
        ctx: Ctx,
    ) -> Result<Value, DispatchError> {
        if let Some(handler) = self.bindings.constructor(&object.name) {
            let params = object
                .constructor
                .as_ref()
                .map(|c| c.arguments.as_slice())
                .unwrap_or(&[]);
            if !params.is_empty() {
                let mut args = Vec::with_capacity(params.len());
                for arg in params {
                    let raw = call.parent_state.get(&arg.name).unwrap_or(&JsonValue::Null);
                    args.push(decoder.decode(&arg.ty, raw, &arg.name)?);
                }
                let constructed = invoke_handler(handler, ctx, Value::Null, args).await?;
                let mut state = match constructed {
                    Value::Object(state) => state,
                    _ => {
                        return Err(DispatchError::InvalidState {
                            parent: object.name.clone(),
                            detail: "constructor returned a non-object value".to_string(),
                        })
                    }
                };
                let covered = object.constructor.as_ref();
                for field in &object.fields {
                    if covered.is_some_and(|c| c.covers(&field.name)) {
                        continue;
                    }
                    if let Some(raw) = call.parent_state.get(&field.name) {
                        state.set(&field.name, decoder.decode(&field.ty, raw, &field.name)?);
                    }
                }
                return Ok(Value::Object(state));
            }
        }
        Ok(Value::Object(decoder.hydrate(object, &call.parent_state)?))
    }
}

/// Coerce every declared argument from the call payload, in declaration
/// order.
fn coerce(
    declared: &[ArgumentDef],
    call: &CallDescriptor,
    decoder: &Decoder,
    function: &str,
) -> Result<Vec<Value>, DispatchError> {
    declared
        .iter()
        .map(|arg| {
            if arg.variadic {
                collect_variadic(arg, call, decoder)
            } else {
                decoder.decode_argument(arg, call.argument(&arg.name), function)
            }
        })
        .collect()
}

/// A variadic argument arrives either as one list under its own name or
/// expanded into `name0`, `name1`, and so on. Either way the handler sees a
/// single list, possibly empty.
fn collect_variadic(
    arg: &ArgumentDef,
    call: &CallDescriptor,
    decoder: &Decoder,
) -> Result<Value, DispatchError> {
    if let Some(raw) = call.argument(&arg.name) {
        return decoder.decode(&arg.ty, raw, &arg.name);
    }

    let element = match &arg.ty.kind {
        TypeKind::List { element } => element.as_ref(),
        _ => &arg.ty,
    };
    let mut items = Vec::new();
    for index in 0.. {
        match call.argument(&format!("{}{}", arg.name, index)) {
            Some(raw) => items.push(decoder.decode(element, raw, &arg.name)?),
            None => break,
        }
    }
    Ok(Value::List(items))
}

async fn invoke_handler(
    handler: Handler,
    ctx: Ctx,
    parent: Value,
    args: Vec<Value>,
) -> Result<Value, DispatchError> {
    // Handlers bound through the sync adapters run while the future is
    // being built, so catch panics on both sides of the await point.
    let future = std::panic::catch_unwind(AssertUnwindSafe(|| handler(ctx, parent, args)))
        .map_err(|payload| DispatchError::Panic(panic_message(payload)))?;
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(DispatchError::User(err)),
        Err(payload) => Err(DispatchError::Panic(panic_message(payload))),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return message.to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "unknown panic".to_string()
}
