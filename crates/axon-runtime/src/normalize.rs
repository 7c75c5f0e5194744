//! Outbound conversion
//!
//! Handler results become engine-facing JSON here. Enum members render as
//! their wire values, object state becomes a plain JSON object of its
//! fields, and handles render as their identity string, fetched from the
//! engine only when the handle does not already know it.

use std::sync::Arc;

use axon_client::{EngineError, QueryExecutor};
use axon_schema::ModuleSchema;
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value as JsonValue};

use crate::error::DispatchError;
use crate::value::{ObjectHandle, Value};

/// Render a handler result back to JSON.
pub(crate) fn normalize<'a>(
    value: &'a Value,
    schema: &'a ModuleSchema,
    engine: &'a Arc<dyn QueryExecutor>,
) -> BoxFuture<'a, Result<JsonValue, DispatchError>> {
    async move {
        match value {
            Value::Null => Ok(JsonValue::Null),
            Value::Bool(b) => Ok(json!(b)),
            Value::Int(i) => Ok(json!(i)),
            Value::Float(f) => Ok(json!(f)),
            Value::Str(s) => Ok(json!(s)),
            Value::Json(raw) => Ok(raw.clone()),
            Value::Enum { enum_name, member } => {
                let def = schema
                    .enum_def(enum_name)
                    .ok_or_else(|| DispatchError::BadResult {
                        detail: format!("enum {} is not part of the schema", enum_name),
                    })?;
                let member = def.member(member).ok_or_else(|| DispatchError::BadResult {
                    detail: format!("{} has no member {}", enum_name, member),
                })?;
                Ok(json!(member.value))
            }
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(normalize(item, schema, engine).await?);
                }
                Ok(JsonValue::Array(out))
            }
            Value::Object(state) => {
                let mut map = serde_json::Map::new();
                for (name, field) in state.fields() {
                    map.insert(name.to_string(), normalize(field, schema, engine).await?);
                }
                Ok(JsonValue::Object(map))
            }
            Value::Handle(handle) => Ok(json!(materialize_id(handle, engine).await?)),
            Value::Proxy(proxy) => Ok(json!(proxy.id())),
        }
    }
    .boxed()
}

/// A handle's identity, fetched through its selection when unknown.
pub(crate) async fn materialize_id(
    handle: &ObjectHandle,
    engine: &Arc<dyn QueryExecutor>,
) -> Result<String, DispatchError> {
    if let Some(id) = handle.id() {
        return Ok(id.to_string());
    }
    let sel = handle.selection().select("id");
    let data = engine.execute(&sel).await?;
    let payload = sel.extract(&data).ok_or_else(|| {
        DispatchError::Engine(EngineError::MissingData {
            query: sel.render(),
        })
    })?;
    payload
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DispatchError::BadResult {
            detail: format!("engine returned a non-string id for {}", handle.type_name),
        })
}
