//! Inbound conversion
//!
//! JSON payloads from the engine become typed [`Value`]s here, driven by the
//! resolved schema. Absent values follow the platform convention: optional
//! slots become null, required primitives take their zero value, required
//! reference-likes stay null. Object references decode to lazy handles; no
//! conversion in this module talks to the engine.

use std::sync::Arc;

use axon_client::QueryExecutor;
use axon_schema::{ArgumentDef, ModuleSchema, ObjectDef, TypeDef, TypeKind};
use serde_json::Value as JsonValue;

use crate::error::DispatchError;
use crate::proxy::InterfaceProxy;
use crate::registry;
use crate::value::{ObjectHandle, ObjectState, Value};

/// Schema-driven JSON decoder.
///
/// Cheap to clone around; the engine reference is only stashed inside the
/// proxies it creates.
#[derive(Clone)]
pub(crate) struct Decoder {
    schema: Arc<ModuleSchema>,
    engine: Arc<dyn QueryExecutor>,
}

impl Decoder {
    pub(crate) fn new(schema: Arc<ModuleSchema>, engine: Arc<dyn QueryExecutor>) -> Self {
        Decoder { schema, engine }
    }

    /// Decode one slot. `slot` names the argument or field for diagnostics.
    pub(crate) fn decode(
        &self,
        ty: &TypeDef,
        raw: &JsonValue,
        slot: &str,
    ) -> Result<Value, DispatchError> {
        if raw.is_null() {
            return Ok(absent(ty));
        }
        match &ty.kind {
            TypeKind::Void => Ok(Value::Null),
            TypeKind::Boolean => raw
                .as_bool()
                .map(Value::Bool)
                .ok_or_else(|| mismatch(slot, "boolean", raw)),
            TypeKind::Integer => raw
                .as_i64()
                .map(Value::Int)
                .ok_or_else(|| mismatch(slot, "integer", raw)),
            TypeKind::Float => raw
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| mismatch(slot, "float", raw)),
            TypeKind::String => raw
                .as_str()
                .map(|s| Value::Str(s.to_string()))
                .ok_or_else(|| mismatch(slot, "string", raw)),
            TypeKind::Scalar { .. } => Ok(Value::Json(raw.clone())),
            TypeKind::List { element } => {
                let items = raw
                    .as_array()
                    .ok_or_else(|| mismatch(slot, "list", raw))?;
                let decoded = items
                    .iter()
                    .map(|item| self.decode(element, item, slot))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::List(decoded))
            }
            TypeKind::Enum { name } => self.decode_enum(name, raw, slot),
            TypeKind::Object { name } => self.decode_object(name, raw, slot),
            TypeKind::Interface { name } => self.decode_interface(name, raw, slot),
            TypeKind::Unresolved { reference } => Err(DispatchError::InvalidArgument {
                argument: slot.to_string(),
                detail: format!("type reference {} was never resolved", reference),
            }),
        }
    }

    /// Decode one call argument with the declared presence rules: a sent
    /// value decodes as-is, an unsent one falls back to the declared default,
    /// then to null when optional, and is an error otherwise.
    pub(crate) fn decode_argument(
        &self,
        arg: &ArgumentDef,
        sent: Option<&JsonValue>,
        function: &str,
    ) -> Result<Value, DispatchError> {
        match sent {
            Some(raw) => self.decode(&arg.ty, raw, &arg.name),
            None => {
                if let Some(default) = &arg.default_value {
                    return self.decode(&arg.ty, default, &arg.name);
                }
                if arg.optional || arg.ty.optional {
                    return Ok(Value::Null);
                }
                Err(DispatchError::MissingArgument {
                    function: function.to_string(),
                    argument: arg.name.clone(),
                })
            }
        }
    }

    /// Rebuild an object's state from its JSON-encoded stored form.
    ///
    /// Constructor arguments hydrate first, then declared fields the
    /// constructor does not cover. Stored keys with no declaration are
    /// ignored; absent declared slots follow the usual absence rules.
    pub(crate) fn hydrate(
        &self,
        def: &ObjectDef,
        raw: &JsonValue,
    ) -> Result<ObjectState, DispatchError> {
        let mut state = ObjectState::new(&def.name);
        if raw.is_null() {
            return Ok(state);
        }
        let map = raw.as_object().ok_or_else(|| DispatchError::InvalidState {
            parent: def.name.clone(),
            detail: format!("expected object state, found {}", json_kind(raw)),
        })?;

        let wrap = |err: DispatchError| DispatchError::InvalidState {
            parent: def.name.clone(),
            detail: err.to_string(),
        };

        if let Some(ctor) = &def.constructor {
            for arg in &ctor.arguments {
                let raw_field = map.get(&arg.name).unwrap_or(&JsonValue::Null);
                let value = self.decode(&arg.ty, raw_field, &arg.name).map_err(wrap)?;
                state.set(&arg.name, value);
            }
        }
        for field in &def.fields {
            if def
                .constructor
                .as_ref()
                .is_some_and(|c| c.covers(&field.name))
            {
                continue;
            }
            let raw_field = map.get(&field.name).unwrap_or(&JsonValue::Null);
            let value = self.decode(&field.ty, raw_field, &field.name).map_err(wrap)?;
            state.set(&field.name, value);
        }
        Ok(state)
    }

    fn decode_enum(
        &self,
        name: &str,
        raw: &JsonValue,
        slot: &str,
    ) -> Result<Value, DispatchError> {
        let text = raw
            .as_str()
            .ok_or_else(|| mismatch(slot, "enum member", raw))?;
        let def = self
            .schema
            .enum_def(name)
            .ok_or_else(|| DispatchError::InvalidArgument {
                argument: slot.to_string(),
                detail: format!("enum {} is not part of the schema", name),
            })?;
        let member = def
            .member_for_input(text)
            .ok_or_else(|| DispatchError::InvalidArgument {
                argument: slot.to_string(),
                detail: format!("{:?} is not a member of {}", text, name),
            })?;
        Ok(Value::enum_member(name, &member.name))
    }

    fn decode_object(
        &self,
        name: &str,
        raw: &JsonValue,
        slot: &str,
    ) -> Result<Value, DispatchError> {
        if let Some(id) = identity(raw) {
            return Ok(Value::Handle(ObjectHandle::from_id(name, id)));
        }
        if raw.is_object() {
            let def = self
                .schema
                .object(name)
                .ok_or_else(|| DispatchError::UnknownObject {
                    name: name.to_string(),
                })?;
            return Ok(Value::Object(self.hydrate(def, raw)?));
        }
        Err(mismatch(slot, "object reference", raw))
    }

    fn decode_interface(
        &self,
        name: &str,
        raw: &JsonValue,
        slot: &str,
    ) -> Result<Value, DispatchError> {
        let id = identity(raw).ok_or_else(|| mismatch(slot, "interface reference", raw))?;
        let explicit = raw
            .get("typename")
            .and_then(JsonValue::as_str)
            .map(str::to_string);
        let remote = explicit
            .or_else(|| registry::registered_interface(name))
            .ok_or_else(|| DispatchError::UnknownInterface {
                name: name.to_string(),
            })?;
        Ok(Value::Proxy(InterfaceProxy::new(
            name,
            remote,
            id,
            Arc::clone(&self.schema),
            Arc::clone(&self.engine),
        )))
    }
}

/// The value an absent slot takes.
fn absent(ty: &TypeDef) -> Value {
    if ty.optional {
        return Value::Null;
    }
    match &ty.kind {
        TypeKind::Boolean => Value::Bool(false),
        TypeKind::Integer => Value::Int(0),
        TypeKind::Float => Value::Float(0.0),
        TypeKind::String => Value::Str(String::new()),
        _ => Value::Null,
    }
}

/// Extract an object identity: either a bare ID string or an `id` key.
fn identity(raw: &JsonValue) -> Option<String> {
    if let Some(id) = raw.as_str() {
        return Some(id.to_string());
    }
    raw.get("id")
        .and_then(JsonValue::as_str)
        .map(str::to_string)
}

fn mismatch(slot: &str, expected: &str, raw: &JsonValue) -> DispatchError {
    DispatchError::InvalidArgument {
        argument: slot.to_string(),
        detail: format!("expected {}, found {}", expected, json_kind(raw)),
    }
}

fn json_kind(raw: &JsonValue) -> &'static str {
    match raw {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
