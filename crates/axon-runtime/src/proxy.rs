//! Interface proxies
//!
//! When a handler receives one of the module's interface types, the actual
//! implementation lives in some other module on the engine. The proxy turns
//! method calls into loader queries against the implementation's registered
//! type name. Only value kinds the query syntax can carry are marshalled;
//! everything else is rejected up front.

use std::fmt;
use std::sync::Arc;

use axon_client::{EngineError, QueryExecutor, Selection};
use axon_schema::{ModuleSchema, TypeKind};
use serde_json::Value as JsonValue;

use crate::convert::Decoder;
use crate::error::DispatchError;
use crate::value::{ObjectHandle, Value};

/// A remote implementation of one of this module's interfaces.
#[derive(Clone)]
pub struct InterfaceProxy {
    local_name: String,
    remote_type: String,
    id: String,
    schema: Arc<ModuleSchema>,
    engine: Arc<dyn QueryExecutor>,
}

impl InterfaceProxy {
    pub(crate) fn new(
        local_name: impl Into<String>,
        remote_type: impl Into<String>,
        id: impl Into<String>,
        schema: Arc<ModuleSchema>,
        engine: Arc<dyn QueryExecutor>,
    ) -> Self {
        InterfaceProxy {
            local_name: local_name.into(),
            remote_type: remote_type.into(),
            id: id.into(),
            schema,
            engine,
        }
    }

    /// The interface's name in this module's schema.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// The implementation's registered type name on the engine.
    pub fn remote_type(&self) -> &str {
        &self.remote_type
    }

    /// The implementation's identity.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Call an interface method on the remote implementation.
    ///
    /// `method` is the wire name; `args` are named argument values. Asking
    /// for `id` with no arguments answers from the stored identity without
    /// touching the engine. Methods returning an object produce a chainable
    /// [`ObjectHandle`] and defer execution; every other return type runs
    /// the query immediately.
    pub async fn invoke(
        &self,
        method: &str,
        args: &[(&str, Value)],
    ) -> Result<Value, DispatchError> {
        if method == "id" && args.is_empty() {
            return Ok(Value::Str(self.id.clone()));
        }

        let def = self
            .schema
            .interface(&self.local_name)
            .ok_or_else(|| DispatchError::UnknownInterface {
                name: self.local_name.clone(),
            })?;
        let func = def
            .function(method)
            .ok_or_else(|| DispatchError::UnknownFunction {
                parent: self.local_name.clone(),
                function: method.to_string(),
            })?;

        let mut sel = Selection::new()
            .select(format!("load{}FromID", self.remote_type))
            .arg("id", self.id.as_str())
            .select(method);
        for (name, value) in args {
            sel = self.marshal(sel, name, value)?;
        }

        match &func.return_type.kind {
            TypeKind::Object { name } => {
                Ok(Value::Handle(ObjectHandle::from_selection(name, sel)))
            }
            TypeKind::Void => {
                self.engine.execute(&sel).await?;
                Ok(Value::Null)
            }
            _ => {
                let data = self.engine.execute(&sel).await?;
                let payload = sel.extract(&data).ok_or_else(|| {
                    DispatchError::Engine(EngineError::MissingData {
                        query: sel.render(),
                    })
                })?;
                let decoder = Decoder::new(Arc::clone(&self.schema), Arc::clone(&self.engine));
                decoder.decode(&func.return_type, &payload, method)
            }
        }
    }

    fn marshal(
        &self,
        sel: Selection,
        name: &str,
        value: &Value,
    ) -> Result<Selection, DispatchError> {
        match value {
            Value::Null => Ok(sel.arg(name, JsonValue::Null)),
            Value::Bool(b) => Ok(sel.arg(name, *b)),
            Value::Int(i) => Ok(sel.arg(name, *i)),
            Value::Float(f) => Ok(sel.arg(name, *f)),
            Value::Str(s) => Ok(sel.arg(name, s.as_str())),
            Value::Enum { enum_name, member } => {
                let wire = self
                    .schema
                    .enum_def(enum_name)
                    .and_then(|d| d.member(member))
                    .map(|m| m.value.clone())
                    .ok_or_else(|| DispatchError::InvalidArgument {
                        argument: name.to_string(),
                        detail: format!("{} has no member {}", enum_name, member),
                    })?;
                Ok(sel.arg_enum(name, wire))
            }
            Value::Handle(handle) => match handle.id() {
                Some(id) => Ok(sel.arg(name, id)),
                None => Err(DispatchError::UnsupportedProxyArgument {
                    kind: "an object handle without identity".to_string(),
                }),
            },
            Value::Proxy(proxy) => Ok(sel.arg(name, proxy.id())),
            Value::Object(state) => Err(DispatchError::UnsupportedProxyArgument {
                kind: format!("local {} state", state.type_name),
            }),
            Value::List(_) => Err(DispatchError::UnsupportedProxyArgument {
                kind: "lists".to_string(),
            }),
            Value::Json(_) => Err(DispatchError::UnsupportedProxyArgument {
                kind: "raw JSON payloads".to_string(),
            }),
        }
    }
}

impl fmt::Debug for InterfaceProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceProxy")
            .field("local_name", &self.local_name)
            .field("remote_type", &self.remote_type)
            .field("id", &self.id)
            .finish()
    }
}

impl PartialEq for InterfaceProxy {
    fn eq(&self, other: &Self) -> bool {
        self.local_name == other.local_name
            && self.remote_type == other.remote_type
            && self.id == other.id
    }
}
