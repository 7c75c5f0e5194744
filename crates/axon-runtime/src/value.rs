//! Runtime values
//!
//! [`Value`] is what handlers receive and return: a typed view of the
//! JSON-encoded payloads crossing the engine boundary. Remote objects come
//! in two flavors: [`ObjectState`] for instances of this module's own types,
//! carried by value, and [`ObjectHandle`] for references that stay on the
//! engine and load lazily.

use axon_client::Selection;
use rustc_hash::FxHashMap;
use serde_json::Value as JsonValue;

use crate::proxy::InterfaceProxy;

/// The stored state of a locally owned object instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectState {
    /// The declaring component's name.
    pub type_name: String,
    fields: FxHashMap<String, Value>,
}

impl ObjectState {
    /// An instance of `type_name` with no state yet.
    pub fn new(type_name: impl Into<String>) -> Self {
        ObjectState {
            type_name: type_name.into(),
            fields: FxHashMap::default(),
        }
    }

    /// Store a field by wire name.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Builder form of [`ObjectState::set`].
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set(name, value);
        self
    }

    /// Read a field by wire name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Iterate the stored fields.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are stored.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A lazy reference to an object living on the engine.
///
/// Carries the selection that reaches the object; nothing is fetched until
/// the handle's identity is actually needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectHandle {
    /// The component name of the referenced type.
    pub type_name: String,
    id: Option<String>,
    selection: Selection,
}

impl ObjectHandle {
    /// A handle with a known identity, reachable through the type's loader.
    pub fn from_id(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let id = id.into();
        let selection = Selection::new()
            .select(format!("load{}FromID", type_name))
            .arg("id", id.as_str());
        ObjectHandle {
            type_name,
            id: Some(id),
            selection,
        }
    }

    /// A handle reached through a selection chain; identity unknown until
    /// fetched.
    pub fn from_selection(type_name: impl Into<String>, selection: Selection) -> Self {
        ObjectHandle {
            type_name: type_name.into(),
            id: None,
            selection,
        }
    }

    /// The identity, when already known.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The selection chain reaching this object.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

/// A typed runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent or null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A whole number.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered list.
    List(Vec<Value>),
    /// An enum member, by declared member name.
    Enum {
        /// The declaring enum's name.
        enum_name: String,
        /// The member's declared name.
        member: String,
    },
    /// A locally owned object instance.
    Object(ObjectState),
    /// A lazy reference to an engine-side object.
    Handle(ObjectHandle),
    /// A remote implementation of one of this module's interfaces.
    Proxy(InterfaceProxy),
    /// An opaque JSON payload, passed through untouched.
    Json(JsonValue),
}

impl Value {
    /// An enum member value.
    pub fn enum_member(enum_name: impl Into<String>, member: impl Into<String>) -> Self {
        Value::Enum {
            enum_name: enum_name.into(),
            member: member.into(),
        }
    }

    /// Whether this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The float payload; integers coerce.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The list items, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The object state, if this is a locally owned instance.
    pub fn as_object(&self) -> Option<&ObjectState> {
        match self {
            Value::Object(state) => Some(state),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<ObjectState> for Value {
    fn from(v: ObjectState) -> Self {
        Value::Object(v)
    }
}

impl From<ObjectHandle> for Value {
    fn from(v: ObjectHandle) -> Self {
        Value::Handle(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_state_round_trip() {
        let state = ObjectState::new("Greeter")
            .with("greeting", Value::from("Hello"))
            .with("count", Value::from(3i64));
        assert_eq!(state.get("greeting").and_then(Value::as_str), Some("Hello"));
        assert_eq!(state.get("count").and_then(Value::as_int), Some(3));
        assert_eq!(state.get("missing"), None);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_handle_from_id_builds_loader_selection() {
        let handle = ObjectHandle::from_id("Container", "ctr-1");
        assert_eq!(handle.id(), Some("ctr-1"));
        assert_eq!(
            handle.selection().render(),
            "loadContainerFromID(id: \"ctr-1\")"
        );
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(Value::Int(2).as_float(), Some(2.0));
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::Str("x".to_string()).as_float(), None);
    }
}
