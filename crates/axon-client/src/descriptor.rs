//! Call descriptors
//!
//! What the engine tells the runtime about the current invocation. An empty
//! parent name means the engine wants the module registered rather than
//! called; an empty function name on a real parent means the constructor.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One named argument of the current invocation, JSON-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallArgument {
    /// Wire name of the argument.
    pub name: String,
    /// JSON-encoded value.
    pub value: JsonValue,
}

impl CallArgument {
    /// Create a named argument.
    pub fn new(name: impl Into<String>, value: JsonValue) -> Self {
        CallArgument {
            name: name.into(),
            value,
        }
    }
}

/// The engine's description of the invocation being served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallDescriptor {
    /// Name of the object type being called, or empty for registration.
    #[serde(default)]
    pub parent_name: String,
    /// Wire name of the function being called, or empty for the constructor.
    #[serde(default)]
    pub function_name: String,
    /// JSON-encoded stored state of the parent object, or null.
    #[serde(default)]
    pub parent_state: JsonValue,
    /// JSON-encoded invocation arguments.
    #[serde(default)]
    pub arguments: Vec<CallArgument>,
}

impl CallDescriptor {
    /// A registration request.
    pub fn registration() -> Self {
        CallDescriptor {
            parent_name: String::new(),
            function_name: String::new(),
            parent_state: JsonValue::Null,
            arguments: Vec::new(),
        }
    }

    /// An invocation of `function` on `parent`.
    pub fn invocation(parent: impl Into<String>, function: impl Into<String>) -> Self {
        CallDescriptor {
            parent_name: parent.into(),
            function_name: function.into(),
            parent_state: JsonValue::Null,
            arguments: Vec::new(),
        }
    }

    /// Attach the parent's stored state.
    pub fn with_state(mut self, state: JsonValue) -> Self {
        self.parent_state = state;
        self
    }

    /// Append an argument.
    pub fn with_argument(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.arguments.push(CallArgument::new(name, value));
        self
    }

    /// Whether the engine asked for registration instead of a call.
    pub fn is_registration(&self) -> bool {
        self.parent_name.is_empty()
    }

    /// Whether the call targets the parent's constructor.
    pub fn is_constructor(&self) -> bool {
        self.function_name.is_empty()
    }

    /// Look up an argument value by wire name.
    pub fn argument(&self, name: &str) -> Option<&JsonValue> {
        self.arguments
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }
}
