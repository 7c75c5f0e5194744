//! Function and argument definitions

use serde::{Deserialize, Serialize};

use crate::typedef::TypeDef;

/// How the engine may cache a function's results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "camelCase")]
pub enum CachePolicy {
    /// Results are never cached.
    Never,
    /// Results are cached for the lifetime of the session.
    PerSession,
    /// Engine default caching with an explicit time-to-live.
    Default {
        /// Time-to-live, as an engine-interpreted duration string.
        ttl: String,
    },
}

/// A single declared function argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentDef {
    /// Wire name of the argument.
    pub name: String,
    /// Documentation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: TypeDef,
    /// Whether the argument may be omitted. True when the declaration is
    /// nullable, carries a default, or is variadic.
    #[serde(default)]
    pub optional: bool,
    /// Pre-resolved default literal, independent of any host-language
    /// default mechanism.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    /// Directory-loading hint; opaque to the runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_path: Option<String>,
    /// Directory-loading ignore patterns; opaque to the runtime.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_patterns: Vec<String>,
    /// Deprecation notice, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    /// Whether the argument collects a variable number of values.
    #[serde(default)]
    pub variadic: bool,
}

impl ArgumentDef {
    /// Create a required argument of the given type.
    pub fn new(name: impl Into<String>, ty: TypeDef) -> Self {
        ArgumentDef {
            name: name.into(),
            description: None,
            ty,
            optional: false,
            default_value: None,
            default_path: None,
            ignore_patterns: Vec::new(),
            deprecated: None,
            variadic: false,
        }
    }
}

/// A declared function: name, signature and engine-facing metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDef {
    /// Wire name of the function.
    pub name: String,
    /// Documentation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Deprecation notice, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    /// Caching behavior requested from the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_policy: Option<CachePolicy>,
    /// Declared return type.
    pub return_type: TypeDef,
    /// Declared arguments, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentDef>,
}

impl FunctionDef {
    /// Create a function with no arguments.
    pub fn new(name: impl Into<String>, return_type: TypeDef) -> Self {
        FunctionDef {
            name: name.into(),
            description: None,
            deprecated: None,
            cache_policy: None,
            return_type,
            arguments: Vec::new(),
        }
    }

    /// Append an argument, preserving declaration order.
    pub fn with_argument(mut self, arg: ArgumentDef) -> Self {
        self.arguments.push(arg);
        self
    }

    /// Look up an argument by wire name.
    pub fn argument(&self, name: &str) -> Option<&ArgumentDef> {
        self.arguments.iter().find(|a| a.name == name)
    }
}
