//! Component definitions: objects, interfaces and enums

use serde::{Deserialize, Serialize};

use crate::function::{ArgumentDef, FunctionDef};
use crate::typedef::TypeDef;

/// A declared object field exposed through the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    /// Wire name of the field.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: TypeDef,
    /// Documentation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Deprecation notice, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

impl FieldDef {
    /// Create a field definition.
    pub fn new(name: impl Into<String>, ty: TypeDef) -> Self {
        FieldDef {
            name: name.into(),
            ty,
            description: None,
            deprecated: None,
        }
    }
}

/// A collected constructor: its ordered argument list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstructorDef {
    /// Constructor arguments, in declaration order.
    pub arguments: Vec<ArgumentDef>,
}

impl ConstructorDef {
    /// Create a constructor from its arguments.
    pub fn new(arguments: Vec<ArgumentDef>) -> Self {
        ConstructorDef { arguments }
    }

    /// Whether `name` is one of the constructor's argument names.
    pub fn covers(&self, name: &str) -> bool {
        self.arguments.iter().any(|a| a.name == name)
    }
}

/// A declared object component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDef {
    /// Component name, taken verbatim from the declaration.
    pub name: String,
    /// Documentation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Deprecation notice, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    /// Collected constructor, when the declaration has one with parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<ConstructorDef>,
    /// Exposed functions, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionDef>,
    /// Exposed fields, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDef>,
}

impl ObjectDef {
    /// Create an empty object definition.
    pub fn new(name: impl Into<String>) -> Self {
        ObjectDef {
            name: name.into(),
            description: None,
            deprecated: None,
            constructor: None,
            functions: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Look up a function by wire name.
    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Look up a field by wire name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A declared interface component.
///
/// Interfaces carry functions only. Field-like members are dropped during
/// collection; the registry has no representation for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDef {
    /// Component name, taken verbatim from the declaration.
    pub name: String,
    /// Documentation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared functions, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionDef>,
}

impl InterfaceDef {
    /// Create an empty interface definition.
    pub fn new(name: impl Into<String>) -> Self {
        InterfaceDef {
            name: name.into(),
            description: None,
            functions: Vec::new(),
        }
    }

    /// Look up a function by wire name.
    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// One declared enum member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumMemberDef {
    /// Member identifier.
    pub name: String,
    /// Wire value the member serializes to.
    pub value: String,
    /// Documentation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Deprecation notice, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

impl EnumMemberDef {
    /// Create a member with the given identifier and wire value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        EnumMemberDef {
            name: name.into(),
            value: value.into(),
            description: None,
            deprecated: None,
        }
    }
}

/// A declared enum component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    /// Component name, taken verbatim from the declaration.
    pub name: String,
    /// Documentation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Members in declaration order.
    pub members: Vec<EnumMemberDef>,
}

impl EnumDef {
    /// Create an empty enum definition.
    pub fn new(name: impl Into<String>) -> Self {
        EnumDef {
            name: name.into(),
            description: None,
            members: Vec::new(),
        }
    }

    /// Find a member whose name matches `input` case-insensitively, falling
    /// back to an exact wire-value match.
    pub fn member_for_input(&self, input: &str) -> Option<&EnumMemberDef> {
        self.members
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(input))
            .or_else(|| self.members.iter().find(|m| m.value == input))
    }

    /// Look up a member by exact name.
    pub fn member(&self, name: &str) -> Option<&EnumMemberDef> {
        self.members.iter().find(|m| m.name == name)
    }
}
