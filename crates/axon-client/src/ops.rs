//! Registry operations
//!
//! Schema registration is expressed as an ordered list of self-contained
//! operations. The registry applies them in submission order, so the planner
//! controls declaration order end to end: enums first, then interfaces, then
//! objects, each component followed immediately by its members.

use std::fmt;

use axon_schema::{ConstructorDef, EnumMemberDef, FieldDef, FunctionDef};
use serde::{Deserialize, Serialize};

/// Opaque identifier the registry hands back for an accepted schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaId(pub String);

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One step of a schema registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum RegistryOp {
    /// Set the module-level description.
    ModuleDescription {
        /// Documentation text.
        description: String,
    },
    /// Declare an enum component.
    DeclareEnum {
        /// Component name.
        name: String,
        /// Documentation text.
        description: Option<String>,
    },
    /// Append a member to a previously declared enum.
    EnumMember {
        /// The declaring enum's name.
        owner: String,
        /// The member definition.
        member: EnumMemberDef,
    },
    /// Declare an interface component.
    DeclareInterface {
        /// Component name.
        name: String,
        /// Documentation text.
        description: Option<String>,
    },
    /// Append a function to a previously declared interface.
    InterfaceFunction {
        /// The declaring interface's name.
        owner: String,
        /// The function definition.
        function: FunctionDef,
    },
    /// Declare an object component.
    DeclareObject {
        /// Component name.
        name: String,
        /// Documentation text.
        description: Option<String>,
        /// Deprecation notice, if any.
        deprecated: Option<String>,
    },
    /// Attach the constructor to a previously declared object.
    ObjectConstructor {
        /// The declaring object's name.
        owner: String,
        /// The constructor definition.
        constructor: ConstructorDef,
    },
    /// Append a field to a previously declared object.
    ObjectField {
        /// The declaring object's name.
        owner: String,
        /// The field definition.
        field: FieldDef,
    },
    /// Append a function to a previously declared object.
    ObjectFunction {
        /// The declaring object's name.
        owner: String,
        /// The function definition.
        function: FunctionDef,
    },
}

impl RegistryOp {
    /// The component this operation declares or extends, when it has one.
    pub fn component(&self) -> Option<&str> {
        match self {
            RegistryOp::ModuleDescription { .. } => None,
            RegistryOp::DeclareEnum { name, .. }
            | RegistryOp::DeclareInterface { name, .. }
            | RegistryOp::DeclareObject { name, .. } => Some(name),
            RegistryOp::EnumMember { owner, .. }
            | RegistryOp::InterfaceFunction { owner, .. }
            | RegistryOp::ObjectConstructor { owner, .. }
            | RegistryOp::ObjectField { owner, .. }
            | RegistryOp::ObjectFunction { owner, .. } => Some(owner),
        }
    }
}
