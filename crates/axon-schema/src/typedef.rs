//! Type descriptions
//!
//! [`TypeDef`] is the wire-level description of a value's shape. During
//! collection a slot whose type cannot be classified yet is carried as
//! [`TypeKind::Unresolved`]; the resolver rewrites those in place before a
//! schema is registered or dispatched against.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of value a [`TypeDef`] describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeKind {
    /// No value.
    Void,
    /// True / false.
    Boolean,
    /// Whole number.
    Integer,
    /// Floating-point number.
    Float,
    /// UTF-8 text.
    String,
    /// Opaque named scalar; the payload is carried as raw JSON.
    Scalar {
        /// Scalar type name.
        name: String,
    },
    /// Ordered sequence of a single element type.
    List {
        /// Element type.
        element: Box<TypeDef>,
    },
    /// A declared enum, by name.
    Enum {
        /// Enum component name.
        name: String,
    },
    /// A declared object, by name.
    Object {
        /// Object component name.
        name: String,
    },
    /// A declared interface, by name.
    Interface {
        /// Interface component name.
        name: String,
    },
    /// Placeholder for a type name that has not been classified yet.
    ///
    /// Only present between collection and resolution. Registration and
    /// dispatch never observe this kind.
    Unresolved {
        /// The referenced type name.
        reference: String,
    },
}

/// A value's shape plus whether the value may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// What kind of value this is.
    #[serde(flatten)]
    pub kind: TypeKind,
    /// Whether the value may be absent or null.
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
}

fn is_false(v: &bool) -> bool {
    !v
}

impl TypeDef {
    /// Create a required type of the given kind.
    pub fn new(kind: TypeKind) -> Self {
        TypeDef {
            kind,
            optional: false,
        }
    }

    /// The `void` type. Void results are always treated as optional.
    pub fn void() -> Self {
        TypeDef {
            kind: TypeKind::Void,
            optional: true,
        }
    }

    /// The `boolean` type.
    pub fn boolean() -> Self {
        TypeDef::new(TypeKind::Boolean)
    }

    /// The `integer` type.
    pub fn integer() -> Self {
        TypeDef::new(TypeKind::Integer)
    }

    /// The `float` type.
    pub fn float() -> Self {
        TypeDef::new(TypeKind::Float)
    }

    /// The `string` type.
    pub fn string() -> Self {
        TypeDef::new(TypeKind::String)
    }

    /// A named scalar type.
    pub fn scalar(name: impl Into<String>) -> Self {
        TypeDef::new(TypeKind::Scalar { name: name.into() })
    }

    /// A list of `element`.
    pub fn list(element: TypeDef) -> Self {
        TypeDef::new(TypeKind::List {
            element: Box::new(element),
        })
    }

    /// A declared enum type.
    pub fn enum_named(name: impl Into<String>) -> Self {
        TypeDef::new(TypeKind::Enum { name: name.into() })
    }

    /// A declared object type.
    pub fn object(name: impl Into<String>) -> Self {
        TypeDef::new(TypeKind::Object { name: name.into() })
    }

    /// A declared interface type.
    pub fn interface(name: impl Into<String>) -> Self {
        TypeDef::new(TypeKind::Interface { name: name.into() })
    }

    /// An unresolved reference to `name`.
    pub fn unresolved(name: impl Into<String>) -> Self {
        TypeDef::new(TypeKind::Unresolved {
            reference: name.into(),
        })
    }

    /// Set the optional flag.
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Whether this type is fully resolved.
    ///
    /// True for every kind except [`TypeKind::Unresolved`] and a
    /// [`TypeKind::List`] whose element is itself unresolved, checked
    /// recursively. The rest of the system uses this single predicate to
    /// decide whether a reference must still be retained.
    pub fn is_resolved(&self) -> bool {
        match &self.kind {
            TypeKind::Unresolved { .. } => false,
            TypeKind::List { element } => element.is_resolved(),
            _ => true,
        }
    }

    /// The reference name, if this slot (or the innermost list element) is
    /// still unresolved.
    pub fn pending_reference(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Unresolved { reference } => Some(reference),
            TypeKind::List { element } => element.pending_reference(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Void => write!(f, "void"),
            TypeKind::Boolean => write!(f, "boolean"),
            TypeKind::Integer => write!(f, "integer"),
            TypeKind::Float => write!(f, "float"),
            TypeKind::String => write!(f, "string"),
            TypeKind::Scalar { name } => write!(f, "{}", name),
            TypeKind::List { element } => write!(f, "{}[]", element),
            TypeKind::Enum { name } => write!(f, "{}", name),
            TypeKind::Object { name } => write!(f, "{}", name),
            TypeKind::Interface { name } => write!(f, "{}", name),
            TypeKind::Unresolved { reference } => write!(f, "{}", reference),
        }
    }
}
