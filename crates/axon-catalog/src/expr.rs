//! Declared type expressions

use std::fmt;

/// The type of a declared member, as the host program states it.
///
/// Expressions the direct classifier can place map straight onto schema
/// types; [`TypeExpr::Named`] covers everything else and is resolved against
/// the catalog's own declarations later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Boolean.
    Bool,
    /// Whole number.
    Int,
    /// Floating-point number.
    Float,
    /// UTF-8 text.
    Str,
    /// No value.
    Void,
    /// Opaque JSON payload; maps to a scalar.
    Json,
    /// Nullable wrapper around an inner expression.
    Option(Box<TypeExpr>),
    /// Ordered sequence of one element expression.
    List(Box<TypeExpr>),
    /// A reference to a declared type, by name.
    Named(String),
    /// The host cancellation token. Excluded from the schema; injected at
    /// call time through the handler context.
    Cancellation,
}

impl TypeExpr {
    /// Shorthand for `Option(inner)`.
    pub fn option(inner: TypeExpr) -> Self {
        TypeExpr::Option(Box::new(inner))
    }

    /// Shorthand for `List(element)`.
    pub fn list(element: TypeExpr) -> Self {
        TypeExpr::List(Box::new(element))
    }

    /// Shorthand for `Named(name)`.
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    /// Whether this expression is the cancellation token, looking through
    /// `Option` wrappers.
    pub fn is_cancellation(&self) -> bool {
        match self {
            TypeExpr::Cancellation => true,
            TypeExpr::Option(inner) => inner.is_cancellation(),
            _ => false,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Bool => write!(f, "bool"),
            TypeExpr::Int => write!(f, "int"),
            TypeExpr::Float => write!(f, "float"),
            TypeExpr::Str => write!(f, "string"),
            TypeExpr::Void => write!(f, "void"),
            TypeExpr::Json => write!(f, "json"),
            TypeExpr::Option(inner) => write!(f, "{}?", inner),
            TypeExpr::List(element) => write!(f, "{}[]", element),
            TypeExpr::Named(name) => write!(f, "{}", name),
            TypeExpr::Cancellation => write!(f, "cancellation"),
        }
    }
}
