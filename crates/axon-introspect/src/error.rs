//! Schema construction errors

use axon_catalog::Origin;
use thiserror::Error;

/// Errors raised while collecting declarations or resolving references.
///
/// All of these are fatal at schema-build time and are never retried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntrospectError {
    /// A referenced type name matched no declaration of any kind.
    #[error("could not resolve type reference for {name}{}", fmt_origin(.origin))]
    UnresolvedReference {
        /// The dangling type name.
        name: String,
        /// Where the referencing component was declared, when known.
        origin: Option<Origin>,
    },

    /// A referenced object exists in the catalog but is not exported.
    #[error("type {name} is used by the module but not exposed")]
    NotExposed {
        /// The referenced type name.
        name: String,
    },

    /// A capitalized primitive-wrapper name was used where a primitive
    /// belongs.
    #[error("{name} is not a supported type, please use {hint} instead")]
    BoxedPrimitive {
        /// The rejected name.
        name: String,
        /// The primitive to use instead.
        hint: &'static str,
    },

    /// An enum member was declared without a wire value.
    #[error("enum member {enum_name}.{member} has no value")]
    MissingEnumValue {
        /// The enum's name.
        enum_name: String,
        /// The offending member.
        member: String,
    },

    /// More than one constructor carries the explicit constructor mark.
    #[error("object {object} declares more than one marked constructor")]
    DuplicateConstructor {
        /// The object's name.
        object: String,
    },

    /// A parameter declares both a default value and a default path.
    #[error("argument {argument} of {owner} cannot set multiple default values")]
    MultipleDefaults {
        /// Function or constructor owning the parameter.
        owner: String,
        /// The parameter's wire name.
        argument: String,
    },

    /// A default for an enum-typed argument matched no declared member.
    #[error("could not resolve default value {value:?} for enum argument {argument}")]
    UnknownEnumDefault {
        /// The argument's wire name.
        argument: String,
        /// The unmatched default.
        value: String,
    },

    /// A declaration used a shape the schema cannot express.
    #[error("unsupported declaration shape for {name}: {detail}")]
    UnsupportedShape {
        /// The declaring member.
        name: String,
        /// Why the shape is unsupported.
        detail: String,
    },

    /// The catalog exposes no object types at all.
    #[error("no exposed object types in catalog; a module must export at least one object")]
    NoExposedObjects,
}

fn fmt_origin(origin: &Option<Origin>) -> String {
    match origin {
        Some(origin) => format!(" (declared at {})", origin),
        None => String::new(),
    }
}
