//! Axon Declaration Catalog
//!
//! The catalog is the runtime's only view of the host program: an explicit,
//! queryable enumeration of module-visible types and their members. Host
//! programs populate it by hand or through generated code; nothing in here
//! inspects the host language. The metadata collector in `axon-introspect`
//! consumes it.
//!
//! # Example
//!
//! ```
//! use axon_catalog::{Catalog, FunctionDecl, ObjectDecl, ParamDecl, TypeExpr};
//!
//! let mut catalog = Catalog::new("greeter");
//! catalog.add_object(
//!     ObjectDecl::new("Greeter").function(
//!         FunctionDecl::new("hello", TypeExpr::Str)
//!             .param(ParamDecl::new("name", TypeExpr::Str)),
//!     ),
//! );
//! assert!(catalog.object("Greeter").is_some());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod catalog;
pub mod decl;
pub mod expr;

pub use catalog::Catalog;
pub use decl::{
    AliasDecl, AliasKind, CacheDecl, ConstructorDecl, EnumDecl, EnumMemberDecl, FieldDecl,
    FunctionDecl, InterfaceDecl, ObjectDecl, Origin, ParamDecl,
};
pub use expr::TypeExpr;
