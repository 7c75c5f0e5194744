//! Axon Schema Model
//!
//! Language-agnostic description of a module's surface: objects, interfaces,
//! enums, functions, arguments and the [`TypeDef`] tree they share. The
//! structures here are pure data; equality, serialization and the
//! [`TypeDef::is_resolved`] predicate are the only behavior. Collection and
//! resolution live in `axon-introspect`; registration and dispatch live in
//! `axon-runtime`.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod component;
pub mod function;
pub mod module;
pub mod typedef;

pub use component::{
    ConstructorDef, EnumDef, EnumMemberDef, FieldDef, InterfaceDef, ObjectDef,
};
pub use function::{ArgumentDef, CachePolicy, FunctionDef};
pub use module::ModuleSchema;
pub use typedef::{TypeDef, TypeKind};
