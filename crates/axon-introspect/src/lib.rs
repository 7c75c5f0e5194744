//! Axon Introspection
//!
//! Turns a declaration catalog into a fully resolved module schema in two
//! passes:
//!
//! - **Collection** ([`collect`]): walk every exposed declaration, classify
//!   member types directly where possible and leave unresolved references
//!   where not.
//! - **Resolution** ([`resolve`]): fixed-point worklist over the outstanding
//!   reference names, pulling in referenced declarations (including type
//!   aliases promoted to synthetic objects), then propagating resolved types
//!   back into every pending slot.
//!
//! [`introspect`] runs both passes. Any leftover reference is a hard error;
//! there is no fallback to an "unknown" type.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod collect;
pub mod error;
pub mod names;
pub mod resolve;

pub use collect::collect;
pub use error::IntrospectError;
pub use names::wire_name;
pub use resolve::resolve;

use axon_catalog::Catalog;
use axon_schema::ModuleSchema;

/// Collect and resolve in one step.
pub fn introspect(catalog: &Catalog) -> Result<ModuleSchema, IntrospectError> {
    let schema = collect(catalog)?;
    resolve(catalog, schema)
}
