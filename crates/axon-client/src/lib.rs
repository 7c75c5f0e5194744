//! Axon Engine Client
//!
//! Everything the runtime says to the engine, and everything the engine says
//! back, passes through the three traits in this crate:
//!
//! - **[`CallBoundary`]**: fetch the current invocation and report its
//!   outcome.
//! - **[`SchemaRegistry`]**: submit a registration plan as an ordered list of
//!   [`RegistryOp`] values.
//! - **[`QueryExecutor`]**: run a rendered [`Selection`] against the engine's
//!   query surface.
//!
//! The traits are object-safe so the runtime can hold them behind `Arc<dyn>`
//! and tests can swap in [`testing::StaticEngine`].

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod descriptor;
pub mod engine;
pub mod error;
pub mod ops;
pub mod selection;
pub mod testing;

pub use descriptor::{CallArgument, CallDescriptor};
pub use engine::{CallBoundary, QueryExecutor, SchemaRegistry};
pub use error::EngineError;
pub use ops::{RegistryOp, SchemaId};
pub use selection::Selection;
