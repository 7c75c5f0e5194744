//! Axon Module Runtime
//!
//! Serves one engine invocation per process. A module hands over its
//! declaration [`Catalog`](axon_catalog::Catalog) and a [`Bindings`] table
//! of handlers; [`run`] (or [`serve`]) does the rest:
//!
//! - **Registration calls** build the schema through `axon-introspect` and
//!   submit it as an ordered operation stream ([`registrar`]).
//! - **Function calls** rebuild the receiver from its stored state, coerce
//!   the JSON arguments into typed [`Value`]s, invoke the bound handler and
//!   render the result back to JSON ([`Dispatcher`]).
//! - **Interface arguments** arrive as [`InterfaceProxy`] values whose
//!   methods run as engine queries against the implementing module.
//!
//! Handler failures and panics are contained at the dispatch boundary and
//! reported through the engine's error channel; the process never takes an
//! unstructured exit path.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bindings;
pub mod cancel;
pub mod config;
mod convert;
pub mod dispatch;
pub mod error;
mod normalize;
pub mod proxy;
pub mod registrar;
pub mod registry;
pub mod run;
pub mod value;

pub use bindings::{Bindings, Ctx, Handler, HandlerResult};
pub use cancel::CancelToken;
pub use config::Manifest;
pub use dispatch::Dispatcher;
pub use error::{DispatchError, RuntimeError};
pub use proxy::InterfaceProxy;
pub use registrar::{plan, register};
pub use registry::{interface_type_name, registered_interface};
pub use run::{run, serve, serve_with_cancel, EngineHandles, MANIFEST_FILE};
pub use value::{ObjectHandle, ObjectState, Value};
