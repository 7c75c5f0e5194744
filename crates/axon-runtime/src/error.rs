//! Runtime errors
//!
//! [`DispatchError`] covers everything that can go wrong while serving one
//! invocation. [`RuntimeError`] is the top-level funnel: whatever phase
//! fails, the entrypoint reports one error to the engine and exits.

use axon_client::EngineError;
use axon_introspect::IntrospectError;
use thiserror::Error;

/// Errors raised while dispatching a single invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The invocation names an object the schema does not contain.
    #[error("unknown object type {name}")]
    UnknownObject {
        /// The requested type name.
        name: String,
    },

    /// The invocation names a function the parent does not declare.
    #[error("object {parent} has no function {function}")]
    UnknownFunction {
        /// The parent object or interface.
        parent: String,
        /// The requested wire name.
        function: String,
    },

    /// A required argument was neither sent nor defaulted.
    #[error("missing required argument {argument} for {function}")]
    MissingArgument {
        /// The function being called.
        function: String,
        /// The absent argument's wire name.
        argument: String,
    },

    /// An argument value did not decode as its declared type.
    #[error("argument {argument} could not be decoded: {detail}")]
    InvalidArgument {
        /// The argument's wire name.
        argument: String,
        /// What went wrong.
        detail: String,
    },

    /// The parent's stored state did not decode against its declaration.
    #[error("stored state of {parent} could not be decoded: {detail}")]
    InvalidState {
        /// The parent object.
        parent: String,
        /// What went wrong.
        detail: String,
    },

    /// No handler was bound for the resolved function.
    #[error("no handler bound for {component}.{function}")]
    MissingBinding {
        /// The component the call resolved to.
        component: String,
        /// The function's wire name.
        function: String,
    },

    /// An interface type had no entry in the interface registry.
    #[error("interface {name} not found in registry; it may not be registered yet")]
    UnknownInterface {
        /// The interface's local name.
        name: String,
    },

    /// A value kind the remote call syntax cannot carry.
    #[error("unsupported argument for remote interface call: {kind}")]
    UnsupportedProxyArgument {
        /// Description of the offending value.
        kind: String,
    },

    /// A handler result that cannot be rendered back to the engine.
    #[error("cannot render result: {detail}")]
    BadResult {
        /// What went wrong.
        detail: String,
    },

    /// The bound handler returned an error.
    #[error("{0:#}")]
    User(anyhow::Error),

    /// The bound handler panicked.
    #[error("function panicked: {0}")]
    Panic(String),

    /// The engine conversation itself failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Top-level failure of a runtime invocation.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Schema construction failed.
    #[error(transparent)]
    Introspect(#[from] IntrospectError),

    /// Serving the invocation failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The engine conversation failed outside dispatch.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
