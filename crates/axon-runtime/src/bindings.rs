//! Handler bindings
//!
//! The dispatcher is generic machinery; [`Bindings`] is where a module
//! supplies the actual behavior. Each exposed function gets one handler,
//! keyed by component name and function wire name. Handlers are plain async
//! closures over [`Value`]; nothing here inspects user types.

use std::future::Future;
use std::sync::Arc;

use axon_client::QueryExecutor;
use futures::future::{ready, BoxFuture, FutureExt};
use rustc_hash::FxHashMap;

use crate::cancel::CancelToken;
use crate::value::Value;

/// What a handler produces. Failures surface to the engine as invocation
/// errors, with the full context chain in the message.
pub type HandlerResult = Result<Value, anyhow::Error>;

/// A bound function implementation.
///
/// Receives the call context, the hydrated parent value and the coerced
/// arguments in declaration order.
pub type Handler = Arc<dyn Fn(Ctx, Value, Vec<Value>) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Per-invocation context handed to every handler.
#[derive(Clone)]
pub struct Ctx {
    /// Engine query access, for chaining into remote objects.
    pub engine: Arc<dyn QueryExecutor>,
    /// Cooperative cancellation flag for this invocation.
    pub cancel: CancelToken,
}

/// The module's handler table.
#[derive(Default, Clone)]
pub struct Bindings {
    functions: FxHashMap<String, FxHashMap<String, Handler>>,
    constructors: FxHashMap<String, Handler>,
}

impl Bindings {
    /// An empty table.
    pub fn new() -> Self {
        Bindings::default()
    }

    /// Bind an async handler for `component.function` (function by wire
    /// name). Later bindings replace earlier ones.
    pub fn bind<F, Fut>(
        &mut self,
        component: impl Into<String>,
        function: impl Into<String>,
        handler: F,
    ) -> &mut Self
    where
        F: Fn(Ctx, Value, Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.functions
            .entry(component.into())
            .or_default()
            .insert(
                function.into(),
                Arc::new(move |ctx, parent, args| handler(ctx, parent, args).boxed()),
            );
        self
    }

    /// Bind a synchronous handler for `component.function`.
    pub fn bind_sync<F>(
        &mut self,
        component: impl Into<String>,
        function: impl Into<String>,
        handler: F,
    ) -> &mut Self
    where
        F: Fn(Ctx, Value, Vec<Value>) -> HandlerResult + Send + Sync + 'static,
    {
        self.bind(component, function, move |ctx, parent, args| {
            ready(handler(ctx, parent, args))
        })
    }

    /// Bind an async constructor for `component`. The parent value passed in
    /// is always null; the handler returns the constructed object state.
    pub fn bind_constructor<F, Fut>(&mut self, component: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(Ctx, Value, Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.constructors.insert(
            component.into(),
            Arc::new(move |ctx, parent, args| handler(ctx, parent, args).boxed()),
        );
        self
    }

    /// Bind a synchronous constructor for `component`.
    pub fn bind_constructor_sync<F>(&mut self, component: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(Ctx, Value, Vec<Value>) -> HandlerResult + Send + Sync + 'static,
    {
        self.bind_constructor(component, move |ctx, parent, args| {
            ready(handler(ctx, parent, args))
        })
    }

    /// Look up the handler for `component.function`.
    pub fn function(&self, component: &str, function: &str) -> Option<Handler> {
        self.functions.get(component)?.get(function).cloned()
    }

    /// Look up the constructor handler for `component`.
    pub fn constructor(&self, component: &str) -> Option<Handler> {
        self.constructors.get(component).cloned()
    }
}
