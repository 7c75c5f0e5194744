//! Shared fixtures for the end-to-end scenarios
//!
//! The demo module declares one of everything the runtime serves: an object
//! with a defaulted constructor, an interface consumed through proxies, and
//! an enum with wire values distinct from member names.

use std::sync::{Arc, Once};

use axon_catalog::{
    Catalog, ConstructorDecl, EnumDecl, EnumMemberDecl, FieldDecl, FunctionDecl, InterfaceDecl,
    ObjectDecl, ParamDecl, TypeExpr,
};
use axon_client::testing::StaticEngine;
use axon_client::CallDescriptor;
use axon_runtime::{serve, Bindings, EngineHandles, RuntimeError, Value};
use serde_json::{json, Value as JsonValue};
use tracing_subscriber::EnvFilter;

static LOG: Once = Once::new();

/// A scripted engine and the handle bundle pointing at it.
pub fn static_engine() -> (Arc<StaticEngine>, EngineHandles) {
    LOG.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
    let engine = Arc::new(StaticEngine::new());
    let handles = EngineHandles {
        boundary: engine.clone(),
        registry: engine.clone(),
        executor: engine.clone(),
    };
    (engine, handles)
}

/// The demo module declaration catalog.
pub fn demo_catalog() -> Catalog {
    let mut catalog = Catalog::new("demo");
    catalog.describe("End-to-end demo module");
    catalog.add_enum(
        EnumDecl::new("Severity")
            .member(EnumMemberDecl::new("Low", "SEV_LOW"))
            .member(EnumMemberDecl::new("High", "SEV_HIGH")),
    );
    catalog.add_interface(
        InterfaceDecl::new("Notifier").function(
            FunctionDecl::new("notify", TypeExpr::Str)
                .param(ParamDecl::new("message", TypeExpr::Str)),
        ),
    );
    catalog.add_object(
        ObjectDecl::new("Greeter")
            .constructor(
                ConstructorDecl::new()
                    .param(ParamDecl::new("greeting", TypeExpr::Str).default_value(json!("Hello"))),
            )
            .field(FieldDecl::new("greeting", TypeExpr::Str))
            .function(
                FunctionDecl::new("hello", TypeExpr::Str)
                    .param(ParamDecl::new("name", TypeExpr::Str))
                    .param(ParamDecl::new(
                        "punctuation",
                        TypeExpr::Option(Box::new(TypeExpr::Str)),
                    )),
            )
            .function(
                FunctionDecl::new("rate", TypeExpr::Named("Severity".into())).param(
                    ParamDecl::new("severity", TypeExpr::Named("Severity".into()))
                        .default_value(json!("SEV_LOW")),
                ),
            )
            .function(
                FunctionDecl::new("shout_all", TypeExpr::Str)
                    .param(ParamDecl::new("names", TypeExpr::Str).variadic()),
            )
            .function(
                FunctionDecl::new("deliver", TypeExpr::Str)
                    .param(ParamDecl::new("notifier", TypeExpr::Named("Notifier".into()))),
            )
            .function(
                FunctionDecl::new("inspect", TypeExpr::Str)
                    .param(ParamDecl::new("notifier", TypeExpr::Named("Notifier".into()))),
            ),
    );
    catalog
}

/// Handlers for every demo function.
pub fn demo_bindings() -> Bindings {
    let mut bindings = Bindings::new();

    bindings.bind_sync("Greeter", "hello", |_ctx, parent, args| {
        let greeting = parent
            .as_object()
            .and_then(|state| state.get("greeting"))
            .and_then(Value::as_str)
            .unwrap_or("Hello");
        let name = args[0].as_str().unwrap_or("world");
        let punctuation = args[1].as_str().unwrap_or("!");
        Ok(Value::from(format!("{}, {}{}", greeting, name, punctuation)))
    });

    bindings.bind_sync("Greeter", "rate", |_ctx, _parent, args| {
        Ok(args[0].clone())
    });

    bindings.bind_sync("Greeter", "shoutAll", |_ctx, _parent, args| {
        let names: Vec<String> = args[0]
            .as_list()
            .unwrap_or(&[])
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_uppercase)
            .collect();
        Ok(Value::from(names.join(" AND ")))
    });

    bindings.bind("Greeter", "deliver", |_ctx, _parent, args| async move {
        let proxy = match args.into_iter().next() {
            Some(Value::Proxy(proxy)) => proxy,
            other => anyhow::bail!("deliver expects a notifier, got {:?}", other),
        };
        let reply = proxy
            .invoke("notify", &[("message", Value::from("deploy finished"))])
            .await?;
        Ok(Value::from(format!(
            "notifier said: {}",
            reply.as_str().unwrap_or("")
        )))
    });

    bindings.bind("Greeter", "inspect", |_ctx, _parent, args| async move {
        let proxy = match args.into_iter().next() {
            Some(Value::Proxy(proxy)) => proxy,
            other => anyhow::bail!("inspect expects a notifier, got {:?}", other),
        };
        Ok(proxy.invoke("id", &[]).await?)
    });

    bindings
}

/// Serve one scripted call, expecting success, and return the value the
/// runtime reported back.
pub async fn serve_value(
    catalog: &Catalog,
    bindings: Bindings,
    engine: &Arc<StaticEngine>,
    handles: &EngineHandles,
    call: CallDescriptor,
) -> JsonValue {
    engine.push_call(call);
    serve(catalog, bindings, handles).await.expect("serve succeeded");
    engine.returned_value().expect("a value was returned")
}

/// Serve one scripted call, expecting failure, and return the error together
/// with the message reported over the boundary.
pub async fn serve_error(
    catalog: &Catalog,
    bindings: Bindings,
    engine: &Arc<StaticEngine>,
    handles: &EngineHandles,
    call: CallDescriptor,
) -> (RuntimeError, String) {
    engine.push_call(call);
    let err = serve(catalog, bindings, handles)
        .await
        .expect_err("serve failed");
    let message = engine.returned_error().expect("an error was reported");
    (err, message)
}
