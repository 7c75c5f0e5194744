//! Failure reporting over the call boundary.

use axon_catalog::{Catalog, ConstructorDecl, FunctionDecl, ObjectDecl, ParamDecl, TypeExpr};
use axon_client::CallDescriptor;
use axon_runtime::{Bindings, RuntimeError, Value};
use serde_json::json;

use super::harness::*;

#[tokio::test]
async fn test_handler_error_chain_reaches_the_engine() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let mut bindings = demo_bindings();
    bindings.bind_sync("Greeter", "hello", |_ctx, _parent, _args| {
        Err(anyhow::anyhow!("backend unreachable").context("greeting failed"))
    });

    let call = CallDescriptor::invocation("Greeter", "hello").with_argument("name", json!("x"));
    let (err, message) = serve_error(&catalog, bindings, &engine, &handles, call).await;
    assert!(matches!(err, RuntimeError::Dispatch(_)));
    assert_eq!(message, "greeting failed: backend unreachable");
    assert_eq!(engine.returned_value(), None);
}

#[tokio::test]
async fn test_handler_panic_is_reported_not_propagated() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let mut bindings = demo_bindings();
    bindings.bind_sync("Greeter", "hello", |_ctx, _parent, _args| {
        panic!("handler bug");
    });

    let call = CallDescriptor::invocation("Greeter", "hello").with_argument("name", json!("x"));
    let (_err, message) = serve_error(&catalog, bindings, &engine, &handles, call).await;
    assert_eq!(message, "function panicked: handler bug");
}

#[tokio::test]
async fn test_unknown_object_is_reported() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call = CallDescriptor::invocation("Absent", "anything");
    let (err, message) =
        serve_error(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert!(matches!(err, RuntimeError::Dispatch(_)));
    assert_eq!(message, "unknown object type Absent");
}

#[tokio::test]
async fn test_unbound_function_is_reported() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call = CallDescriptor::invocation("Greeter", "hello").with_argument("name", json!("x"));
    let (_err, message) =
        serve_error(&catalog, Bindings::new(), &engine, &handles, call).await;
    assert_eq!(message, "no handler bound for Greeter.hello");
}

#[tokio::test]
async fn test_schema_errors_fail_before_dispatch() {
    let (engine, handles) = static_engine();

    // Ghost is never declared, so the schema cannot be built at all.
    let mut catalog = Catalog::new("demo");
    catalog.add_object(
        ObjectDecl::new("Greeter")
            .function(FunctionDecl::new("haunt", TypeExpr::Named("Ghost".into()))),
    );

    let call = CallDescriptor::invocation("Greeter", "haunt");
    let (err, message) = serve_error(&catalog, Bindings::new(), &engine, &handles, call).await;
    assert!(matches!(err, RuntimeError::Introspect(_)));
    assert!(message.contains("Ghost"), "message was: {}", message);
}

#[tokio::test]
async fn test_constructor_returning_non_object_is_rejected() {
    let (engine, handles) = static_engine();

    let mut catalog = Catalog::new("demo");
    catalog.add_object(
        ObjectDecl::new("Odd")
            .constructor(ConstructorDecl::new().param(ParamDecl::new("seed", TypeExpr::Int)))
            .function(FunctionDecl::new("poke", TypeExpr::Void)),
    );

    let mut bindings = Bindings::new();
    bindings.bind_constructor_sync("Odd", |_ctx, _parent, _args| Ok(Value::Int(7)));
    bindings.bind_sync("Odd", "poke", |_ctx, _parent, _args| Ok(Value::Null));

    let call = CallDescriptor::invocation("Odd", "poke").with_state(json!({ "seed": 1 }));
    let (_err, message) = serve_error(&catalog, bindings, &engine, &handles, call).await;
    assert!(
        message.contains("non-object"),
        "message was: {}",
        message
    );
}
