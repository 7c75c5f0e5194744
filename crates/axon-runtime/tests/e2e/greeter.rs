//! Register-then-invoke flows over the demo module.

use axon_client::CallDescriptor;
use serde_json::json;

use super::harness::*;

#[tokio::test]
async fn test_register_then_invoke() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let id = serve_value(
        &catalog,
        demo_bindings(),
        &engine,
        &handles,
        CallDescriptor::registration(),
    )
    .await;
    assert_eq!(id, json!("demo@1"));

    let call = CallDescriptor::invocation("Greeter", "hello")
        .with_state(json!({ "greeting": "Ahoy" }))
        .with_argument("name", json!("Ada"));
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("Ahoy, Ada!"));
}

#[tokio::test]
async fn test_constructor_then_method_round_trip() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    // The constructor's normalized state is exactly what the engine stores
    // and hands back on the next invocation.
    let ctor = CallDescriptor::invocation("Greeter", "").with_argument("greeting", json!("Hei"));
    let state = serve_value(&catalog, demo_bindings(), &engine, &handles, ctor).await;
    assert_eq!(state, json!({ "greeting": "Hei" }));

    let call = CallDescriptor::invocation("Greeter", "hello")
        .with_state(state)
        .with_argument("name", json!("maia"));
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("Hei, maia!"));
}

#[tokio::test]
async fn test_constructor_default_applies_when_absent() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let ctor = CallDescriptor::invocation("Greeter", "");
    let state = serve_value(&catalog, demo_bindings(), &engine, &handles, ctor).await;
    assert_eq!(state, json!({ "greeting": "Hello" }));
}

#[tokio::test]
async fn test_hello_without_stored_state() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    // No prior state at all: the handler falls back to its own default.
    let call = CallDescriptor::invocation("Greeter", "hello").with_argument("name", json!("Ada"));
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("Hello, Ada!"));
}
