//! Interface proxies driven through real invocations.

use axon_client::CallDescriptor;
use serde_json::json;

use super::harness::*;

#[tokio::test]
async fn test_proxy_method_runs_a_loader_query() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    engine.reply(
        "loadDemoNotifierFromID",
        json!({ "loadDemoNotifierFromID": { "notify": "delivered" } }),
    );

    let call = CallDescriptor::invocation("Greeter", "deliver")
        .with_argument("notifier", json!({ "id": "n-1" }));
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("notifier said: delivered"));

    let queries = engine.executed_queries();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].contains("loadDemoNotifierFromID(id: \"n-1\")"));
    assert!(queries[0].contains("notify(message: \"deploy finished\")"));
}

#[tokio::test]
async fn test_identity_answers_without_a_query() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call = CallDescriptor::invocation("Greeter", "inspect")
        .with_argument("notifier", json!({ "id": "n-42" }));
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("n-42"));
    assert!(engine.executed_queries().is_empty());
}

#[tokio::test]
async fn test_bare_string_identity_decodes() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call =
        CallDescriptor::invocation("Greeter", "inspect").with_argument("notifier", json!("n-7"));
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("n-7"));
}

#[tokio::test]
async fn test_payload_typename_overrides_the_registry() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    // A value handed over from another module carries its registered type
    // name; the proxy must query that type, not the local registration.
    engine.reply(
        "loadOtherNotifierFromID",
        json!({ "loadOtherNotifierFromID": { "notify": "cross-module" } }),
    );

    let call = CallDescriptor::invocation("Greeter", "deliver").with_argument(
        "notifier",
        json!({ "id": "x-9", "typename": "OtherNotifier" }),
    );
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("notifier said: cross-module"));

    let queries = engine.executed_queries();
    assert!(queries[0].contains("loadOtherNotifierFromID(id: \"x-9\")"));
}
