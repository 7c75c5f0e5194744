//! Argument coercion through the full serve path.

use axon_client::CallDescriptor;
use axon_runtime::RuntimeError;
use serde_json::json;

use super::harness::*;

#[tokio::test]
async fn test_enum_matches_member_name_case_insensitively() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call =
        CallDescriptor::invocation("Greeter", "rate").with_argument("severity", json!("low"));
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("SEV_LOW"));
}

#[tokio::test]
async fn test_enum_accepts_wire_value() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call =
        CallDescriptor::invocation("Greeter", "rate").with_argument("severity", json!("SEV_HIGH"));
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("SEV_HIGH"));
}

#[tokio::test]
async fn test_enum_default_round_trips_to_wire_value() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call = CallDescriptor::invocation("Greeter", "rate");
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("SEV_LOW"));
}

#[tokio::test]
async fn test_enum_rejects_unknown_member() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call =
        CallDescriptor::invocation("Greeter", "rate").with_argument("severity", json!("banana"));
    let (err, message) = serve_error(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert!(matches!(err, RuntimeError::Dispatch(_)));
    assert!(message.contains("severity"), "message was: {}", message);
}

#[tokio::test]
async fn test_null_optional_argument_is_absent() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call = CallDescriptor::invocation("Greeter", "hello")
        .with_state(json!({ "greeting": "Hi" }))
        .with_argument("name", json!("Ada"))
        .with_argument("punctuation", json!(null));
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("Hi, Ada!"));
}

#[tokio::test]
async fn test_null_required_string_becomes_zero_value() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call = CallDescriptor::invocation("Greeter", "hello")
        .with_state(json!({ "greeting": "Hi" }))
        .with_argument("name", json!(null));
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("Hi, !"));
}

#[tokio::test]
async fn test_missing_required_argument_is_fatal() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call = CallDescriptor::invocation("Greeter", "hello");
    let (err, message) = serve_error(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert!(matches!(err, RuntimeError::Dispatch(_)));
    assert_eq!(message, "missing required argument name for hello");
}

#[tokio::test]
async fn test_variadic_arguments_collect_in_index_order() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call = CallDescriptor::invocation("Greeter", "shoutAll")
        .with_argument("names0", json!("ada"))
        .with_argument("names1", json!("grace"))
        .with_argument("names2", json!("maia"));
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("ADA AND GRACE AND MAIA"));
}

#[tokio::test]
async fn test_variadic_accepts_a_single_list() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    let call = CallDescriptor::invocation("Greeter", "shoutAll")
        .with_argument("names", json!(["ada", "grace"]));
    let out = serve_value(&catalog, demo_bindings(), &engine, &handles, call).await;
    assert_eq!(out, json!("ADA AND GRACE"));
}
