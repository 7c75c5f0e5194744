//! Registration op stream shape and interface naming.

use axon_catalog::{
    Catalog, ConstructorDecl, EnumDecl, EnumMemberDecl, FunctionDecl, InterfaceDecl, ObjectDecl,
    ParamDecl, TypeExpr,
};
use axon_client::{CallDescriptor, RegistryOp};
use axon_runtime::registered_interface;
use serde_json::json;

use super::harness::*;

fn label(op: &RegistryOp) -> &'static str {
    match op {
        RegistryOp::ModuleDescription { .. } => "description",
        RegistryOp::DeclareEnum { .. } => "enum",
        RegistryOp::EnumMember { .. } => "enum-member",
        RegistryOp::DeclareInterface { .. } => "interface",
        RegistryOp::InterfaceFunction { .. } => "interface-function",
        RegistryOp::DeclareObject { .. } => "object",
        RegistryOp::ObjectConstructor { .. } => "constructor",
        RegistryOp::ObjectField { .. } => "field",
        RegistryOp::ObjectFunction { .. } => "function",
    }
}

#[tokio::test]
async fn test_op_stream_shape() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    serve_value(
        &catalog,
        demo_bindings(),
        &engine,
        &handles,
        CallDescriptor::registration(),
    )
    .await;

    let ops = engine.last_submission();
    let labels: Vec<&str> = ops.iter().map(label).collect();
    assert_eq!(
        labels,
        vec![
            "description",
            "enum",
            "enum-member",
            "enum-member",
            "interface",
            "interface-function",
            "object",
            "constructor",
            "field",
            "function",
            "function",
            "function",
            "function",
            "function",
        ]
    );
}

#[tokio::test]
async fn test_component_blocks_ignore_catalog_insertion_order() {
    let (engine, handles) = static_engine();

    // Declared objects-first; the submitted stream still leads with enums.
    let mut catalog = Catalog::new("demo");
    catalog.add_object(
        ObjectDecl::new("Greeter").function(FunctionDecl::new("hello", TypeExpr::Str)),
    );
    catalog.add_interface(
        InterfaceDecl::new("Notifier")
            .function(FunctionDecl::new("notify", TypeExpr::Void)),
    );
    catalog.add_enum(
        EnumDecl::new("Severity").member(EnumMemberDecl::new("Low", "SEV_LOW")),
    );

    serve_value(
        &catalog,
        demo_bindings(),
        &engine,
        &handles,
        CallDescriptor::registration(),
    )
    .await;

    let labels: Vec<&str> = engine.last_submission().iter().map(label).collect();
    assert_eq!(
        labels,
        vec![
            "enum",
            "enum-member",
            "interface",
            "interface-function",
            "object",
            "function",
        ]
    );
}

#[tokio::test]
async fn test_interface_registered_under_module_prefix() {
    let (engine, handles) = static_engine();
    let catalog = demo_catalog();

    serve_value(
        &catalog,
        demo_bindings(),
        &engine,
        &handles,
        CallDescriptor::registration(),
    )
    .await;

    assert_eq!(
        registered_interface("Notifier"),
        Some("DemoNotifier".to_string())
    );
}

#[tokio::test]
async fn test_function_less_interface_is_not_registered() {
    let (engine, handles) = static_engine();

    let mut catalog = Catalog::new("demo");
    catalog.add_interface(InterfaceDecl::new("Marker"));
    catalog.add_object(
        ObjectDecl::new("Greeter").function(FunctionDecl::new("hello", TypeExpr::Str)),
    );

    serve_value(
        &catalog,
        demo_bindings(),
        &engine,
        &handles,
        CallDescriptor::registration(),
    )
    .await;

    let declared: Vec<String> = engine
        .last_submission()
        .iter()
        .filter_map(|op| match op {
            RegistryOp::DeclareInterface { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect();
    assert!(declared.is_empty());
}

#[tokio::test]
async fn test_marked_constructor_wins_registration() {
    let (engine, handles) = static_engine();

    let mut catalog = Catalog::new("demo");
    catalog.add_object(
        ObjectDecl::new("Picker")
            .constructor(ConstructorDecl::new().param(ParamDecl::new("first", TypeExpr::Str)))
            .constructor(
                ConstructorDecl::new()
                    .param(ParamDecl::new("chosen", TypeExpr::Str))
                    .marked(),
            )
            .function(FunctionDecl::new("pick", TypeExpr::Str)),
    );

    serve_value(
        &catalog,
        demo_bindings(),
        &engine,
        &handles,
        CallDescriptor::registration(),
    )
    .await;

    let ctor_args: Vec<String> = engine
        .last_submission()
        .iter()
        .filter_map(|op| match op {
            RegistryOp::ObjectConstructor { constructor, .. } => Some(constructor.clone()),
            _ => None,
        })
        .flat_map(|c| c.arguments.into_iter().map(|a| a.name))
        .collect();
    assert_eq!(ctor_args, vec!["chosen".to_string()]);
}

#[tokio::test]
async fn test_registration_returns_the_schema_identity() {
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
    assert_eq!(engine.submissions().len(), 1);
}
