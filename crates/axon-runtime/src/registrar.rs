//! Schema registration
//!
//! [`plan`] flattens a resolved schema into the ordered operation list the
//! registry applies verbatim. Enums go first, then interfaces, then objects;
//! within a component, the declaration precedes its members in declaration
//! order. [`register`] submits the plan and seeds the interface registry.

use axon_client::{EngineError, RegistryOp, SchemaId, SchemaRegistry};
use axon_schema::ModuleSchema;
use tracing::{debug, info};

use crate::registry;

/// The registration plan for a resolved schema.
pub fn plan(schema: &ModuleSchema) -> Vec<RegistryOp> {
    let mut ops = Vec::new();

    if let Some(description) = &schema.description {
        ops.push(RegistryOp::ModuleDescription {
            description: description.clone(),
        });
    }

    for def in &schema.enums {
        ops.push(RegistryOp::DeclareEnum {
            name: def.name.clone(),
            description: def.description.clone(),
        });
        for member in &def.members {
            ops.push(RegistryOp::EnumMember {
                owner: def.name.clone(),
                member: member.clone(),
            });
        }
    }

    for def in &schema.interfaces {
        ops.push(RegistryOp::DeclareInterface {
            name: def.name.clone(),
            description: def.description.clone(),
        });
        for function in &def.functions {
            ops.push(RegistryOp::InterfaceFunction {
                owner: def.name.clone(),
                function: function.clone(),
            });
        }
    }

    for def in &schema.objects {
        ops.push(RegistryOp::DeclareObject {
            name: def.name.clone(),
            description: def.description.clone(),
            deprecated: def.deprecated.clone(),
        });
        if let Some(ctor) = &def.constructor {
            ops.push(RegistryOp::ObjectConstructor {
                owner: def.name.clone(),
                constructor: ctor.clone(),
            });
        }
        for field in &def.fields {
            ops.push(RegistryOp::ObjectField {
                owner: def.name.clone(),
                field: field.clone(),
            });
        }
        for function in &def.functions {
            ops.push(RegistryOp::ObjectFunction {
                owner: def.name.clone(),
                function: function.clone(),
            });
        }
    }

    ops
}

/// Submit the registration plan and seed the interface registry.
pub async fn register(
    schema: &ModuleSchema,
    registry_client: &dyn SchemaRegistry,
) -> Result<SchemaId, EngineError> {
    let ops = plan(schema);
    debug!(
        "registering module {:?}: {} operations",
        schema.name,
        ops.len()
    );
    let id = registry_client.submit(&schema.name, &ops).await?;
    registry::populate(schema);
    info!("module {:?} registered as {}", schema.name, id);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_schema::{
        ArgumentDef, ConstructorDef, EnumDef, EnumMemberDef, FieldDef, FunctionDef, InterfaceDef,
        ObjectDef, TypeDef,
    };

    fn sample_schema() -> ModuleSchema {
        let mut schema = ModuleSchema::new("demo");
        schema.description = Some("A demo module".to_string());

        let mut severity = EnumDef::new("Severity");
        severity.members.push(EnumMemberDef::new("Low", "1"));
        severity.members.push(EnumMemberDef::new("High", "2"));
        schema.enums.push(severity);

        let mut fetcher = InterfaceDef::new("Fetcher");
        fetcher
            .functions
            .push(FunctionDef::new("fetch", TypeDef::string()));
        schema.interfaces.push(fetcher);

        let mut greeter = ObjectDef::new("Greeter");
        greeter.constructor = Some(ConstructorDef::new(vec![ArgumentDef::new(
            "greeting",
            TypeDef::string(),
        )]));
        greeter
            .fields
            .push(FieldDef::new("greeting", TypeDef::string()));
        greeter
            .functions
            .push(FunctionDef::new("hello", TypeDef::string()));
        schema.objects.push(greeter);

        schema
    }

    #[test]
    fn test_plan_orders_kinds_and_members() {
        let ops = plan(&sample_schema());
        let tags: Vec<&'static str> = ops
            .iter()
            .map(|op| match op {
                RegistryOp::ModuleDescription { .. } => "module",
                RegistryOp::DeclareEnum { .. } => "enum",
                RegistryOp::EnumMember { .. } => "enumMember",
                RegistryOp::DeclareInterface { .. } => "interface",
                RegistryOp::InterfaceFunction { .. } => "interfaceFunction",
                RegistryOp::DeclareObject { .. } => "object",
                RegistryOp::ObjectConstructor { .. } => "constructor",
                RegistryOp::ObjectField { .. } => "field",
                RegistryOp::ObjectFunction { .. } => "function",
            })
            .collect();

        assert_eq!(
            tags,
            vec![
                "module",
                "enum",
                "enumMember",
                "enumMember",
                "interface",
                "interfaceFunction",
                "object",
                "constructor",
                "field",
                "function",
            ]
        );
    }

    #[test]
    fn test_members_attribute_to_their_component() {
        let ops = plan(&sample_schema());
        for op in &ops[1..4] {
            assert_eq!(op.component(), Some("Severity"));
        }
        for op in &ops[6..] {
            assert_eq!(op.component(), Some("Greeter"));
        }
    }

    #[tokio::test]
    async fn test_register_submits_and_seeds_interfaces() {
        use axon_client::testing::StaticEngine;

        let mut schema = ModuleSchema::new("registrar-probe");
        let mut notifier = InterfaceDef::new("RegistrarProbeNotifier");
        notifier
            .functions
            .push(FunctionDef::new("notify", TypeDef::void()));
        schema.interfaces.push(notifier);
        schema.objects.push(ObjectDef::new("Anchor"));

        let engine = StaticEngine::new();
        let id = register(&schema, &engine).await.unwrap();
        assert_eq!(id.0, "registrar-probe@1");
        assert_eq!(engine.last_submission().len(), plan(&schema).len());
        assert_eq!(
            registry::registered_interface("RegistrarProbeNotifier").as_deref(),
            Some("RegistrarProbeRegistrarProbeNotifier")
        );
    }
}
