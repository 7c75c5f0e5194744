//! Metadata collection
//!
//! First pass over the catalog: every exposed declaration becomes a schema
//! component. Member types go through the direct classifier; anything the
//! classifier cannot place is carried as an unresolved reference for the
//! resolver to finish.

use axon_catalog::{
    Catalog, ConstructorDecl, EnumDecl, FieldDecl, FunctionDecl, InterfaceDecl, ObjectDecl,
    ParamDecl, TypeExpr,
};
use axon_schema::{
    ArgumentDef, CachePolicy, ConstructorDef, EnumDef, EnumMemberDef, FieldDef, FunctionDef,
    InterfaceDef, ModuleSchema, ObjectDef, TypeDef,
};
use tracing::debug;

use crate::error::IntrospectError;
use crate::names::wire_name;

/// Build the partial schema for every exposed declaration in the catalog.
///
/// The result may contain unresolved references; run it through
/// [`crate::resolve`] before registering or dispatching.
pub fn collect(catalog: &Catalog) -> Result<ModuleSchema, IntrospectError> {
    if !catalog.objects.iter().any(|o| o.exposed) {
        return Err(IntrospectError::NoExposedObjects);
    }

    debug!(
        "collecting module {:?}: {} objects, {} interfaces, {} enums",
        catalog.name,
        catalog.objects.len(),
        catalog.interfaces.len(),
        catalog.enums.len()
    );

    let mut schema = ModuleSchema::new(catalog.name.clone());
    schema.description = catalog.description.clone();

    for decl in catalog.objects.iter().filter(|o| o.exposed) {
        schema.objects.push(collect_object(decl)?);
    }
    for decl in catalog.interfaces.iter().filter(|i| i.exposed) {
        if let Some(def) = collect_interface(decl)? {
            schema.interfaces.push(def);
        }
    }
    for decl in catalog.enums.iter().filter(|e| e.exposed) {
        schema.enums.push(collect_enum(decl)?);
    }

    Ok(schema)
}

fn collect_object(decl: &ObjectDecl) -> Result<ObjectDef, IntrospectError> {
    let mut def = ObjectDef::new(decl.name.clone());
    def.description = decl.doc.clone();
    def.deprecated = decl.deprecated.clone();

    if let Some(ctor) = select_constructor(decl)? {
        let mut arguments = Vec::new();
        for param in &ctor.params {
            if let Some(arg) = collect_param(&decl.name, param)? {
                arguments.push(arg);
            }
        }
        if !arguments.is_empty() {
            def.constructor = Some(ConstructorDef::new(arguments));
        }
    }

    for field in &decl.fields {
        def.fields.push(collect_field(field)?);
    }
    for function in &decl.functions {
        def.functions.push(collect_function(function)?);
    }

    debug!(
        "collected object {} ({} functions, {} fields)",
        def.name,
        def.functions.len(),
        def.fields.len()
    );
    Ok(def)
}

/// Pick the constructor the schema will carry.
///
/// A marked constructor wins, and at most one may be marked. With no marks,
/// the first declared constructor that has parameters wins silently and any
/// later ones are ignored; a lone parameterless constructor collects
/// nothing. This mirrors the observable schema output of the platforms this
/// runtime interoperates with.
fn select_constructor(decl: &ObjectDecl) -> Result<Option<&ConstructorDecl>, IntrospectError> {
    let mut marked = decl.constructors.iter().filter(|c| c.marked);
    if let Some(first) = marked.next() {
        if marked.next().is_some() {
            return Err(IntrospectError::DuplicateConstructor {
                object: decl.name.clone(),
            });
        }
        return Ok(Some(first));
    }
    Ok(decl.constructors.iter().find(|c| !c.params.is_empty()))
}

pub(crate) fn collect_interface(
    decl: &InterfaceDecl,
) -> Result<Option<InterfaceDef>, IntrospectError> {
    for field in &decl.fields {
        debug!(
            "ignoring field-like member {} on interface {}; interfaces support functions only",
            field.name, decl.name
        );
    }

    if decl.functions.is_empty() {
        debug!("skipping interface {}: no functions declared", decl.name);
        return Ok(None);
    }

    let mut def = InterfaceDef::new(decl.name.clone());
    def.description = decl.doc.clone();
    for function in &decl.functions {
        def.functions.push(collect_function(function)?);
    }
    Ok(Some(def))
}

pub(crate) fn collect_enum(decl: &EnumDecl) -> Result<EnumDef, IntrospectError> {
    let mut def = EnumDef::new(decl.name.clone());
    def.description = decl.doc.clone();

    for member in &decl.members {
        let value = member.value.clone().ok_or_else(|| {
            IntrospectError::MissingEnumValue {
                enum_name: decl.name.clone(),
                member: member.name.clone(),
            }
        })?;
        let mut collected = EnumMemberDef::new(member.name.clone(), value);
        collected.description = member.doc.clone();
        collected.deprecated = member.deprecated.clone();
        def.members.push(collected);
    }
    Ok(def)
}

pub(crate) fn collect_field(decl: &FieldDecl) -> Result<FieldDef, IntrospectError> {
    let name = decl
        .rename
        .clone()
        .unwrap_or_else(|| wire_name(&decl.name));
    let mut def = FieldDef::new(name, classify(&decl.ty, &decl.name)?);
    def.description = decl.doc.clone();
    def.deprecated = decl.deprecated.clone();
    Ok(def)
}

fn collect_function(decl: &FunctionDecl) -> Result<FunctionDef, IntrospectError> {
    let name = decl
        .rename
        .clone()
        .unwrap_or_else(|| wire_name(&decl.name));
    let mut def = FunctionDef::new(name, classify(&decl.ret, &decl.name)?);
    def.description = decl.doc.clone();
    def.deprecated = decl.deprecated.clone();
    def.cache_policy = decl.cache.as_ref().map(|c| match c {
        axon_catalog::CacheDecl::Never => CachePolicy::Never,
        axon_catalog::CacheDecl::PerSession => CachePolicy::PerSession,
        axon_catalog::CacheDecl::Ttl(ttl) => CachePolicy::Default { ttl: ttl.clone() },
    });

    for param in &decl.params {
        if let Some(arg) = collect_param(&decl.name, param)? {
            def.arguments.push(arg);
        }
    }
    Ok(def)
}

/// Collect one parameter. Returns `None` for the cancellation token, which
/// never appears in the schema and is injected at call time instead.
fn collect_param(owner: &str, decl: &ParamDecl) -> Result<Option<ArgumentDef>, IntrospectError> {
    if decl.ty.is_cancellation() {
        return Ok(None);
    }

    let name = decl
        .rename
        .clone()
        .unwrap_or_else(|| wire_name(&decl.name));

    if decl.default.is_some() && decl.default_path.is_some() {
        return Err(IntrospectError::MultipleDefaults {
            owner: owner.to_string(),
            argument: name,
        });
    }

    let mut ty = classify(&decl.ty, &decl.name)?;
    if decl.variadic && !matches!(ty.kind, axon_schema::TypeKind::List { .. }) {
        ty = TypeDef::list(ty);
    }

    let nullable = ty.optional;
    let has_default = decl.default.is_some() || decl.default_path.is_some();

    let mut def = ArgumentDef::new(name, ty);
    def.description = decl.doc.clone();
    def.optional = nullable || has_default || decl.optional || decl.variadic;
    def.default_value = decl.default.clone().filter(is_primitive_default);
    def.default_path = decl.default_path.clone();
    def.ignore_patterns = decl.ignore.clone();
    def.deprecated = decl.deprecated.clone();
    def.variadic = decl.variadic;
    Ok(Some(def))
}

/// Only primitive JSON literals survive as registered defaults; anything
/// else leaves the argument merely optional.
fn is_primitive_default(value: &serde_json::Value) -> bool {
    value.is_string() || value.is_number() || value.is_boolean()
}

/// Map a declared type expression to a schema type where possible.
///
/// `Named` expressions become unresolved references for the resolver to
/// finish. The cancellation token has no schema form at all and is rejected
/// outside parameter position.
pub(crate) fn classify(expr: &TypeExpr, member: &str) -> Result<TypeDef, IntrospectError> {
    Ok(match expr {
        TypeExpr::Bool => TypeDef::boolean(),
        TypeExpr::Int => TypeDef::integer(),
        TypeExpr::Float => TypeDef::float(),
        TypeExpr::Str => TypeDef::string(),
        TypeExpr::Void => TypeDef::void(),
        TypeExpr::Json => TypeDef::scalar("JSON"),
        TypeExpr::Option(inner) => classify(inner, member)?.with_optional(true),
        TypeExpr::List(element) => TypeDef::list(classify(element, member)?),
        TypeExpr::Named(name) => TypeDef::unresolved(name.clone()),
        TypeExpr::Cancellation => {
            return Err(IntrospectError::UnsupportedShape {
                name: member.to_string(),
                detail: "cancellation tokens are only valid as function parameters".to_string(),
            })
        }
    })
}
