//! Reference resolution
//!
//! Second pass: every [`TypeKind::Unresolved`] slot left by collection is
//! matched against the catalog and rewritten in place. Resolution runs a
//! worklist rather than recursing so alias chains of any depth terminate,
//! with a bounded retry count to reject alias cycles.

use std::collections::VecDeque;

use axon_catalog::{AliasKind, Catalog, Origin};
use axon_schema::{ArgumentDef, FunctionDef, ModuleSchema, ObjectDef, TypeDef, TypeKind};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::collect::{classify, collect_enum, collect_field, collect_interface};
use crate::error::IntrospectError;

/// Resolve every pending reference in `schema` against `catalog`.
///
/// Referenced interfaces, enums and object-shaped aliases that collection
/// skipped are pulled into the schema on demand. Returns the schema with no
/// [`TypeKind::Unresolved`] slot remaining, or the first resolution error.
pub fn resolve(
    catalog: &Catalog,
    mut schema: ModuleSchema,
) -> Result<ModuleSchema, IntrospectError> {
    let mut resolver = Resolver::new(catalog);
    resolver.seed(&schema);
    resolver.run(&mut schema)?;
    resolver.propagate(&mut schema);

    if let Some(name) = first_pending(&schema) {
        return Err(IntrospectError::UnresolvedReference { name, origin: None });
    }

    normalize_enum_defaults(&mut schema)?;

    debug!(
        "resolved module {:?}: {} objects, {} interfaces, {} enums",
        schema.name,
        schema.objects.len(),
        schema.interfaces.len(),
        schema.enums.len()
    );
    Ok(schema)
}

/// One name waiting to be resolved, with the origin of whatever referenced
/// it for diagnostics.
struct Pending {
    name: String,
    origin: Option<Origin>,
}

struct Resolver<'a> {
    catalog: &'a Catalog,
    /// Every name already resolved, mapped to the type it stands for.
    references: FxHashMap<String, TypeDef>,
    worklist: VecDeque<Pending>,
    /// Times each alias has been requeued; bounded by the alias count.
    attempts: FxHashMap<String, usize>,
}

impl<'a> Resolver<'a> {
    fn new(catalog: &'a Catalog) -> Self {
        let mut references = FxHashMap::default();
        // The lowercase spelling is accepted as a built-in alias so float
        // returns do not need a declaration of their own.
        references.insert("float".to_string(), TypeDef::float());
        Resolver {
            catalog,
            references,
            worklist: VecDeque::new(),
            attempts: FxHashMap::default(),
        }
    }

    /// Record every collected component and queue every reference the
    /// collected slots carry.
    fn seed(&mut self, schema: &ModuleSchema) {
        for object in &schema.objects {
            self.references
                .insert(object.name.clone(), TypeDef::object(&object.name));
        }
        for interface in &schema.interfaces {
            self.references
                .insert(interface.name.clone(), TypeDef::interface(&interface.name));
        }
        for en in &schema.enums {
            self.references
                .insert(en.name.clone(), TypeDef::enum_named(&en.name));
        }

        for object in &schema.objects {
            let origin = self
                .catalog
                .object(&object.name)
                .and_then(|d| d.origin.clone());
            self.enqueue_object_refs(object, origin);
        }
        for interface in &schema.interfaces {
            let origin = self
                .catalog
                .interface(&interface.name)
                .and_then(|d| d.origin.clone());
            for function in &interface.functions {
                self.enqueue_function_refs(function, origin.clone());
            }
        }
    }

    fn enqueue_object_refs(&mut self, object: &ObjectDef, origin: Option<Origin>) {
        if let Some(ctor) = &object.constructor {
            for arg in &ctor.arguments {
                self.enqueue_slot(&arg.ty, origin.clone());
            }
        }
        for field in &object.fields {
            self.enqueue_slot(&field.ty, origin.clone());
        }
        for function in &object.functions {
            self.enqueue_function_refs(function, origin.clone());
        }
    }

    fn enqueue_function_refs(&mut self, function: &FunctionDef, origin: Option<Origin>) {
        self.enqueue_slot(&function.return_type, origin.clone());
        for arg in &function.arguments {
            self.enqueue_slot(&arg.ty, origin.clone());
        }
    }

    fn enqueue_slot(&mut self, ty: &TypeDef, origin: Option<Origin>) {
        if let Some(name) = ty.pending_reference() {
            self.worklist.push_back(Pending {
                name: name.to_string(),
                origin,
            });
        }
    }

    /// Drain the worklist until every queued name has a resolution.
    fn run(&mut self, schema: &mut ModuleSchema) -> Result<(), IntrospectError> {
        while let Some(pending) = self.worklist.pop_front() {
            if self.references.contains_key(&pending.name) {
                continue;
            }
            self.resolve_name(&pending.name, pending.origin, schema)?;
        }
        Ok(())
    }

    /// Resolve one name. Lookup priority is object, then interface, then
    /// enum, then alias; the first kind that matches wins.
    fn resolve_name(
        &mut self,
        name: &str,
        origin: Option<Origin>,
        schema: &mut ModuleSchema,
    ) -> Result<(), IntrospectError> {
        if let Some(hint) = boxed_primitive_hint(name) {
            return Err(IntrospectError::BoxedPrimitive {
                name: name.to_string(),
                hint,
            });
        }

        if let Some(decl) = self.catalog.object(name) {
            if !decl.exposed {
                return Err(IntrospectError::NotExposed {
                    name: name.to_string(),
                });
            }
            // Exposed objects were all collected up front, so this arm only
            // fires if a caller seeds a partial schema by hand.
            self.references
                .insert(name.to_string(), TypeDef::object(name));
            return Ok(());
        }

        if let Some(decl) = self.catalog.interface(name) {
            let def = collect_interface(decl)?.ok_or_else(|| IntrospectError::UnsupportedShape {
                name: name.to_string(),
                detail: "referenced interface declares no functions".to_string(),
            })?;
            debug!("resolved reference {} to interface, collecting on demand", name);
            for function in &def.functions {
                self.enqueue_function_refs(function, decl.origin.clone());
            }
            schema.interfaces.push(def);
            self.references
                .insert(name.to_string(), TypeDef::interface(name));
            return Ok(());
        }

        if let Some(decl) = self.catalog.enum_decl(name) {
            debug!("resolved reference {} to enum, collecting on demand", name);
            schema.enums.push(collect_enum(decl)?);
            self.references
                .insert(name.to_string(), TypeDef::enum_named(name));
            return Ok(());
        }

        if let Some(decl) = self.catalog.alias(name) {
            return self.resolve_alias(name, decl.origin.clone(), &decl.kind, schema);
        }

        Err(IntrospectError::UnresolvedReference {
            name: name.to_string(),
            origin,
        })
    }

    fn resolve_alias(
        &mut self,
        name: &str,
        origin: Option<Origin>,
        kind: &AliasKind,
        schema: &mut ModuleSchema,
    ) -> Result<(), IntrospectError> {
        match kind {
            AliasKind::Primitive(expr) => {
                let ty = classify(expr, name)?;
                if let Some(reference) = ty.pending_reference() {
                    if reference == name {
                        return Err(IntrospectError::UnresolvedReference {
                            name: name.to_string(),
                            origin,
                        });
                    }
                    if !self.references.contains_key(reference) {
                        // The target has not resolved yet. Queue it, then
                        // requeue this alias behind it; the attempt bound
                        // turns alias cycles into an error instead of a
                        // spinning worklist.
                        let tries = self.attempts.entry(name.to_string()).or_insert(0);
                        *tries += 1;
                        if *tries > self.catalog.aliases.len() + 1 {
                            return Err(IntrospectError::UnresolvedReference {
                                name: name.to_string(),
                                origin,
                            });
                        }
                        self.worklist.push_back(Pending {
                            name: reference.to_string(),
                            origin: origin.clone(),
                        });
                        self.worklist.push_back(Pending {
                            name: name.to_string(),
                            origin,
                        });
                        return Ok(());
                    }
                }
                let resolved = self.substitute(&ty);
                self.references.insert(name.to_string(), resolved);
                Ok(())
            }
            AliasKind::Object(fields) => {
                let mut def = ObjectDef::new(name);
                for field in fields {
                    def.fields.push(collect_field(field)?);
                }
                debug!(
                    "promoted object-shaped alias {} to a component with {} fields",
                    name,
                    def.fields.len()
                );
                self.enqueue_object_refs(&def, origin);
                schema.objects.push(def);
                self.references
                    .insert(name.to_string(), TypeDef::object(name));
                Ok(())
            }
            AliasKind::Opaque => {
                self.references
                    .insert(name.to_string(), TypeDef::scalar(name));
                Ok(())
            }
        }
    }

    /// Rewrite a slot with its resolution. Optionality sticks: a nullable
    /// reference to a nullable alias stays nullable.
    fn substitute(&self, ty: &TypeDef) -> TypeDef {
        match &ty.kind {
            TypeKind::Unresolved { reference } => match self.references.get(reference) {
                Some(resolved) => TypeDef {
                    kind: resolved.kind.clone(),
                    optional: ty.optional || resolved.optional,
                },
                None => ty.clone(),
            },
            TypeKind::List { element } => TypeDef {
                kind: TypeKind::List {
                    element: Box::new(self.substitute(element)),
                },
                optional: ty.optional,
            },
            _ => ty.clone(),
        }
    }

    /// Rewrite every slot in the schema with its resolution.
    fn propagate(&self, schema: &mut ModuleSchema) {
        for object in &mut schema.objects {
            if let Some(ctor) = &mut object.constructor {
                for arg in &mut ctor.arguments {
                    arg.ty = self.substitute(&arg.ty);
                }
            }
            for field in &mut object.fields {
                field.ty = self.substitute(&field.ty);
            }
            for function in &mut object.functions {
                function.return_type = self.substitute(&function.return_type);
                for arg in &mut function.arguments {
                    arg.ty = self.substitute(&arg.ty);
                }
            }
        }
        for interface in &mut schema.interfaces {
            for function in &mut interface.functions {
                function.return_type = self.substitute(&function.return_type);
                for arg in &mut function.arguments {
                    arg.ty = self.substitute(&arg.ty);
                }
            }
        }
    }
}

fn boxed_primitive_hint(name: &str) -> Option<&'static str> {
    match name {
        "String" => Some("string"),
        "Boolean" => Some("boolean"),
        "Number" => Some("integer or float"),
        "Integer" => Some("integer"),
        "Float" => Some("float"),
        _ => None,
    }
}

fn first_pending(schema: &ModuleSchema) -> Option<String> {
    fn in_function(f: &FunctionDef) -> Option<String> {
        f.return_type
            .pending_reference()
            .or_else(|| {
                f.arguments
                    .iter()
                    .find_map(|a| a.ty.pending_reference())
            })
            .map(str::to_string)
    }

    for object in &schema.objects {
        if let Some(ctor) = &object.constructor {
            if let Some(name) = ctor.arguments.iter().find_map(|a| a.ty.pending_reference()) {
                return Some(name.to_string());
            }
        }
        if let Some(name) = object.fields.iter().find_map(|f| f.ty.pending_reference()) {
            return Some(name.to_string());
        }
        if let Some(name) = object.functions.iter().find_map(in_function) {
            return Some(name);
        }
    }
    schema
        .interfaces
        .iter()
        .find_map(|i| i.functions.iter().find_map(in_function))
}

/// Rewrite enum-typed argument defaults to the member name the dispatcher
/// and registry expect, whichever spelling the declaration used.
fn normalize_enum_defaults(schema: &mut ModuleSchema) -> Result<(), IntrospectError> {
    let enums = schema.enums.clone();

    let mut normalize = |arg: &mut ArgumentDef| -> Result<(), IntrospectError> {
        let enum_name = match &arg.ty.kind {
            TypeKind::Enum { name } => name.clone(),
            _ => return Ok(()),
        };
        let raw = match &arg.default_value {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => return Ok(()),
        };
        let def = match enums.iter().find(|e| e.name == enum_name) {
            Some(def) => def,
            None => return Ok(()),
        };
        match def.member_for_input(&raw) {
            Some(member) => {
                arg.default_value = Some(serde_json::Value::String(member.name.clone()));
                Ok(())
            }
            None => Err(IntrospectError::UnknownEnumDefault {
                argument: arg.name.clone(),
                value: raw,
            }),
        }
    };

    for object in &mut schema.objects {
        if let Some(ctor) = &mut object.constructor {
            for arg in &mut ctor.arguments {
                normalize(arg)?;
            }
        }
        for function in &mut object.functions {
            for arg in &mut function.arguments {
                normalize(arg)?;
            }
        }
    }
    for interface in &mut schema.interfaces {
        for function in &mut interface.functions {
            for arg in &mut function.arguments {
                normalize(arg)?;
            }
        }
    }
    Ok(())
}
