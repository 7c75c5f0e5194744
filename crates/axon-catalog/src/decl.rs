//! Declaration structures and their builders
//!
//! One struct per declarable thing. Builders consume and return `self` so a
//! catalog entry reads top-to-bottom the way the host type does. Markers the
//! original attribute surface carries (deprecation, cache policy, renames,
//! default paths, the explicit constructor mark) are plain fields here.

use serde_json::Value as JsonValue;

use crate::expr::TypeExpr;

/// Where a declaration came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Source file, as the catalog producer states it.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
}

impl Origin {
    /// Create an origin hint.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Origin {
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Requested caching behavior for a declared function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheDecl {
    /// Never cache.
    Never,
    /// Cache for the session.
    PerSession,
    /// Engine default with a time-to-live string.
    Ttl(String),
}

/// A declared parameter of a function or constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    /// Parameter name as declared in the host program.
    pub name: String,
    /// Explicit wire-name override.
    pub rename: Option<String>,
    /// Documentation text.
    pub doc: Option<String>,
    /// Declared type.
    pub ty: TypeExpr,
    /// Explicit optionality marker, independent of `Option` in the type.
    pub optional: bool,
    /// Default literal, as JSON.
    pub default: Option<JsonValue>,
    /// Directory-loading default path hint.
    pub default_path: Option<String>,
    /// Directory-loading ignore patterns.
    pub ignore: Vec<String>,
    /// Deprecation notice.
    pub deprecated: Option<String>,
    /// Whether the parameter collects a variable number of values.
    pub variadic: bool,
}

impl ParamDecl {
    /// Create a required parameter.
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        ParamDecl {
            name: name.into(),
            rename: None,
            doc: None,
            ty,
            optional: false,
            default: None,
            default_path: None,
            ignore: Vec::new(),
            deprecated: None,
            variadic: false,
        }
    }

    /// Override the wire name.
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Attach documentation.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    /// Mark the parameter optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Attach a default literal.
    pub fn default_value(mut self, value: JsonValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Attach a directory-loading default path.
    pub fn default_path(mut self, path: impl Into<String>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    /// Attach directory-loading ignore patterns.
    pub fn ignore(mut self, patterns: Vec<String>) -> Self {
        self.ignore = patterns;
        self
    }

    /// Attach a deprecation notice.
    pub fn deprecated(mut self, note: impl Into<String>) -> Self {
        self.deprecated = Some(note.into());
        self
    }

    /// Mark the parameter variadic.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// A declared field on an object (or, ignored, on an interface).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Field name as declared.
    pub name: String,
    /// Explicit wire-name override.
    pub rename: Option<String>,
    /// Documentation text.
    pub doc: Option<String>,
    /// Deprecation notice.
    pub deprecated: Option<String>,
    /// Declared type.
    pub ty: TypeExpr,
}

impl FieldDecl {
    /// Create a field declaration.
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        FieldDecl {
            name: name.into(),
            rename: None,
            doc: None,
            deprecated: None,
            ty,
        }
    }

    /// Override the wire name.
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Attach documentation.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    /// Attach a deprecation notice.
    pub fn deprecated(mut self, note: impl Into<String>) -> Self {
        self.deprecated = Some(note.into());
        self
    }
}

/// A declared function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Function name as declared in the host program.
    pub name: String,
    /// Explicit wire-name override.
    pub rename: Option<String>,
    /// Documentation text.
    pub doc: Option<String>,
    /// Deprecation notice.
    pub deprecated: Option<String>,
    /// Requested cache behavior.
    pub cache: Option<CacheDecl>,
    /// Declared return type.
    pub ret: TypeExpr,
    /// Parameters, in declaration order.
    pub params: Vec<ParamDecl>,
    /// Source hint for diagnostics.
    pub origin: Option<Origin>,
}

impl FunctionDecl {
    /// Create a function with no parameters.
    pub fn new(name: impl Into<String>, ret: TypeExpr) -> Self {
        FunctionDecl {
            name: name.into(),
            rename: None,
            doc: None,
            deprecated: None,
            cache: None,
            ret,
            params: Vec::new(),
            origin: None,
        }
    }

    /// Override the wire name.
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Attach documentation.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    /// Attach a deprecation notice.
    pub fn deprecated(mut self, note: impl Into<String>) -> Self {
        self.deprecated = Some(note.into());
        self
    }

    /// Request cache behavior.
    pub fn cache(mut self, cache: CacheDecl) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Append a parameter.
    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    /// Attach a source hint.
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// A declared constructor.
///
/// `marked` models an explicit constructor attribute in the host program; at
/// most one constructor per object may be marked.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstructorDecl {
    /// Parameters, in declaration order.
    pub params: Vec<ParamDecl>,
    /// Whether the declaration carries the explicit constructor mark.
    pub marked: bool,
}

impl ConstructorDecl {
    /// Create an empty, unmarked constructor.
    pub fn new() -> Self {
        ConstructorDecl::default()
    }

    /// Append a parameter.
    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    /// Set the explicit constructor mark.
    pub fn marked(mut self) -> Self {
        self.marked = true;
        self
    }
}

/// A declared object type.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDecl {
    /// Type name as declared.
    pub name: String,
    /// Documentation text.
    pub doc: Option<String>,
    /// Deprecation notice.
    pub deprecated: Option<String>,
    /// Whether the type is exported to the schema. Types present in the
    /// catalog but not exposed may only be referenced through an error.
    pub exposed: bool,
    /// Declared constructors, in declaration order.
    pub constructors: Vec<ConstructorDecl>,
    /// Declared fields, in declaration order.
    pub fields: Vec<FieldDecl>,
    /// Declared functions, in declaration order.
    pub functions: Vec<FunctionDecl>,
    /// Source hint for diagnostics.
    pub origin: Option<Origin>,
}

impl ObjectDecl {
    /// Create an exposed object declaration.
    pub fn new(name: impl Into<String>) -> Self {
        ObjectDecl {
            name: name.into(),
            doc: None,
            deprecated: None,
            exposed: true,
            constructors: Vec::new(),
            fields: Vec::new(),
            functions: Vec::new(),
            origin: None,
        }
    }

    /// Attach documentation.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    /// Attach a deprecation notice.
    pub fn deprecated(mut self, note: impl Into<String>) -> Self {
        self.deprecated = Some(note.into());
        self
    }

    /// Keep the type out of the schema while leaving it in the catalog.
    pub fn internal(mut self) -> Self {
        self.exposed = false;
        self
    }

    /// Append a constructor.
    pub fn constructor(mut self, ctor: ConstructorDecl) -> Self {
        self.constructors.push(ctor);
        self
    }

    /// Append a field.
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a function.
    pub fn function(mut self, function: FunctionDecl) -> Self {
        self.functions.push(function);
        self
    }

    /// Attach a source hint.
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// A declared interface type.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    /// Type name as declared.
    pub name: String,
    /// Documentation text.
    pub doc: Option<String>,
    /// Whether the type is exported to the schema.
    pub exposed: bool,
    /// Declared functions, in declaration order.
    pub functions: Vec<FunctionDecl>,
    /// Field-like members. Collected catalogs may carry them; the schema
    /// drops them because the registry cannot represent interface fields.
    pub fields: Vec<FieldDecl>,
    /// Source hint for diagnostics.
    pub origin: Option<Origin>,
}

impl InterfaceDecl {
    /// Create an exposed interface declaration.
    pub fn new(name: impl Into<String>) -> Self {
        InterfaceDecl {
            name: name.into(),
            doc: None,
            exposed: true,
            functions: Vec::new(),
            fields: Vec::new(),
            origin: None,
        }
    }

    /// Attach documentation.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    /// Keep the type out of the schema while leaving it in the catalog.
    pub fn internal(mut self) -> Self {
        self.exposed = false;
        self
    }

    /// Append a function.
    pub fn function(mut self, function: FunctionDecl) -> Self {
        self.functions.push(function);
        self
    }

    /// Append a field-like member (dropped at collection).
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    /// Attach a source hint.
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// One declared enum member.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMemberDecl {
    /// Member identifier.
    pub name: String,
    /// Explicit wire value. A missing value is a collection error.
    pub value: Option<String>,
    /// Documentation text.
    pub doc: Option<String>,
    /// Deprecation notice.
    pub deprecated: Option<String>,
}

impl EnumMemberDecl {
    /// Create a member with an explicit wire value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        EnumMemberDecl {
            name: name.into(),
            value: Some(value.into()),
            doc: None,
            deprecated: None,
        }
    }

    /// Create a member without a wire value. Collection rejects these; the
    /// constructor exists so catalog producers can surface the error through
    /// the collector instead of inventing a value.
    pub fn unvalued(name: impl Into<String>) -> Self {
        EnumMemberDecl {
            name: name.into(),
            value: None,
            doc: None,
            deprecated: None,
        }
    }

    /// Attach documentation.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    /// Attach a deprecation notice.
    pub fn deprecated(mut self, note: impl Into<String>) -> Self {
        self.deprecated = Some(note.into());
        self
    }
}

/// A declared enum type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    /// Type name as declared.
    pub name: String,
    /// Documentation text.
    pub doc: Option<String>,
    /// Whether the type is exported to the schema.
    pub exposed: bool,
    /// Members, in declaration order.
    pub members: Vec<EnumMemberDecl>,
    /// Source hint for diagnostics.
    pub origin: Option<Origin>,
}

impl EnumDecl {
    /// Create an exposed enum declaration.
    pub fn new(name: impl Into<String>) -> Self {
        EnumDecl {
            name: name.into(),
            doc: None,
            exposed: true,
            members: Vec::new(),
            origin: None,
        }
    }

    /// Attach documentation.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    /// Keep the type out of the schema while leaving it in the catalog.
    pub fn internal(mut self) -> Self {
        self.exposed = false;
        self
    }

    /// Append a member.
    pub fn member(mut self, member: EnumMemberDecl) -> Self {
        self.members.push(member);
        self
    }

    /// Attach a source hint.
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// What a type alias stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum AliasKind {
    /// Alias of a primitive expression.
    Primitive(TypeExpr),
    /// Alias of an object-shaped structure; promoted to a synthetic object
    /// component whose properties become fields.
    Object(Vec<FieldDecl>),
    /// Alias of an intersection/union-like brand; resolves to a scalar.
    Opaque,
}

/// A declared type alias.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasDecl {
    /// Alias name as declared.
    pub name: String,
    /// What the alias stands for.
    pub kind: AliasKind,
    /// Documentation text.
    pub doc: Option<String>,
    /// Source hint for diagnostics.
    pub origin: Option<Origin>,
}

impl AliasDecl {
    /// Create an alias declaration.
    pub fn new(name: impl Into<String>, kind: AliasKind) -> Self {
        AliasDecl {
            name: name.into(),
            kind,
            doc: None,
            origin: None,
        }
    }

    /// Attach documentation.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    /// Attach a source hint.
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}
