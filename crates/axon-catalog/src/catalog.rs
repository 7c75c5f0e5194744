//! The catalog container

use crate::decl::{AliasDecl, EnumDecl, InterfaceDecl, ObjectDecl};

/// Everything the host program declares, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    /// Module name.
    pub name: String,
    /// Module-level documentation.
    pub description: Option<String>,
    /// Object declarations.
    pub objects: Vec<ObjectDecl>,
    /// Interface declarations.
    pub interfaces: Vec<InterfaceDecl>,
    /// Enum declarations.
    pub enums: Vec<EnumDecl>,
    /// Type alias declarations.
    pub aliases: Vec<AliasDecl>,
}

impl Catalog {
    /// Create an empty catalog for the named module.
    pub fn new(name: impl Into<String>) -> Self {
        Catalog {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attach module-level documentation.
    pub fn describe(&mut self, text: impl Into<String>) -> &mut Self {
        self.description = Some(text.into());
        self
    }

    /// Add an object declaration.
    pub fn add_object(&mut self, decl: ObjectDecl) -> &mut Self {
        self.objects.push(decl);
        self
    }

    /// Add an interface declaration.
    pub fn add_interface(&mut self, decl: InterfaceDecl) -> &mut Self {
        self.interfaces.push(decl);
        self
    }

    /// Add an enum declaration.
    pub fn add_enum(&mut self, decl: EnumDecl) -> &mut Self {
        self.enums.push(decl);
        self
    }

    /// Add a type alias declaration.
    pub fn add_alias(&mut self, decl: AliasDecl) -> &mut Self {
        self.aliases.push(decl);
        self
    }

    /// Look up an object declaration by name.
    pub fn object(&self, name: &str) -> Option<&ObjectDecl> {
        self.objects.iter().find(|d| d.name == name)
    }

    /// Look up an interface declaration by name.
    pub fn interface(&self, name: &str) -> Option<&InterfaceDecl> {
        self.interfaces.iter().find(|d| d.name == name)
    }

    /// Look up an enum declaration by name.
    pub fn enum_decl(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.iter().find(|d| d.name == name)
    }

    /// Look up an alias declaration by name.
    pub fn alias(&self, name: &str) -> Option<&AliasDecl> {
        self.aliases.iter().find(|d| d.name == name)
    }
}
