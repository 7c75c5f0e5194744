//! The assembled module schema

use serde::{Deserialize, Serialize};

use crate::component::{EnumDef, InterfaceDef, ObjectDef};

/// Everything a module exposes, fully assembled.
///
/// Built once per process invocation, immutable once resolved, discarded at
/// exit. Persistence is the external registry's responsibility.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSchema {
    /// Module name.
    pub name: String,
    /// Module-level documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object components, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<ObjectDef>,
    /// Interface components, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<InterfaceDef>,
    /// Enum components, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumDef>,
}

impl ModuleSchema {
    /// Create an empty schema for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        ModuleSchema {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up an object component by name.
    pub fn object(&self, name: &str) -> Option<&ObjectDef> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Look up an interface component by name.
    pub fn interface(&self, name: &str) -> Option<&InterfaceDef> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Look up an enum component by name.
    pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Whether any component with this name exists, of any kind.
    pub fn contains(&self, name: &str) -> bool {
        self.object(name).is_some()
            || self.interface(name).is_some()
            || self.enum_def(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_by_kind() {
        let mut schema = ModuleSchema::new("demo");
        schema.objects.push(ObjectDef::new("Greeter"));
        schema.interfaces.push(InterfaceDef::new("Fetcher"));
        schema.enums.push(EnumDef::new("Severity"));

        assert!(schema.object("Greeter").is_some());
        assert!(schema.object("Fetcher").is_none());
        assert!(schema.interface("Fetcher").is_some());
        assert!(schema.enum_def("Severity").is_some());
        assert!(schema.contains("Greeter"));
        assert!(!schema.contains("Absent"));
    }
}
