//! Interface name registry
//!
//! The engine knows this module's interfaces under module-prefixed type
//! names; handlers and payloads use the local names. This process-wide map
//! translates between the two. It is populated at registration and again,
//! idempotently, before each dispatch, since registration and invocation
//! usually happen in different processes.

use axon_schema::ModuleSchema;
use heck::ToUpperCamelCase;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

static INTERFACES: Lazy<RwLock<FxHashMap<String, String>>> =
    Lazy::new(|| RwLock::new(FxHashMap::default()));

/// The engine-side type name an interface of `module` registers under.
pub fn interface_type_name(module: &str, local: &str) -> String {
    format!("{}{}", module.to_upper_camel_case(), local)
}

/// Record the engine-side name of every interface in `schema`. First writer
/// wins per interface, so repopulating in a warm process changes nothing.
pub(crate) fn populate(schema: &ModuleSchema) {
    if schema.interfaces.is_empty() {
        return;
    }
    let mut map = INTERFACES.write();
    for interface in &schema.interfaces {
        map.entry(interface.name.clone())
            .or_insert_with(|| interface_type_name(&schema.name, &interface.name));
    }
}

/// The registered engine-side name for a local interface, if any.
pub fn registered_interface(local: &str) -> Option<String> {
    INTERFACES.read().get(local).cloned()
}
