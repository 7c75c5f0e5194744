//! Wire-name derivation
//!
//! Function, field and argument names convert to lower camel case on the
//! wire. Conversion results are memoized process-wide; discovery output does
//! not change within a process lifetime, so the cache is append-only and
//! first-writer-wins.

use heck::ToLowerCamelCase;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// Names longer than this are converted without touching the cache.
const MEMO_LIMIT: usize = 100;

static CAMEL_CACHE: Lazy<Mutex<FxHashMap<String, String>>> =
    Lazy::new(|| Mutex::new(FxHashMap::default()));

/// Convert a declared name to its lower-camel-case wire form.
pub fn wire_name(name: &str) -> String {
    if name.len() >= MEMO_LIMIT {
        return name.to_lower_camel_case();
    }
    if let Some(hit) = CAMEL_CACHE.lock().get(name) {
        return hit.clone();
    }
    let converted = name.to_lower_camel_case();
    CAMEL_CACHE
        .lock()
        .insert(name.to_string(), converted.clone());
    converted
}
