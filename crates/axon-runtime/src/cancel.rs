//! Cooperative cancellation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable cancellation flag handed to every handler.
///
/// The runtime sets it when the engine abandons the invocation; handlers
/// poll [`CancelToken::is_cancelled`] at convenient points and wind down.
/// Declared cancellation parameters never appear in the schema, so this is
/// the only way the signal reaches user code.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, unset token.
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Request cancellation. Visible to every clone of the token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
