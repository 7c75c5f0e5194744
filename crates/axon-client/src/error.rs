//! Engine transport errors

use thiserror::Error;

/// Errors crossing the engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The transport failed before the engine answered.
    #[error("engine transport failed: {0}")]
    Transport(String),

    /// The engine answered with a rejection.
    #[error("engine rejected the request: {0}")]
    Rejected(String),

    /// The engine's response lacked the selected payload.
    #[error("engine response has no data for query {query:?}")]
    MissingData {
        /// The rendered query whose payload was absent.
        query: String,
    },

    /// The engine's response could not be decoded.
    #[error("engine response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EngineError::MissingData {
            query: "container { id }".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "engine response has no data for query \"container { id }\""
        );
    }
}
