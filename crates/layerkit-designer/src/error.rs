//! Error types for the designer crate.

use thiserror::Error;

/// Errors from layer collection operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// No layer with this id exists.
    #[error("Layer not found: {id}")]
    NotFound { id: String },

    /// A layer with this id already exists.
    #[error("Layer already exists: {id}")]
    DuplicateId { id: String },
}

/// Result type alias for layer operations.
pub type LayerResult<T> = Result<T, LayerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_error_display() {
        let err = LayerError::NotFound {
            id: "bg".to_string(),
        };
        assert_eq!(err.to_string(), "Layer not found: bg");

        let err = LayerError::DuplicateId {
            id: "bg".to_string(),
        };
        assert_eq!(err.to_string(), "Layer already exists: bg");
    }
}
