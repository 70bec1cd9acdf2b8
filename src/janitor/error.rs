//! Teardown Error Types
//!
//! Teardown failures never leave a disposal pass; they are caught at the
//! frame of the trackable that raised them and reported through diagnostics.
//! Panics are caught at the same frame and arrive here as `Panicked`.

use crate::core::error_handling::ContextualError;
use std::any::Any;

#[derive(Debug, thiserror::Error)]
pub enum TeardownError {
    #[error("{operation} failed: {message}")]
    Failed { operation: String, message: String },

    #[error("could not detach children of '{name}': {message}")]
    Detach { name: String, message: String },

    /// A teardown panicked; the payload message is kept when it is a string
    #[error("teardown panicked: {message}")]
    Panicked { message: String },

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl TeardownError {
    pub fn failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        TeardownError::Failed {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn detach(name: impl Into<String>, message: impl Into<String>) -> Self {
        TeardownError::Detach {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Wrap the payload caught from a panicking teardown
    pub fn panicked(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast_ref::<&'static str>() {
                Some(message) => (*message).to_string(),
                None => "non-string panic payload".to_string(),
            },
        };
        TeardownError::Panicked { message }
    }

    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        TeardownError::Other(Box::new(error))
    }
}

impl ContextualError for TeardownError {
    fn is_user_actionable(&self) -> bool {
        // A teardown that raised a specific message said exactly what went wrong.
        matches!(self, TeardownError::Failed { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            TeardownError::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result of a single teardown action
pub type TeardownResult = Result<(), TeardownError>;
