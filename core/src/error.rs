//! Error types for the request builder.
//!
//! # Design
//! Both build failures are local to this crate and never retried here.
//! `Transport` only wraps whatever a caller-supplied transport reports from
//! `Router::send`.

use thiserror::Error;

use crate::operation::OperationKind;

/// Errors returned by `Router::build` and `Router::send`.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The resource cannot produce a path fragment for this operation, or the
    /// operation is missing the identifier it needs.
    #[error("invalid resource for {operation}: {reason}")]
    InvalidResource {
        operation: OperationKind,
        reason: String,
    },

    /// The parameters could not be form-encoded.
    #[error("encoding failed: {0}")]
    EncodingError(String),

    /// The transport failed to execute a built request.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl RouterError {
    pub(crate) fn invalid_resource(operation: OperationKind, reason: impl Into<String>) -> Self {
        RouterError::InvalidResource {
            operation,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_resource_message_names_operation() {
        let err = RouterError::invalid_resource(OperationKind::Destroy, "missing identifier");
        assert_eq!(err.to_string(), "invalid resource for destroy: missing identifier");
    }

    #[test]
    fn encoding_error_message() {
        let err = RouterError::EncodingError("bad".to_string());
        assert_eq!(err.to_string(), "encoding failed: bad");
    }
}
