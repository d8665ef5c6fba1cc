//! Error types shared by the API client and the form layer.

use std::collections::BTreeMap;

/// What went wrong underneath an API operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiErrorKind {
    #[error("network error: {0}")]
    Network(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("invalid request body: {0}")]
    Encode(String),
}

/// Failure of one API operation, wrapped with the operation's context
/// (e.g. "Failed to fetch customers").
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{context}: {kind}")]
pub struct ApiError {
    pub context: String,
    #[source]
    pub kind: ApiErrorKind,
}

impl ApiError {
    pub fn new(context: impl Into<String>, kind: ApiErrorKind) -> Self {
        Self {
            context: context.into(),
            kind,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Unauthorized)
    }

    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ApiErrorKind::Unauthorized => Some(401),
            ApiErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for a toast: the server's message when it sent one,
    /// otherwise the operation context.
    pub fn user_message(&self) -> String {
        match &self.kind {
            ApiErrorKind::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => self.context.clone(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Inline, per-field form errors. Ordered so rendering is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("validation failed for {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First message for a field, which is what the forms display.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

/// Failure to turn a form into a request: either the form is invalid or
/// the body could not be encoded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FieldErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ApiError::new(
            "Failed to create customer",
            ApiErrorKind::Status {
                status: 409,
                message: "Telefone já cadastrado".to_string(),
            },
        );
        assert_eq!(err.user_message(), "Telefone já cadastrado");
        assert_eq!(err.status(), Some(409));

        let err = ApiError::new(
            "Failed to fetch services",
            ApiErrorKind::Network("connection refused".to_string()),
        );
        assert_eq!(err.user_message(), "Failed to fetch services");
        assert_eq!(err.to_string(), "Failed to fetch services: network error: connection refused");
    }

    #[test]
    fn test_unauthorized_reports_401() {
        let err = ApiError::new("Failed to fetch users", ApiErrorKind::Unauthorized);
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
    }
}
