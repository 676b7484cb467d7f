//! Errors raised while reading the document store.
//!
//! A store failure never aborts the process: view processors turn it into an
//! error status with a per-page prefix, and the HTTP layer maps the variant
//! to a status code.

use std::fmt;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Where in the store a failure happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    pub operation: Option<String>,
    pub collection: Option<String>,
    pub document: Option<String>,
    pub detail: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = Some(name.into());
        self
    }

    pub fn document(mut self, id: impl Into<String>) -> Self {
        self.document = Some(id.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.operation.is_none()
            && self.collection.is_none()
            && self.document.is_none()
            && self.detail.is_none()
    }
}

// Renders as ` (during fetch_collection, at sleep/2024-01-01, detail)`, or
// nothing when empty, so it can trail a message directly.
impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }

        let mut parts = Vec::with_capacity(3);
        if let Some(op) = &self.operation {
            parts.push(format!("during {}", op));
        }
        match (&self.collection, &self.document) {
            (Some(collection), Some(document)) => {
                parts.push(format!("at {}/{}", collection, document))
            }
            (Some(collection), None) => parts.push(format!("at {}", collection)),
            (None, Some(document)) => parts.push(format!("at document {}", document)),
            (None, None) => {}
        }
        if let Some(detail) = &self.detail {
            parts.push(detail.clone());
        }
        write!(f, " ({})", parts.join(", "))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The store could not be reached.
    #[error("Store unreachable: {message}{context}")]
    Connection {
        message: String,
        context: ErrorContext,
    },

    /// The store answered the read with a failure.
    #[error("Store read failed: {message}{context}")]
    Query {
        message: String,
        context: ErrorContext,
    },

    /// A seed file or store response did not have the document shape.
    #[error("Malformed store data: {message}{context}")]
    Validation {
        message: String,
        context: ErrorContext,
    },

    /// The store could not be set up from the given settings.
    #[error("Configuration error: {message}{context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Replace the context wholesale.
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        *self.context_mut() = context;
        self
    }

    /// Record the operation that failed, keeping the rest of the context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Connection { context, .. }
            | Self::Query { context, .. }
            | Self::Validation { context, .. }
            | Self::Configuration { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Connection { context, .. }
            | Self::Query { context, .. }
            | Self::Validation { context, .. }
            | Self::Configuration { context, .. } => context,
        }
    }

    /// Whether the same read may succeed later unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

#[cfg(feature = "firestore-repo")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        let error = if err.is_connect() || err.is_timeout() {
            RepositoryError::connection(err.to_string())
        } else if err.is_decode() {
            RepositoryError::validation(format!("Undecodable response: {}", err))
        } else {
            RepositoryError::query(err.to_string())
        };
        error.in_context(ErrorContext::default().detail("http"))
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::validation(format!("Malformed document JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_failures_are_transient() {
        assert!(RepositoryError::connection("refused").is_transient());
        assert!(!RepositoryError::query("HTTP 403").is_transient());
        assert!(!RepositoryError::validation("not an object").is_transient());
    }

    #[test]
    fn test_display_trails_context() {
        let err = RepositoryError::query("HTTP 500")
            .in_context(ErrorContext::new("fetch_collection").collection("sleep"));
        assert_eq!(
            err.to_string(),
            "Store read failed: HTTP 500 (during fetch_collection, at sleep)"
        );

        let bare = RepositoryError::configuration("missing project id");
        assert_eq!(bare.to_string(), "Configuration error: missing project id");
    }

    #[test]
    fn test_document_context() {
        let context = ErrorContext::new("load_seed")
            .collection("duration")
            .document("2024-01-01")
            .detail("body is a number");
        assert_eq!(
            context.to_string(),
            " (during load_seed, at duration/2024-01-01, body is a number)"
        );
    }

    #[test]
    fn test_with_operation_keeps_collection() {
        let err = RepositoryError::connection("offline")
            .in_context(ErrorContext::default().collection("sleep"))
            .with_operation("fetch_collection");
        assert_eq!(err.context().operation.as_deref(), Some("fetch_collection"));
        assert_eq!(err.context().collection.as_deref(), Some("sleep"));
    }

    #[test]
    fn test_json_errors_are_validation_errors() {
        let err: RepositoryError = serde_json::from_str::<serde_json::Value>("{ nope")
            .unwrap_err()
            .into();
        assert!(matches!(err, RepositoryError::Validation { .. }));
    }
}
