//! Error types for query compilation, serialization and page fetching
//!
//! Every failure aborts the operation in flight and carries enough context to
//! diagnose it without re-running: the rendered expression for compilation
//! errors, the request URL for transport and decode errors, and the serialized
//! query for pagination errors.
//!
//! # Example
//!
//! ```rust
//! use dofusdb_client::error::Error;
//!
//! let error = Error::invalid_expression("i => (i.level + 1)", "unsupported operator");
//! assert!(!error.is_retriable());
//! assert!(error.to_string().contains("i => (i.level + 1)"));
//! ```

use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the query layer and the result reader
#[derive(Debug, Error)]
pub enum Error {
    /// The expression compiler met an expression shape it does not recognize
    #[error("Invalid expression `{expression}`: {reason}")]
    InvalidExpression {
        /// The offending expression, rendered for diagnostics
        expression: String,
        /// Why the shape was rejected
        reason: String,
    },

    /// A predicate variant fell outside the negation or serialization tables
    #[error("Unsupported predicate kind: {0}")]
    UnsupportedPredicateKind(String),

    /// The network call failed or the server answered with a non-success status
    #[error("Transport error for {url}{}: {message}", status_suffix(.status))]
    Transport {
        /// Request URL
        url: String,
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Underlying error message
        message: String,
    },

    /// The response envelope could not be decoded
    #[error("Decode error for {url}: {message}")]
    Decode {
        /// Request URL
        url: String,
        /// Underlying error message
        message: String,
    },

    /// A page request failed while paginating
    #[error("Error while executing query `{query}`: {source}")]
    Page {
        /// The serialized query that was in flight
        query: String,
        /// The failure reported by the reader
        #[source]
        source: Box<Error>,
    },

    /// Pagination was cancelled by the caller
    #[error("Search cancelled")]
    Cancelled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// A base URL or resource path could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {})", s)).unwrap_or_default()
}

impl Error {
    /// Create an `InvalidExpression` error
    pub fn invalid_expression(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidExpression {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Create a transport error
    pub fn transport(url: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Wrap a reader failure with the query that was in flight
    pub fn page(query: impl Into<String>, source: Error) -> Self {
        Self::Page {
            query: query.into(),
            source: Box::new(source),
        }
    }

    /// Check whether this error (or the page failure it wraps) came from the transport
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Page { source, .. } => source.is_transport(),
            _ => false,
        }
    }

    /// Check if a caller may reasonably retry the operation
    ///
    /// This layer never retries on its own. Network failures and 5xx/429
    /// statuses are transient; everything else is permanent.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Transport { status: None, .. } => true,
            Self::Transport {
                status: Some(status),
                ..
            } => *status == 429 || *status >= 500,
            Self::Page { source, .. } => source.is_retriable(),
            _ => false,
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_expression_display() {
        let error = Error::invalid_expression("i => i.name", "not a predicate");
        assert_eq!(
            error.to_string(),
            "Invalid expression `i => i.name`: not a predicate"
        );
    }

    #[test]
    fn test_transport_display_with_status() {
        let error = Error::transport("https://api.dofusdb.fr/items/", Some(503), "unavailable");
        let display = error.to_string();
        assert!(display.contains("(status 503)"));
        assert!(display.contains("https://api.dofusdb.fr/items/"));
    }

    #[test]
    fn test_transport_display_without_status() {
        let error = Error::transport("https://api.dofusdb.fr/items/", None, "connection refused");
        assert!(!error.to_string().contains("status"));
    }

    #[test]
    fn test_page_wraps_source() {
        let error = Error::page(
            "$limit=10&$skip=20",
            Error::decode("https://api.dofusdb.fr/items/", "missing field `total`"),
        );
        let display = error.to_string();
        assert!(display.contains("$limit=10&$skip=20"));
        assert!(display.contains("missing field `total`"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_is_transport_sees_through_page() {
        let error = Error::page("", Error::transport("u", Some(404), "not found"));
        assert!(error.is_transport());
        assert!(!Error::Cancelled.is_transport());
    }

    #[test]
    fn test_is_retriable_transient_errors() {
        assert!(Error::transport("u", None, "reset").is_retriable());
        assert!(Error::transport("u", Some(502), "bad gateway").is_retriable());
        assert!(Error::transport("u", Some(429), "slow down").is_retriable());
        assert!(Error::page("q", Error::transport("u", Some(500), "boom")).is_retriable());
    }

    #[test]
    fn test_is_retriable_permanent_errors() {
        assert!(!Error::transport("u", Some(404), "not found").is_retriable());
        assert!(!Error::decode("u", "bad json").is_retriable());
        assert!(!Error::invalid_expression("x", "y").is_retriable());
        assert!(!Error::UnsupportedPredicateKind("Xor".to_string()).is_retriable());
        assert!(!Error::Cancelled.is_retriable());
    }
}
