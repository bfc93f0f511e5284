use std::num::ParseIntError;

/// Boxed error returned by a [`UserDirectory`](crate::UserDirectory) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum TestkitError {
    /// The requested path is absent from the document.
    #[error("path {path} not found")]
    NotFound { path: String },
    /// A value exists at the path but is not an unsigned integer.
    #[error("value '{value}' at {path} is not numeric: {source}")]
    Parse {
        /// Path that was queried.
        path: String,
        /// Raw text found at the path.
        value: String,
        #[source]
        source: ParseIntError,
    },
    /// The identity lookup for a user failed.
    #[error("cannot resolve user '{user}': {source}")]
    Resolution {
        user: String,
        #[source]
        source: BoxError,
    },
    /// Malformed XML document.
    #[error("document error: {0}")]
    Document(String),
}
