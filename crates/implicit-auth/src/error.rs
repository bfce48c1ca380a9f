//! Error types for implicit-grant responses and token persistence

/// Errors surfaced through a login attempt's failure path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The redirect fragment carried an `error` key. `description` and `uri`
    /// already hold their ` (...)` / `; see: ...` decoration, or are empty.
    #[error("Error from provider: {error}{description}{uri}")]
    Provider {
        error: String,
        description: String,
        uri: String,
    },

    /// Neither `error` nor `access_token` was found in the fragment.
    #[error("Could not find access_token in hash {fragment}")]
    MalformedResponse { fragment: String },

    #[error("token store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;
