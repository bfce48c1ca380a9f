//! Error types for login attempts

/// Errors delivered through a login attempt's failure path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Provider error, malformed redirect, or token store failure
    #[error(transparent)]
    Auth(#[from] implicit_auth::Error),

    #[error("no login attempt is pending")]
    NoPendingLogin,

    #[error("login attempt superseded by a newer request")]
    Superseded,

    #[error("authorization channel failed: {0}")]
    Channel(String),
}

/// Result alias for login operations.
pub type Result<T> = std::result::Result<T, Error>;
