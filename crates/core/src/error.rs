use thiserror::Error;

/// Errors raised by the block registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A kind with this name is already registered.
    #[error("block kind already registered: {name}")]
    DuplicateKind {
        /// Block kind name
        name: String,
    },
    /// No kind with this name is registered.
    #[error("unknown block kind: {name}")]
    UnknownKind {
        /// Block kind name
        name: String,
    },
    /// The descriptor is structurally invalid.
    #[error("invalid block kind {name:?}: {message}")]
    InvalidKind {
        /// Block kind name (may be empty)
        name: String,
        /// What is wrong with it
        message: String,
    },
    /// A serialized kind definition could not be decoded.
    #[error("Definition error: {0}")]
    Definition(#[from] serde_json::Error),
}

impl RegistryError {
    /// Create an unknown kind error
    pub fn unknown_kind(name: impl Into<String>) -> Self {
        Self::UnknownKind { name: name.into() }
    }

    /// Create a duplicate kind error
    pub fn duplicate_kind(name: impl Into<String>) -> Self {
        Self::DuplicateKind { name: name.into() }
    }

    /// Create an invalid kind error
    pub fn invalid_kind(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidKind {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Failure reported by a kind source while fetching.
///
/// A fetch resolves with either a non-empty payload or one of these, never both.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The transport answered with a failing status code.
    #[error("fetch failed, code {0}")]
    Status(u16),
    /// Any other failure, with a human-readable message.
    #[error("{0}")]
    Failed(String),
}

impl FetchError {
    /// Create a generic failure; an empty message becomes `"fetch failed"`.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Failed("fetch failed".to_string())
        } else {
            Self::Failed(message)
        }
    }
}

/// Errors from loading kinds out of a [`crate::source::KindSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// The fetch itself failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The payload was fetched but could not be registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The source never invoked its completion callback.
    #[error("kind source did not complete")]
    Incomplete,
}
