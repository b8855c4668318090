//! Error types for review mutations
//!
//! Every variant is recoverable per request. GraphQL resolvers convert these into
//! `async_graphql::Error` values carrying a machine-readable `code` extension.

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::db::ReviewKind;

/// Failure of a review mutation. No event is published when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// The target review id does not exist in its collection
    #[error("{kind} review {id} not found")]
    NotFound { kind: ReviewKind, id: String },

    /// Review input or edits failed validation
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The collection's id counter has no values left
    #[error("no {0} review ids left")]
    IdsExhausted(ReviewKind),
}

impl ReviewError {
    pub fn not_found(kind: ReviewKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Stable code exposed to clients in `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::IdsExhausted(_) => "IDS_EXHAUSTED",
        }
    }
}

impl ErrorExtensions for ReviewError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

pub type ReviewResult<T> = std::result::Result<T, ReviewError>;
