//! Routing error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("Invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Route table has no fallback (`*`) entry")]
    MissingFallback,

    #[error("Route table has more than one fallback entry")]
    DuplicateFallback,

    #[error("Fallback entry must be last, found {0:?} after it")]
    FallbackNotLast(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Redirect loop starting at {from} ({hops} hops)")]
    RedirectLoop { from: String, hops: usize },
}
