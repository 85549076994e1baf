//! Error types for push-log resolution.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors produced by push-log resolution.
///
/// None of these are recovered locally: every failure aborts the resolution
/// call and is returned to the bisection engine.
#[derive(Debug, Error)]
pub enum PushlogError {
    /// The endpoint returned 404 for a constructed query.
    #[error("the url {url} returned a 404 error; please check the validity of the requested range")]
    NotFound { url: String },

    /// The endpoint answered with a valid but empty push object.
    #[error("the url {url} contains no pushes; maybe use another range?")]
    EmptyPushlog { url: String },

    /// A branch name the branch table does not know.
    #[error("unknown branch: {branch}")]
    UnknownBranch { branch: String },

    /// Transport-level failure, propagated as-is.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, PushlogError>;
