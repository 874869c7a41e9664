//! Error taxonomy surfaced by the API client and session coordinator.
//!
//! ERROR HANDLING
//! ==============
//! Identity errors are classified, never retried, and turned into inline form
//! messages by `form::error_message`. API errors are logged where they happen
//! and returned to the calling screen; 401 additionally triggers the global
//! token-clear + redirect in `ApiClient`.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::identity::IdentityError;

/// Failure of a backend REST call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered 401. The token store has already been cleared
    /// and the login redirect issued.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-2xx status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },

    /// No response was received.
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

/// Failure of a session-coordinator operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The identity provider rejected the operation.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The identity operation succeeded but ensure-user failed; the provider
    /// account exists while the backend record may not.
    #[error("backend user sync failed: {0}")]
    BackendSync(ApiError),

    /// A privileged CRUD call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A privileged call was attempted with no signed-in identity.
    #[error("no signed-in user")]
    SignedOut,
}
