//! # session
//!
//! Platform-neutral auth/session core for the Travel Companion frontend.
//!
//! This crate owns everything about "who is signed in" that does not need a
//! browser: the token store, the HTTP transport seam, the REST API client with
//! its 401 interceptor, the identity-provider seam and its Firebase REST
//! adapter, the session coordinator, route guards, and auth form logic. The
//! `client` crate plugs browser implementations into the trait seams.

pub mod api;
pub mod coordinator;
pub mod error;
pub mod firebase;
pub mod form;
pub mod guard;
pub mod http;
pub mod identity;
pub mod state;
pub mod storage;
pub mod types;

pub use api::ApiClient;
pub use coordinator::{SessionCoordinator, SessionStream};
pub use error::{ApiError, AuthError};
pub use identity::{Identity, IdentityError, IdentityErrorKind, IdentityProvider};
pub use state::{Session, SessionStatus};

#[cfg(test)]
pub(crate) mod test_helpers;
