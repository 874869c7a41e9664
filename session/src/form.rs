//! Auth modal logic: mode labels, signup validation, error messages, submit.
//!
//! DESIGN
//! ======
//! The Leptos modal only binds inputs and renders strings; everything that
//! decides what happens on submit lives here so it runs natively under test.
//! Validation failures return before the coordinator is touched, so they
//! never reach the network.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use crate::coordinator::SessionCoordinator;
use crate::error::AuthError;
use crate::identity::IdentityErrorKind;

pub const MIN_PASSWORD_LEN: usize = 6;

const GENERIC_ERROR: &str = "An error occurred. Please try again.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    /// Parse a mode from a route segment or query value.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "login" => Some(Self::Login),
            "signup" | "register" => Some(Self::Signup),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Welcome Back!",
            Self::Signup => "Create Account",
        }
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Signup => "Create Account",
        }
    }

    #[must_use]
    pub fn busy_label(self) -> &'static str {
        match self {
            Self::Login => "Signing In...",
            Self::Signup => "Creating Account...",
        }
    }

    /// Footer prompt and link text for switching to the other mode.
    #[must_use]
    pub fn switch_prompt(self) -> (&'static str, &'static str) {
        match self {
            Self::Login => ("Don't have an account?", "Sign up here"),
            Self::Signup => ("Already have an account?", "Sign in here"),
        }
    }
}

/// Check signup inputs, reporting the first failing rule.
///
/// # Errors
///
/// The inline message for the first rule that fails.
pub fn validate_signup(name: &str, password: &str, confirm_password: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name is required");
    }
    if password != confirm_password {
        return Err("Passwords do not match");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

/// User-facing message for a failed login or signup.
///
/// Only a backend sync failure depends on `mode`: the user is signed in
/// either way, but only signup has just created the account.
#[must_use]
pub fn error_message(mode: AuthMode, err: &AuthError) -> &'static str {
    match err {
        AuthError::Identity(e) => match e.kind {
            IdentityErrorKind::EmailAlreadyInUse => "Email is already registered. Try logging in instead.",
            IdentityErrorKind::WeakCredential => "Password is too weak. Use at least 6 characters.",
            IdentityErrorKind::InvalidEmail => "Invalid email address.",
            IdentityErrorKind::UserNotFound => "No account found with this email.",
            IdentityErrorKind::WrongCredential => "Incorrect password.",
            IdentityErrorKind::RateLimited => "Too many failed attempts. Please try again later.",
            IdentityErrorKind::Unknown => GENERIC_ERROR,
        },
        AuthError::BackendSync(_) => match mode {
            AuthMode::Signup => {
                "Your account was created, but we couldn't finish setting it up. Use \"Try again\" on your dashboard."
            }
            AuthMode::Login => "You're signed in, but we couldn't load your account. Use \"Try again\" on your dashboard.",
        },
        AuthError::Api(_) | AuthError::SignedOut => GENERIC_ERROR,
    }
}

/// Raw modal inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthFields {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl AuthFields {
    #[must_use]
    pub fn new(mode: AuthMode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Clear every input, keeping the mode.
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }
}

/// Validate and submit the modal.
///
/// # Errors
///
/// The inline message to show: a validation message, or `error_message` of
/// the coordinator failure.
pub async fn submit_auth(coordinator: &SessionCoordinator, fields: &AuthFields) -> Result<(), String> {
    let result = match fields.mode {
        AuthMode::Signup => {
            validate_signup(&fields.name, &fields.password, &fields.confirm_password)?;
            coordinator
                .signup(fields.email.trim(), &fields.password, fields.name.trim())
                .await
                .map(|_| ())
        }
        AuthMode::Login => coordinator
            .login(fields.email.trim(), &fields.password)
            .await
            .map(|_| ()),
    };
    result.map_err(|e| {
        log::error!("auth error: {e}");
        error_message(fields.mode, &e).to_owned()
    })
}

/// Busy flag and inline error shown by the modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthFormState {
    pub busy: bool,
    pub error: Option<String>,
}

impl AuthFormState {
    /// Enter the submitting state, clearing any previous error.
    pub fn begin(&mut self) {
        self.busy = true;
        self.error = None;
    }

    /// Leave the submitting state. Returns true on success.
    pub fn finish(&mut self, result: Result<(), String>) -> bool {
        self.busy = false;
        match result {
            Ok(()) => true,
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }
}
