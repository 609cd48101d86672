//! Authentication boundary.
//!
//! Sessions and credentials cross this interface; passwords travel as
//! [`SecureString`] so they cannot end up in logs by accident.

use thiserror::Error;

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when handing it to the SDK.
#[derive(Clone)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value. Use sparingly.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Email of the logged-in user.
    pub user_email: String,
}

/// Errors surfaced by the authentication SDK.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Username/password pair rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account has two-factor enabled; retry with a PIN.
    #[error("two-factor authentication required")]
    TwoFactorRequired,

    /// The supplied two-factor PIN was rejected.
    #[error("invalid two-factor pin")]
    TwoFactorInvalid,

    /// Too many failed attempts; the account is temporarily locked.
    #[error("too many attempts")]
    TooManyAttempts,

    /// Transport-level failure talking to the service.
    #[error("network failure: {message}")]
    Network { message: String },
}

/// Login, session, and password-check operations.
pub trait AuthService: Send + Sync {
    fn login(&self, username: &str, password: &SecureString) -> Result<Session, AuthError>;

    fn login_with_two_factor(
        &self,
        username: &str,
        password: &SecureString,
        pin: &str,
    ) -> Result<Session, AuthError>;

    /// The active session, if any.
    fn current_session(&self) -> Option<Session>;

    /// Check a password against the current session's account without
    /// logging in (password-reminder test).
    fn verify_password(&self, password: &SecureString) -> Result<bool, AuthError>;

    fn logout(&self) -> Result<(), AuthError>;
}
