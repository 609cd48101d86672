//! Inline field validation.
//!
//! Validation failures are state, not errors: a field is either normal or
//! carries a warning message the view renders next to it.

/// Display state of one input field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Normal,
    Warning(String),
}

impl FieldState {
    pub fn is_warning(&self) -> bool {
        matches!(self, FieldState::Warning(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FieldState::Normal => None,
            FieldState::Warning(message) => Some(message),
        }
    }
}

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Required-field check.
pub fn validate_required(value: &str, label: &str) -> FieldState {
    if value.trim().is_empty() {
        FieldState::Warning(format!("Enter your {label}"))
    } else {
        FieldState::Normal
    }
}

/// Loose shape check for an email address.
pub fn validate_email(value: &str) -> FieldState {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldState::Warning("Enter your email".to_string());
    }
    let looks_like_email = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if looks_like_email {
        FieldState::Normal
    } else {
        FieldState::Warning("Enter a valid email".to_string())
    }
}

/// Minimal strength check for a new password.
pub fn validate_password_strength(password: &str) -> FieldState {
    if password.len() < MIN_PASSWORD_LEN {
        return FieldState::Warning(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    let mut chars = password.chars();
    let first = chars.next();
    if let Some(first) = first {
        if chars.all(|c| c == first) {
            return FieldState::Warning("Password is too predictable".to_string());
        }
    }
    FieldState::Normal
}
