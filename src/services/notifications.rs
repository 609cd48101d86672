//! OS-level local notification scheduling.

use std::time::Duration;

use thiserror::Error;

/// When a scheduled notification fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTrigger {
    Immediate,
    After(Duration),
}

/// One notification to schedule, keyed by a caller-chosen id so it can be
/// replaced or cancelled later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub id: String,
    pub title: String,
    pub body: String,
    pub trigger: NotificationTrigger,
}

/// Errors from the platform notification center.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("notification permission denied")]
    PermissionDenied,

    #[error("notification scheduling failed: {message}")]
    Failed { message: String },
}

/// Platform notification scheduling, supplied by the host shell.
pub trait NotificationScheduling: Send + Sync {
    fn request(&self, request: NotificationRequest) -> Result<(), NotifyError>;

    /// Cancel any pending notifications with the given ids. Unknown ids
    /// are ignored.
    fn cancel(&self, ids: &[String]);
}
