//! Persisted outcome of the password reminder.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::services::{PreferenceCache, PreferenceCacheExt};

/// Cache key holding the reminder outcome.
pub const REMINDER_OUTCOME_KEY: &str = "password_reminder.outcome";

/// What happened the last time the reminder was shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderOutcome {
    /// Never resolved; the reminder is still due.
    #[default]
    Pending,
    /// Dismissed without testing the password; show again later.
    Skipped,
    /// User opted out of the reminder permanently.
    Blocked,
    /// Password test passed; nothing left to remind about.
    Succeeded,
}

/// Records how the password reminder was resolved.
///
/// Writes are best-effort: a failed save must not block a logout, so
/// failures are logged and swallowed.
pub trait PasswordReminderRepository: Send + Sync {
    fn mark_skipped(&self);

    fn mark_blocked(&self);

    fn mark_succeeded(&self);

    fn outcome(&self) -> ReminderOutcome;
}

/// Repository persisting through the preference cache.
pub struct CachedReminderRepository {
    cache: Arc<dyn PreferenceCache>,
}

impl CachedReminderRepository {
    pub fn new(cache: Arc<dyn PreferenceCache>) -> Self {
        Self { cache }
    }

    fn store(&self, outcome: ReminderOutcome) {
        if let Err(err) = self.cache.save(REMINDER_OUTCOME_KEY, &outcome) {
            tracing::warn!(error = %err, ?outcome, "failed to persist reminder outcome");
        }
    }
}

impl PasswordReminderRepository for CachedReminderRepository {
    fn mark_skipped(&self) {
        self.store(ReminderOutcome::Skipped);
    }

    fn mark_blocked(&self) {
        self.store(ReminderOutcome::Blocked);
    }

    fn mark_succeeded(&self) {
        self.store(ReminderOutcome::Succeeded);
    }

    fn outcome(&self) -> ReminderOutcome {
        match self.cache.fetch::<ReminderOutcome>(REMINDER_OUTCOME_KEY) {
            Ok(outcome) => outcome.unwrap_or_default(),
            Err(err) => {
                tracing::debug!(error = %err, "reminder outcome unreadable, treating as pending");
                ReminderOutcome::default()
            }
        }
    }
}
