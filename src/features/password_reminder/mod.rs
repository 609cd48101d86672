mod repository;
mod state;
mod view_model;

pub use repository::{
    CachedReminderRepository, PasswordReminderRepository, ReminderOutcome, REMINDER_OUTCOME_KEY,
};
pub use state::PasswordReminderRoute;
pub use view_model::{PasswordReminderViewModel, REMINDER_NOTIFICATION_ID};
