use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::features::fields::FieldState;
use crate::features::password_reminder::repository::PasswordReminderRepository;
use crate::features::password_reminder::state::PasswordReminderRoute;
use crate::reactive::{ChangeNotifier, Property, Router, UiScheduler};
use crate::services::{
    AuthService, NotificationRequest, NotificationScheduling, NotificationTrigger, SecureString,
};

/// Id of the OS-level follow-up notification.
pub const REMINDER_NOTIFICATION_ID: &str = "password-reminder";

/// Dialog shown before logout asking the user to prove they still know
/// their password.
///
/// Exactly one outcome is recorded per presentation: blocked when the
/// user opted out, succeeded when the test passed, skipped otherwise.
pub struct PasswordReminderViewModel {
    auth: Arc<dyn AuthService>,
    repository: Arc<dyn PasswordReminderRepository>,
    notifications: Arc<dyn NotificationScheduling>,
    reminder_delay: Duration,
    do_not_show_again: Property<bool>,
    password: Property<String>,
    password_field: Property<FieldState>,
    passed_test: AtomicBool,
    changed: ChangeNotifier,
    router: Router<PasswordReminderRoute>,
}

impl PasswordReminderViewModel {
    pub fn new(
        scheduler: &UiScheduler,
        auth: Arc<dyn AuthService>,
        repository: Arc<dyn PasswordReminderRepository>,
        notifications: Arc<dyn NotificationScheduling>,
        reminder_delay: Duration,
    ) -> Self {
        let changed = ChangeNotifier::new();
        let router = Router::new(scheduler);
        router.property().set_owner(changed.clone());
        Self {
            auth,
            repository,
            notifications,
            reminder_delay,
            do_not_show_again: Property::with_owner(scheduler, false, changed.clone()),
            password: Property::with_owner(scheduler, String::new(), changed.clone()),
            password_field: Property::with_owner(scheduler, FieldState::Normal, changed.clone()),
            passed_test: AtomicBool::new(false),
            changed,
            router,
        }
    }

    /// Fires after any property of this view model mutates.
    pub fn changed(&self) -> &ChangeNotifier {
        &self.changed
    }

    pub fn do_not_show_again(&self) -> &Property<bool> {
        &self.do_not_show_again
    }

    pub fn password(&self) -> &Property<String> {
        &self.password
    }

    pub fn password_field(&self) -> &Property<FieldState> {
        &self.password_field
    }

    pub fn router(&self) -> &Router<PasswordReminderRoute> {
        &self.router
    }

    /// Check the entered password against the current account.
    ///
    /// A pass resolves the reminder and closes the dialog; a mismatch is
    /// inline feedback only.
    pub fn test_password(&self) {
        let password = SecureString::new(self.password.get());
        if password.is_empty() {
            self.password_field
                .set(FieldState::Warning("Enter your password".to_string()));
            return;
        }

        match self.auth.verify_password(&password) {
            Ok(true) => {
                self.passed_test.store(true, Ordering::SeqCst);
                self.password_field.set(FieldState::Normal);
                self.repository.mark_succeeded();
                self.notifications
                    .cancel(&[REMINDER_NOTIFICATION_ID.to_string()]);
                self.router.route_to(Some(PasswordReminderRoute::Dismissed));
            }
            Ok(false) => {
                self.password_field
                    .set(FieldState::Warning("Password is incorrect".to_string()));
            }
            Err(err) => {
                tracing::warn!(error = %err, "password verification unavailable");
                self.password_field.set(FieldState::Warning(
                    "Could not verify your password right now".to_string(),
                ));
            }
        }
    }

    /// Resolve the reminder and continue with the interrupted logout.
    pub fn proceed_to_logout(&self) {
        if self.passed_test.load(Ordering::SeqCst) {
            // Outcome already recorded by the successful test.
        } else if self.do_not_show_again.get() {
            self.repository.mark_blocked();
            self.notifications
                .cancel(&[REMINDER_NOTIFICATION_ID.to_string()]);
        } else {
            self.repository.mark_skipped();
            self.schedule_follow_up();
        }
        self.router.route_to(Some(PasswordReminderRoute::Logout));
    }

    /// Close the dialog without logging out.
    pub fn dismiss(&self) {
        self.router.route_to(Some(PasswordReminderRoute::Dismissed));
    }

    fn schedule_follow_up(&self) {
        let request = NotificationRequest {
            id: REMINDER_NOTIFICATION_ID.to_string(),
            title: "Do you remember your password?".to_string(),
            body: "Test your password so you never lose access to your files.".to_string(),
            trigger: NotificationTrigger::After(self.reminder_delay),
        };
        if let Err(err) = self.notifications.request(request) {
            tracing::warn!(error = %err, "failed to schedule password reminder");
        }
    }
}
