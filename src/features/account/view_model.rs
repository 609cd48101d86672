use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::features::account::state::AccountRoute;
use crate::features::fields::{validate_password_strength, FieldState};
use crate::features::password_reminder::{
    PasswordReminderRepository, PasswordReminderRoute, PasswordReminderViewModel, ReminderOutcome,
};
use crate::reactive::{ChangeNotifier, Property, Router, UiScheduler};
use crate::services::{
    Account, AccountDetails, AccountError, AccountService, AnalyticsEvent, AnalyticsSink,
    AuthService, CancelSurveyAnswer, ClipboardService, FileExporter, PreferenceCache,
    PreferenceCacheExt, SecureString,
};
use crate::snackbar::{SnackbarDisplayer, SnackbarEntity};
use crate::timeout::run_blocking_with_timeout;

/// Cache key deduplicating cancellation-survey submissions.
pub const CANCEL_SURVEY_SUBMITTED_KEY: &str = "account.cancel_survey_submitted";

/// Builds a fresh password-reminder dialog per presentation.
pub type ReminderFactory = Box<dyn Fn() -> Arc<PasswordReminderViewModel> + Send + Sync>;

/// Account screen: usage overview, password change, logout.
pub struct AccountViewModel {
    account_service: Arc<dyn AccountService>,
    auth: Arc<dyn AuthService>,
    clipboard: Arc<dyn ClipboardService>,
    exporter: Arc<dyn FileExporter>,
    analytics: Arc<dyn AnalyticsSink>,
    cache: Arc<dyn PreferenceCache>,
    reminder_repository: Arc<dyn PasswordReminderRepository>,
    reminder_factory: ReminderFactory,
    snackbar: SnackbarDisplayer,
    timeout: Duration,
    cancel_survey_enabled: bool,
    account: Property<Option<Account>>,
    details: Property<Option<AccountDetails>>,
    is_refreshing: Property<bool>,
    current_password: Property<String>,
    new_password: Property<String>,
    current_password_field: Property<FieldState>,
    new_password_field: Property<FieldState>,
    changed: ChangeNotifier,
    router: Router<AccountRoute>,
    /// Presented reminder child; owned strongly while its route case is
    /// active.
    reminder: Arc<Mutex<Option<Arc<PasswordReminderViewModel>>>>,
}

pub(crate) struct AccountViewModelDeps {
    pub account_service: Arc<dyn AccountService>,
    pub auth: Arc<dyn AuthService>,
    pub clipboard: Arc<dyn ClipboardService>,
    pub exporter: Arc<dyn FileExporter>,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub cache: Arc<dyn PreferenceCache>,
    pub reminder_repository: Arc<dyn PasswordReminderRepository>,
    pub reminder_factory: ReminderFactory,
    pub snackbar: SnackbarDisplayer,
    pub timeout: Duration,
    pub cancel_survey_enabled: bool,
}

impl AccountViewModel {
    pub(crate) fn new(scheduler: &UiScheduler, deps: AccountViewModelDeps) -> Self {
        let changed = ChangeNotifier::new();
        let router = Router::new(scheduler);
        router.property().set_owner(changed.clone());
        Self {
            account_service: deps.account_service,
            auth: deps.auth,
            clipboard: deps.clipboard,
            exporter: deps.exporter,
            analytics: deps.analytics,
            cache: deps.cache,
            reminder_repository: deps.reminder_repository,
            reminder_factory: deps.reminder_factory,
            snackbar: deps.snackbar,
            timeout: deps.timeout,
            cancel_survey_enabled: deps.cancel_survey_enabled,
            account: Property::with_owner(scheduler, None, changed.clone()),
            details: Property::with_owner(scheduler, None, changed.clone()),
            is_refreshing: Property::with_owner(scheduler, false, changed.clone()),
            current_password: Property::with_owner(scheduler, String::new(), changed.clone()),
            new_password: Property::with_owner(scheduler, String::new(), changed.clone()),
            current_password_field: Property::with_owner(
                scheduler,
                FieldState::Normal,
                changed.clone(),
            ),
            new_password_field: Property::with_owner(
                scheduler,
                FieldState::Normal,
                changed.clone(),
            ),
            changed,
            router,
            reminder: Arc::new(Mutex::new(None)),
        }
    }

    /// Fires after any property of this view model mutates.
    pub fn changed(&self) -> &ChangeNotifier {
        &self.changed
    }

    pub fn account(&self) -> &Property<Option<Account>> {
        &self.account
    }

    pub fn details(&self) -> &Property<Option<AccountDetails>> {
        &self.details
    }

    pub fn is_refreshing(&self) -> &Property<bool> {
        &self.is_refreshing
    }

    pub fn current_password(&self) -> &Property<String> {
        &self.current_password
    }

    pub fn new_password(&self) -> &Property<String> {
        &self.new_password
    }

    pub fn current_password_field(&self) -> &Property<FieldState> {
        &self.current_password_field
    }

    pub fn new_password_field(&self) -> &Property<FieldState> {
        &self.new_password_field
    }

    pub fn router(&self) -> &Router<AccountRoute> {
        &self.router
    }

    /// The presented reminder child, for the host view to render.
    pub fn reminder(&self) -> Option<Arc<PasswordReminderViewModel>> {
        self.reminder.lock().clone()
    }

    /// Fetch account identity and usage, surfacing failure as a snackbar.
    pub async fn refresh(&self) {
        self.is_refreshing.set(true);
        let service = Arc::clone(&self.account_service);
        let fetched = run_blocking_with_timeout(self.timeout, move || {
            let account = service.fetch_account()?;
            let details = service.fetch_account_details()?;
            Ok::<_, AccountError>((account, details))
        })
        .await;
        self.is_refreshing.set(false);

        match fetched {
            Ok(Ok((account, details))) => {
                self.account.set(Some(account));
                self.details.set(Some(details));
            }
            Ok(Err(error)) => {
                tracing::warn!(error = %error, "account refresh failed");
                self.snackbar
                    .display(SnackbarEntity::new("Unable to load your account"));
            }
            Err(expired) => {
                tracing::warn!(error = %expired, "account refresh timed out");
                self.snackbar
                    .display(SnackbarEntity::new("Unable to load your account"));
            }
        }
    }

    /// Copy the account email to the clipboard.
    pub fn copy_email(&self) {
        let Some(account) = self.account.get() else {
            return;
        };
        match self.clipboard.copy(&account.email) {
            Ok(()) => {
                self.snackbar.display(SnackbarEntity::new("Email copied"));
                self.analytics.track(AnalyticsEvent::EmailCopied);
            }
            Err(error) => tracing::warn!(error = %error, "clipboard copy failed"),
        }
    }

    /// Export the recovery key to a text file.
    pub fn export_recovery_key(&self, recovery_key: &str) {
        match self
            .exporter
            .write_text_file("recovery-key.txt", recovery_key)
        {
            Ok(path) => {
                tracing::info!(path = %path.display(), "recovery key exported");
                self.snackbar
                    .display(SnackbarEntity::new("Recovery key saved"));
                self.analytics.track(AnalyticsEvent::RecoveryKeyExported);
            }
            Err(error) => {
                tracing::warn!(error = %error, "recovery key export failed");
                self.snackbar
                    .display(SnackbarEntity::new("Could not save the recovery key"));
            }
        }
    }

    /// Open the change-password form.
    pub fn request_change_password(&self) {
        self.current_password.set(String::new());
        self.new_password.set(String::new());
        self.current_password_field.set(FieldState::Normal);
        self.new_password_field.set(FieldState::Normal);
        self.router.route_to(Some(AccountRoute::ChangePassword));
    }

    /// Validate and submit the change-password form.
    pub async fn submit_change_password(&self) {
        let strength = validate_password_strength(&self.new_password.get());
        if strength.is_warning() {
            self.new_password_field.set(strength);
            return;
        }
        self.new_password_field.set(FieldState::Normal);

        let current = SecureString::new(self.current_password.get());
        if current.is_empty() {
            self.current_password_field
                .set(FieldState::Warning("Enter your current password".to_string()));
            return;
        }
        self.current_password_field.set(FieldState::Normal);

        let new = SecureString::new(self.new_password.get());
        let service = Arc::clone(&self.account_service);
        let outcome = run_blocking_with_timeout(self.timeout, move || {
            service.change_password(&current, &new)
        })
        .await;

        match outcome {
            Ok(Ok(())) => {
                self.analytics.track(AnalyticsEvent::PasswordChanged);
                self.snackbar.display(SnackbarEntity::new("Password changed"));
                self.router.route_to(None);
            }
            Ok(Err(AccountError::WrongPassword)) => {
                self.current_password_field.set(FieldState::Warning(
                    "Current password is incorrect".to_string(),
                ));
            }
            Ok(Err(error)) => {
                tracing::warn!(error = %error, "password change failed");
                self.snackbar
                    .display(SnackbarEntity::new("Unable to change password"));
            }
            Err(expired) => {
                tracing::warn!(error = %expired, "password change timed out");
                self.snackbar
                    .display(SnackbarEntity::new("Unable to change password"));
            }
        }
    }

    /// Submit the cancellation survey at most once, best-effort.
    pub fn submit_cancel_survey(&self, answer: CancelSurveyAnswer) {
        if !self.cancel_survey_enabled {
            return;
        }
        let already_submitted = self
            .cache
            .fetch::<bool>(CANCEL_SURVEY_SUBMITTED_KEY)
            .ok()
            .flatten()
            .unwrap_or(false);
        if already_submitted {
            tracing::debug!("cancel survey already submitted");
            return;
        }
        if let Err(error) = self.account_service.submit_cancel_survey(&answer) {
            tracing::debug!(error = %error, "cancel survey submission failed");
            return;
        }
        if let Err(error) = self.cache.save(CANCEL_SURVEY_SUBMITTED_KEY, &true) {
            tracing::debug!(error = %error, "failed to record survey submission");
        }
        self.analytics.track(AnalyticsEvent::CancelSurveySubmitted);
    }

    /// Start logout, gated through the password reminder unless it was
    /// already resolved.
    pub fn begin_logout(&self) {
        match self.reminder_repository.outcome() {
            ReminderOutcome::Blocked | ReminderOutcome::Succeeded => self.perform_logout(),
            ReminderOutcome::Pending | ReminderOutcome::Skipped => self.present_reminder(),
        }
    }

    fn present_reminder(&self) {
        let child = (self.reminder_factory)();
        self.router.route_to(Some(AccountRoute::PasswordReminder));

        let router = self.router.clone();
        let auth = Arc::clone(&self.auth);
        let slot = Arc::clone(&self.reminder);
        self.router
            .bind(child.router().property(), move |route| match route {
                PasswordReminderRoute::Logout => {
                    if let Err(error) = auth.logout() {
                        tracing::warn!(error = %error, "logout failed");
                    }
                    *slot.lock() = None;
                    router.route_to(Some(AccountRoute::LoggedOut));
                }
                PasswordReminderRoute::Dismissed => {
                    *slot.lock() = None;
                    router.route_to(None);
                }
            });
        *self.reminder.lock() = Some(child);
    }

    fn perform_logout(&self) {
        if let Err(error) = self.auth.logout() {
            tracing::warn!(error = %error, "logout failed");
        }
        self.router.route_to(Some(AccountRoute::LoggedOut));
    }
}
