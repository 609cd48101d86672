use std::sync::Arc;
use std::time::Duration;

use crate::features::fields::{validate_email, validate_required, FieldState};
use crate::features::login::state::LoginRoute;
use crate::reactive::{ChangeNotifier, Property, Router, UiScheduler};
use crate::services::{AnalyticsEvent, AnalyticsSink, AuthError, AuthService, SecureString};
use crate::snackbar::{SnackbarDisplayer, SnackbarEntity};
use crate::timeout::run_blocking_with_timeout;

/// Login screen state and actions.
///
/// Validation failures surface inline through the field states; transport
/// failures become a snackbar. A two-factor challenge routes to the PIN
/// entry instead of failing.
pub struct LoginViewModel {
    auth: Arc<dyn AuthService>,
    analytics: Arc<dyn AnalyticsSink>,
    snackbar: SnackbarDisplayer,
    timeout: Duration,
    username: Property<String>,
    password: Property<String>,
    pin: Property<String>,
    username_field: Property<FieldState>,
    password_field: Property<FieldState>,
    pin_field: Property<FieldState>,
    is_loading: Property<bool>,
    changed: ChangeNotifier,
    router: Router<LoginRoute>,
}

impl LoginViewModel {
    pub fn new(
        scheduler: &UiScheduler,
        auth: Arc<dyn AuthService>,
        analytics: Arc<dyn AnalyticsSink>,
        snackbar: SnackbarDisplayer,
        timeout: Duration,
    ) -> Self {
        let changed = ChangeNotifier::new();
        let router = Router::new(scheduler);
        router.property().set_owner(changed.clone());
        Self {
            auth,
            analytics,
            snackbar,
            timeout,
            username: Property::with_owner(scheduler, String::new(), changed.clone()),
            password: Property::with_owner(scheduler, String::new(), changed.clone()),
            pin: Property::with_owner(scheduler, String::new(), changed.clone()),
            username_field: Property::with_owner(scheduler, FieldState::Normal, changed.clone()),
            password_field: Property::with_owner(scheduler, FieldState::Normal, changed.clone()),
            pin_field: Property::with_owner(scheduler, FieldState::Normal, changed.clone()),
            is_loading: Property::with_owner(scheduler, false, changed.clone()),
            changed,
            router,
        }
    }

    /// Fires after any property of this view model mutates, for host
    /// re-render.
    pub fn changed(&self) -> &ChangeNotifier {
        &self.changed
    }

    pub fn username(&self) -> &Property<String> {
        &self.username
    }

    pub fn password(&self) -> &Property<String> {
        &self.password
    }

    pub fn pin(&self) -> &Property<String> {
        &self.pin
    }

    pub fn username_field(&self) -> &Property<FieldState> {
        &self.username_field
    }

    pub fn password_field(&self) -> &Property<FieldState> {
        &self.password_field
    }

    pub fn pin_field(&self) -> &Property<FieldState> {
        &self.pin_field
    }

    pub fn is_loading(&self) -> &Property<bool> {
        &self.is_loading
    }

    pub fn router(&self) -> &Router<LoginRoute> {
        &self.router
    }

    /// Attempt to log in with the entered credentials.
    pub async fn submit(&self) {
        if !self.validate_credentials() {
            return;
        }

        let auth = Arc::clone(&self.auth);
        let username = self.username.get();
        let password = SecureString::new(self.password.get());

        self.is_loading.set(true);
        let outcome =
            run_blocking_with_timeout(self.timeout, move || auth.login(&username, &password))
                .await;
        self.is_loading.set(false);

        match outcome {
            Ok(Ok(session)) => {
                tracing::info!(user = %session.user_email, "login succeeded");
                self.analytics.track(AnalyticsEvent::LoginSucceeded);
                self.router.route_to(Some(LoginRoute::LoggedIn));
            }
            Ok(Err(AuthError::TwoFactorRequired)) => {
                self.analytics.track(AnalyticsEvent::TwoFactorRequested);
                self.router.route_to(Some(LoginRoute::TwoFactor));
            }
            Ok(Err(error)) => self.report_failure(error),
            Err(expired) => {
                self.analytics.track(AnalyticsEvent::LoginFailed);
                tracing::warn!(error = %expired, "login timed out");
                self.snackbar
                    .display(SnackbarEntity::new("Unable to reach the server"));
            }
        }
    }

    /// Complete a login that was answered with a two-factor challenge.
    pub async fn submit_two_factor(&self) {
        let entered_pin = self.pin.get();
        if entered_pin.trim().is_empty() {
            self.pin_field
                .set(FieldState::Warning("Enter your authentication code".to_string()));
            return;
        }

        let auth = Arc::clone(&self.auth);
        let username = self.username.get();
        let password = SecureString::new(self.password.get());

        self.is_loading.set(true);
        let outcome = run_blocking_with_timeout(self.timeout, move || {
            auth.login_with_two_factor(&username, &password, &entered_pin)
        })
        .await;
        self.is_loading.set(false);

        match outcome {
            Ok(Ok(session)) => {
                tracing::info!(user = %session.user_email, "two-factor login succeeded");
                self.analytics.track(AnalyticsEvent::LoginSucceeded);
                self.router.route_to(Some(LoginRoute::LoggedIn));
            }
            Ok(Err(AuthError::TwoFactorInvalid)) => {
                self.pin_field
                    .set(FieldState::Warning("Incorrect code, try again".to_string()));
            }
            Ok(Err(error)) => self.report_failure(error),
            Err(expired) => {
                self.analytics.track(AnalyticsEvent::LoginFailed);
                tracing::warn!(error = %expired, "two-factor login timed out");
                self.snackbar
                    .display(SnackbarEntity::new("Unable to reach the server"));
            }
        }
    }

    fn validate_credentials(&self) -> bool {
        let username_state = validate_email(&self.username.get());
        let password_state = validate_required(&self.password.get(), "password");
        let ok = !username_state.is_warning() && !password_state.is_warning();
        self.username_field.set(username_state);
        self.password_field.set(password_state);
        ok
    }

    fn report_failure(&self, error: AuthError) {
        self.analytics.track(AnalyticsEvent::LoginFailed);
        match error {
            AuthError::InvalidCredentials => {
                self.password_field
                    .set(FieldState::Warning("Invalid email or password".to_string()));
            }
            AuthError::TooManyAttempts => {
                self.snackbar.display(SnackbarEntity::new(
                    "Too many attempts, please wait a moment",
                ));
            }
            error => {
                tracing::warn!(error = %error, "login failed");
                self.snackbar
                    .display(SnackbarEntity::new("Unable to log in right now"));
            }
        }
    }
}
