//! Composition root.
//!
//! One [`AppServices`] is built at process start and passed down; every
//! view model receives its dependencies from here by constructor
//! injection. Tests install mock services through the same builder — there
//! is no global registry to patch.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::{Config, ConfigStore};
use crate::features::account::{AccountViewModel, AccountViewModelDeps, ReminderFactory};
use crate::features::login::LoginViewModel;
use crate::features::onboarding::OnboardingViewModel;
use crate::features::password_reminder::{
    CachedReminderRepository, PasswordReminderRepository, PasswordReminderViewModel,
};
use crate::features::whats_new::WhatsNewGate;
use crate::reactive::UiScheduler;
use crate::services::{
    AccountService, AnalyticsSink, AuthService, ClipboardService, FileExporter,
    NotificationScheduling, PreferenceCache, SystemClipboard, TempDirExporter, TracingAnalytics,
};
use crate::snackbar::SnackbarDisplayer;

/// Errors from assembling the composition root.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContainerError {
    /// A required service was never registered with the builder.
    #[error("no {name} service registered")]
    MissingService { name: &'static str },
}

/// The wired application: scheduler, shared state holders, and one
/// implementation per capability interface.
pub struct AppServices {
    scheduler: UiScheduler,
    config: ConfigStore,
    snackbar: SnackbarDisplayer,
    account: Arc<dyn AccountService>,
    auth: Arc<dyn AuthService>,
    cache: Arc<dyn PreferenceCache>,
    clipboard: Arc<dyn ClipboardService>,
    exporter: Arc<dyn FileExporter>,
    analytics: Arc<dyn AnalyticsSink>,
    notifications: Arc<dyn NotificationScheduling>,
    reminder_repository: Arc<dyn PasswordReminderRepository>,
}

impl AppServices {
    pub fn builder() -> AppServicesBuilder {
        AppServicesBuilder::default()
    }

    pub fn scheduler(&self) -> &UiScheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn snackbar(&self) -> &SnackbarDisplayer {
        &self.snackbar
    }

    pub fn cache(&self) -> &Arc<dyn PreferenceCache> {
        &self.cache
    }

    /// Onboarding wizard, wired per the current feature flags.
    pub fn onboarding(&self) -> OnboardingViewModel {
        OnboardingViewModel::new(
            &self.scheduler,
            Arc::clone(&self.cache),
            Arc::clone(&self.analytics),
            self.config.get().features.data_usage_notice,
        )
    }

    /// Login screen.
    pub fn login(&self) -> LoginViewModel {
        LoginViewModel::new(
            &self.scheduler,
            Arc::clone(&self.auth),
            Arc::clone(&self.analytics),
            self.snackbar.clone(),
            self.config.operation_timeout(),
        )
    }

    /// Password-reminder dialog.
    pub fn password_reminder(&self) -> Arc<PasswordReminderViewModel> {
        Arc::new(PasswordReminderViewModel::new(
            &self.scheduler,
            Arc::clone(&self.auth),
            Arc::clone(&self.reminder_repository),
            Arc::clone(&self.notifications),
            self.reminder_delay(),
        ))
    }

    /// Account screen, with a factory wiring fresh reminder dialogs.
    pub fn account_overview(&self) -> AccountViewModel {
        let scheduler = self.scheduler.clone();
        let auth = Arc::clone(&self.auth);
        let repository = Arc::clone(&self.reminder_repository);
        let notifications = Arc::clone(&self.notifications);
        let delay = self.reminder_delay();
        let reminder_factory: ReminderFactory = Box::new(move || {
            Arc::new(PasswordReminderViewModel::new(
                &scheduler,
                Arc::clone(&auth),
                Arc::clone(&repository),
                Arc::clone(&notifications),
                delay,
            ))
        });
        AccountViewModel::new(
            &self.scheduler,
            AccountViewModelDeps {
                account_service: Arc::clone(&self.account),
                auth: Arc::clone(&self.auth),
                clipboard: Arc::clone(&self.clipboard),
                exporter: Arc::clone(&self.exporter),
                analytics: Arc::clone(&self.analytics),
                cache: Arc::clone(&self.cache),
                reminder_repository: Arc::clone(&self.reminder_repository),
                reminder_factory,
                snackbar: self.snackbar.clone(),
                timeout: self.config.operation_timeout(),
                cancel_survey_enabled: self.config.get().features.cancel_survey,
            },
        )
    }

    /// Release-notes gate.
    pub fn whats_new(&self) -> WhatsNewGate {
        WhatsNewGate::new(
            Arc::clone(&self.cache),
            self.config.get().features.whats_new,
        )
    }

    fn reminder_delay(&self) -> Duration {
        let days = self.config.get().defaults.password_reminder_delay_days;
        Duration::from_secs(u64::from(days) * 24 * 60 * 60)
    }
}

/// Builder for [`AppServices`].
///
/// Account, auth, cache, and notification scheduling come from the host
/// (they wrap the native SDK); clipboard, export, and analytics default to
/// the local implementations and can be overridden the same way.
#[derive(Default)]
pub struct AppServicesBuilder {
    config: Option<Config>,
    account: Option<Arc<dyn AccountService>>,
    auth: Option<Arc<dyn AuthService>>,
    cache: Option<Arc<dyn PreferenceCache>>,
    clipboard: Option<Arc<dyn ClipboardService>>,
    exporter: Option<Arc<dyn FileExporter>>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    notifications: Option<Arc<dyn NotificationScheduling>>,
    reminder_repository: Option<Arc<dyn PasswordReminderRepository>>,
}

impl AppServicesBuilder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn account(mut self, service: Arc<dyn AccountService>) -> Self {
        self.account = Some(service);
        self
    }

    pub fn auth(mut self, service: Arc<dyn AuthService>) -> Self {
        self.auth = Some(service);
        self
    }

    pub fn cache(mut self, cache: Arc<dyn PreferenceCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn clipboard(mut self, clipboard: Arc<dyn ClipboardService>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn exporter(mut self, exporter: Arc<dyn FileExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub fn analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    pub fn notifications(mut self, notifications: Arc<dyn NotificationScheduling>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    pub fn reminder_repository(
        mut self,
        repository: Arc<dyn PasswordReminderRepository>,
    ) -> Self {
        self.reminder_repository = Some(repository);
        self
    }

    /// Assemble the container, failing fast on the first missing service.
    pub fn build(self) -> Result<Arc<AppServices>, ContainerError> {
        let account = self
            .account
            .ok_or(ContainerError::MissingService { name: "account" })?;
        let auth = self
            .auth
            .ok_or(ContainerError::MissingService { name: "auth" })?;
        let cache = self
            .cache
            .ok_or(ContainerError::MissingService { name: "cache" })?;
        let notifications = self.notifications.ok_or(ContainerError::MissingService {
            name: "notifications",
        })?;

        let config = self.config.unwrap_or_default();
        let config = ConfigStore::new(config, Config::config_path());
        let clipboard = self
            .clipboard
            .unwrap_or_else(|| Arc::new(SystemClipboard::new()));
        let exporter = self
            .exporter
            .unwrap_or_else(|| Arc::new(TempDirExporter::new()));
        let analytics = self
            .analytics
            .unwrap_or_else(|| Arc::new(TracingAnalytics));
        let reminder_repository = self.reminder_repository.unwrap_or_else(|| {
            Arc::new(CachedReminderRepository::new(Arc::clone(&cache)))
        });

        let scheduler = UiScheduler::new();
        let snackbar = SnackbarDisplayer::new(&scheduler);

        Ok(Arc::new(AppServices {
            scheduler,
            config,
            snackbar,
            account,
            auth,
            cache,
            clipboard,
            exporter,
            analytics,
            notifications,
            reminder_repository,
        }))
    }
}
