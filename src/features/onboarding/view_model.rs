use std::sync::Arc;

use parking_lot::Mutex;

use crate::features::login::{LoginRoute, LoginViewModel};
use crate::features::onboarding::state::{AuthDestination, DataUsageRoute, OnboardingRoute};
use crate::reactive::{ChangeNotifier, Router, UiScheduler};
use crate::services::{AnalyticsEvent, AnalyticsSink, PreferenceCache, PreferenceCacheExt};

/// Cache key recording that the data-usage notice was acknowledged.
pub const DATA_USAGE_NOTICE_SHOWN_KEY: &str = "onboarding.data_usage_notice_shown";

/// The data-usage notice presented before first login or signup.
pub struct DataUsageNoticeViewModel {
    router: Router<DataUsageRoute>,
}

impl DataUsageNoticeViewModel {
    pub fn new(scheduler: &UiScheduler) -> Self {
        Self {
            router: Router::new(scheduler),
        }
    }

    pub fn router(&self) -> &Router<DataUsageRoute> {
        &self.router
    }

    pub fn did_tap_agree(&self) {
        self.router.route_to(Some(DataUsageRoute::Agreed));
    }
}

/// Entry wizard: data-usage notice, then login or signup, then done.
pub struct OnboardingViewModel {
    scheduler: UiScheduler,
    cache: Arc<dyn PreferenceCache>,
    analytics: Arc<dyn AnalyticsSink>,
    changed: ChangeNotifier,
    router: Router<OnboardingRoute>,
    /// Presented notice child; owned strongly while its route case is
    /// active, released when the wizard moves past it.
    notice: Arc<Mutex<Option<Arc<DataUsageNoticeViewModel>>>>,
    notice_enabled: bool,
}

impl OnboardingViewModel {
    pub fn new(
        scheduler: &UiScheduler,
        cache: Arc<dyn PreferenceCache>,
        analytics: Arc<dyn AnalyticsSink>,
        notice_enabled: bool,
    ) -> Self {
        let changed = ChangeNotifier::new();
        let router = Router::new(scheduler);
        router.property().set_owner(changed.clone());
        Self {
            scheduler: scheduler.clone(),
            cache,
            analytics,
            changed,
            router,
            notice: Arc::new(Mutex::new(None)),
            notice_enabled,
        }
    }

    /// Fires after the wizard's route mutates.
    pub fn changed(&self) -> &ChangeNotifier {
        &self.changed
    }

    pub fn router(&self) -> &Router<OnboardingRoute> {
        &self.router
    }

    /// The presented notice child, for the host view to render.
    pub fn notice(&self) -> Option<Arc<DataUsageNoticeViewModel>> {
        self.notice.lock().clone()
    }

    pub fn did_tap_login(&self) {
        self.proceed(AuthDestination::Login);
    }

    pub fn did_tap_signup(&self) {
        self.proceed(AuthDestination::Signup);
    }

    /// React to the login child reaching its terminal route.
    ///
    /// The host calls this after presenting the login screen for the
    /// `Login` route case; the binding is replaced on the next rebind like
    /// any other.
    pub fn bind_login(&self, login: &LoginViewModel) {
        let router = self.router.clone();
        let analytics = Arc::clone(&self.analytics);
        self.router.bind(login.router().property(), move |route| match route {
            LoginRoute::LoggedIn => {
                analytics.track(AnalyticsEvent::OnboardingCompleted);
                router.route_to(Some(OnboardingRoute::LoggedIn));
            }
            LoginRoute::TwoFactor => {}
        });
    }

    fn proceed(&self, destination: AuthDestination) {
        if !self.notice_enabled || self.notice_already_shown() {
            self.router.route_to(Some(destination_route(destination)));
            return;
        }

        let child = Arc::new(DataUsageNoticeViewModel::new(&self.scheduler));
        self.router
            .route_to(Some(OnboardingRoute::DataUsage { then: destination }));

        let router = self.router.clone();
        let cache = Arc::clone(&self.cache);
        let slot = Arc::clone(&self.notice);
        self.router
            .bind(child.router().property(), move |route| match route {
                DataUsageRoute::Agreed => {
                    if let Err(err) = cache.save(DATA_USAGE_NOTICE_SHOWN_KEY, &true) {
                        tracing::warn!(error = %err, "failed to persist data-usage acknowledgement");
                    }
                    *slot.lock() = None;
                    router.route_to(Some(destination_route(destination)));
                }
            });
        *self.notice.lock() = Some(child);
    }

    fn notice_already_shown(&self) -> bool {
        match self.cache.fetch::<bool>(DATA_USAGE_NOTICE_SHOWN_KEY) {
            Ok(flag) => flag.unwrap_or(false),
            Err(err) => {
                tracing::debug!(error = %err, "data-usage flag unreadable, treating as unshown");
                false
            }
        }
    }
}

fn destination_route(destination: AuthDestination) -> OnboardingRoute {
    match destination {
        AuthDestination::Login => OnboardingRoute::Login,
        AuthDestination::Signup => OnboardingRoute::Signup,
    }
}
