//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_services;

use std::sync::Arc;

use nimbus::config::Config;
use nimbus::services::MemoryCache;
use nimbus::AppServices;

use mock_services::{
    CountingReminderRepository, MockAccountService, MockAuthService, RecordingAnalytics,
    RecordingClipboard, RecordingExporter, RecordingNotifications,
};

/// Fully mocked container plus handles to every mock for assertions.
pub struct TestHarness {
    pub services: Arc<AppServices>,
    pub account: Arc<MockAccountService>,
    pub auth: Arc<MockAuthService>,
    pub cache: Arc<MemoryCache>,
    pub clipboard: Arc<RecordingClipboard>,
    pub exporter: Arc<RecordingExporter>,
    pub analytics: Arc<RecordingAnalytics>,
    pub notifications: Arc<RecordingNotifications>,
    pub reminders: Arc<CountingReminderRepository>,
}

impl TestHarness {
    /// Wait for all pending UI-scheduler work before asserting.
    pub fn settle(&self) {
        self.services.scheduler().flush();
    }
}

pub fn harness() -> TestHarness {
    harness_with_config(Config::default())
}

pub fn harness_with_config(config: Config) -> TestHarness {
    let account = Arc::new(MockAccountService::new());
    let auth = Arc::new(MockAuthService::new());
    let cache = Arc::new(MemoryCache::new());
    let clipboard = Arc::new(RecordingClipboard::new());
    let exporter = Arc::new(RecordingExporter::new());
    let analytics = Arc::new(RecordingAnalytics::new());
    let notifications = Arc::new(RecordingNotifications::new());
    let reminders = Arc::new(CountingReminderRepository::new());

    let services = AppServices::builder()
        .config(config)
        .account(account.clone())
        .auth(auth.clone())
        .cache(cache.clone())
        .clipboard(clipboard.clone())
        .exporter(exporter.clone())
        .analytics(analytics.clone())
        .notifications(notifications.clone())
        .reminder_repository(reminders.clone())
        .build()
        .expect("harness container must build");

    TestHarness {
        services,
        account,
        auth,
        cache,
        clipboard,
        exporter,
        analytics,
        notifications,
        reminders,
    }
}
