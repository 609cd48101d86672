//! Capability interfaces over the native sync SDK.
//!
//! Each trait is a narrow, single-purpose boundary: view models depend on
//! these, never on the SDK itself. Implementations that the crate can
//! provide locally (clipboard, file export, analytics, preference cache)
//! live alongside the traits; account, auth, and OS notification scheduling
//! are supplied by the host.

mod account;
mod analytics;
mod auth;
mod cache;
mod clipboard;
mod notifications;

pub use account::{
    Account, AccountDetails, AccountError, AccountService, CancelSurveyAnswer, PlanTier,
};
pub use analytics::{AnalyticsEvent, AnalyticsSink, TracingAnalytics};
pub use auth::{AuthError, AuthService, SecureString, Session};
pub use cache::{CacheError, FileCache, MemoryCache, PreferenceCache, PreferenceCacheExt};
pub use clipboard::{
    ClipboardError, ClipboardService, ExportError, FileExporter, SystemClipboard, TempDirExporter,
};
pub use notifications::{
    NotificationRequest, NotificationScheduling, NotificationTrigger, NotifyError,
};
