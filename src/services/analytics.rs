//! Fire-and-forget analytics.

/// Events tracked by the feature layer.
///
/// Names are stable identifiers; renaming a variant must not change its
/// wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsEvent {
    LoginSucceeded,
    LoginFailed,
    TwoFactorRequested,
    OnboardingCompleted,
    EmailCopied,
    RecoveryKeyExported,
    PasswordChanged,
    CancelSurveySubmitted,
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::LoginSucceeded => "login_succeeded",
            AnalyticsEvent::LoginFailed => "login_failed",
            AnalyticsEvent::TwoFactorRequested => "two_factor_requested",
            AnalyticsEvent::OnboardingCompleted => "onboarding_completed",
            AnalyticsEvent::EmailCopied => "email_copied",
            AnalyticsEvent::RecoveryKeyExported => "recovery_key_exported",
            AnalyticsEvent::PasswordChanged => "password_changed",
            AnalyticsEvent::CancelSurveySubmitted => "cancel_survey_submitted",
        }
    }
}

/// Event sink with no return contract.
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: AnalyticsEvent);
}

/// Sink that emits events into the tracing stream.
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        tracing::info!(event = event.name(), "analytics event");
    }
}
