use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub features: FeatureFlags,
}

/// Default settings for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Deadline for SDK-bound operations in seconds.
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_seconds: u64,
    /// How long a snackbar stays on screen in seconds.
    #[serde(default = "default_snackbar_duration")]
    pub snackbar_duration_seconds: u64,
    /// Delay before the skipped password reminder comes back, in days.
    #[serde(default = "default_password_reminder_delay")]
    pub password_reminder_delay_days: u32,
}

/// Feature switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Show the data-usage notice before first login/signup.
    #[serde(default = "default_true")]
    pub data_usage_notice: bool,
    /// Offer the cancellation survey.
    #[serde(default = "default_true")]
    pub cancel_survey: bool,
    /// Present release notes after upgrades.
    #[serde(default = "default_true")]
    pub whats_new: bool,
}

fn default_operation_timeout() -> u64 {
    30
}

fn default_snackbar_duration() -> u64 {
    4
}

fn default_password_reminder_delay() -> u32 {
    7
}

fn default_true() -> bool {
    true
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            operation_timeout_seconds: default_operation_timeout(),
            snackbar_duration_seconds: default_snackbar_duration(),
            password_reminder_delay_days: default_password_reminder_delay(),
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            data_usage_notice: true,
            cancel_survey: true,
            whats_new: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            features: FeatureFlags::default(),
        }
    }
}
