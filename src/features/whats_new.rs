//! Release-notes gating.
//!
//! Each account remembers which app versions it has already seen release
//! notes for, as a cached email → versions map.

use std::sync::Arc;

use crate::services::{PreferenceCache, PreferenceCacheExt};

fn seen_versions_key(email: &str) -> String {
    format!("whats_new.seen.{email}")
}

/// Decides whether to present release notes after an upgrade.
pub struct WhatsNewGate {
    cache: Arc<dyn PreferenceCache>,
    enabled: bool,
}

impl WhatsNewGate {
    pub fn new(cache: Arc<dyn PreferenceCache>, enabled: bool) -> Self {
        Self { cache, enabled }
    }

    /// True when `version` has not been presented to `email` yet.
    ///
    /// An unreadable cache entry counts as never presented.
    pub fn should_present(&self, email: &str, version: &str) -> bool {
        if !self.enabled {
            return false;
        }
        let seen = match self.cache.fetch::<Vec<String>>(&seen_versions_key(email)) {
            Ok(seen) => seen.unwrap_or_default(),
            Err(err) => {
                tracing::debug!(error = %err, "seen-versions entry unreadable");
                Vec::new()
            }
        };
        !seen.iter().any(|s| s == version)
    }

    /// Record that `version` was presented to `email`.
    pub fn mark_presented(&self, email: &str, version: &str) {
        let key = seen_versions_key(email);
        let mut seen = match self.cache.fetch::<Vec<String>>(&key) {
            Ok(seen) => seen.unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        if seen.iter().any(|s| s == version) {
            return;
        }
        seen.push(version.to_string());
        if let Err(err) = self.cache.save(&key, &seen) {
            tracing::warn!(error = %err, "failed to record presented version");
        }
    }
}
