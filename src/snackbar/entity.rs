//! Snackbar message payloads.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

/// Default on-screen duration for a snackbar message.
pub const DEFAULT_SHOW_DURATION: Duration = Duration::from_secs(4);

type Callback = Arc<dyn Fn() + Send + Sync>;

/// One transient message.
///
/// Equality covers `(text, show_duration, action_label)` only — two
/// independently constructed entities with the same content compare equal
/// regardless of their callbacks. Each entity also carries a private
/// identity used by the queue to remove the exact instance that was
/// dismissed, so two equal-but-distinct queued entities cannot shadow each
/// other.
#[derive(Clone)]
pub struct SnackbarEntity {
    id: Uuid,
    text: String,
    show_duration: Duration,
    action_label: Option<String>,
    action: Option<Callback>,
    on_dismiss: Option<Callback>,
}

impl SnackbarEntity {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            show_duration: DEFAULT_SHOW_DURATION,
            action_label: None,
            action: None,
            on_dismiss: None,
        }
    }

    pub fn with_duration(mut self, show_duration: Duration) -> Self {
        self.show_duration = show_duration;
        self
    }

    /// Attach an action button with its callback.
    pub fn with_action<F>(mut self, label: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action_label = Some(label.into());
        self.action = Some(Arc::new(action));
        self
    }

    /// Callback fired once this entity has been displayed and dismissed.
    pub fn with_on_dismiss<F>(mut self, on_dismiss: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_dismiss = Some(Arc::new(on_dismiss));
        self
    }

    pub(crate) fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn show_duration(&self) -> Duration {
        self.show_duration
    }

    pub fn action_label(&self) -> Option<&str> {
        self.action_label.as_deref()
    }

    pub(crate) fn run_action(&self) {
        if let Some(action) = &self.action {
            action();
        }
    }

    pub(crate) fn run_on_dismiss(&self) {
        if let Some(on_dismiss) = &self.on_dismiss {
            on_dismiss();
        }
    }
}

impl PartialEq for SnackbarEntity {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.show_duration == other.show_duration
            && self.action_label == other.action_label
    }
}

impl Eq for SnackbarEntity {}

impl fmt::Debug for SnackbarEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnackbarEntity")
            .field("text", &self.text)
            .field("show_duration", &self.show_duration)
            .field("action_label", &self.action_label)
            .finish()
    }
}
