//! Subscription handles with explicit teardown.
//!
//! Parents own their children strongly; what ties a parent to a child's
//! state stream is a handle stored by the parent and disposed on rebind.
//! Dropping a handle unsubscribes, so a forgotten handle cannot leak a
//! listener past its owner.

/// Handle to an active subscription.
///
/// Cancels on `cancel()` or on drop, whichever comes first.
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub(crate) fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Explicitly remove the listener this handle stands for.
    pub fn cancel(mut self) {
        self.run_teardown();
    }

    fn run_teardown(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_teardown();
    }
}

/// A bag of subscriptions cleared as a unit.
///
/// One rebind owns one set: establishing bindings inserts here, and the
/// next rebind clears everything before subscribing anew.
#[derive(Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Cancel and drop every held subscription.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
