//! Navigation state plus parent/child binding.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::reactive::property::Property;
use crate::reactive::scheduler::UiScheduler;
use crate::reactive::subscription::SubscriptionSet;

struct RouterShared<R: Clone + Send + 'static> {
    route: Property<Option<R>>,
    bindings: Mutex<SubscriptionSet>,
}

/// A component's current route: `None` means no navigation, `Some` holds
/// exactly one active case of the component's route enum.
///
/// The router also owns the component's binding set — the subscriptions a
/// parent holds on a presented child's route stream. Every rebind
/// (`route_to` or a fresh `bind`) tears the previous set down before
/// anything new is established, so a replaced child can never notify its
/// former parent.
pub struct Router<R: Clone + Send + 'static> {
    shared: Arc<RouterShared<R>>,
}

impl<R: Clone + Send + 'static> Clone for Router<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R: Clone + Send + 'static> Router<R> {
    pub fn new(scheduler: &UiScheduler) -> Self {
        Self {
            shared: Arc::new(RouterShared {
                route: Property::new(scheduler, None),
                bindings: Mutex::new(SubscriptionSet::new()),
            }),
        }
    }

    /// Snapshot of the current route.
    pub fn route(&self) -> Option<R> {
        self.shared.route.get()
    }

    /// The underlying observable, for views and for parent `bind` calls.
    pub fn property(&self) -> &Property<Option<R>> {
        &self.shared.route
    }

    /// Invalidate the current binding set, then transition to `route`.
    ///
    /// Teardown is synchronous on the calling thread: once this returns, no
    /// listener from the previous binding can fire again.
    pub fn route_to(&self, route: Option<R>) {
        self.shared.bindings.lock().clear();
        self.shared.route.set(route);
    }

    /// Subscribe to a child's route stream, replacing any prior binding.
    ///
    /// `configure` runs on the scheduler thread for every route case the
    /// child activates; a child clearing its route to `None` is not an
    /// event (completion is modeled as a terminal route case).
    pub fn bind<C, F>(&self, child_route: &Property<Option<C>>, configure: F)
    where
        C: Clone + Send + 'static,
        F: Fn(&C) + Send + Sync + 'static,
    {
        let subscription = child_route.subscribe(move |route, _| {
            if let Some(route) = route {
                configure(route);
            }
        });
        let mut bindings = self.shared.bindings.lock();
        bindings.clear();
        bindings.insert(subscription);
    }

    /// Number of live bindings; zero except between `bind` and the next
    /// rebind.
    pub fn binding_count(&self) -> usize {
        self.shared.bindings.lock().len()
    }
}
