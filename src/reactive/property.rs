//! Observable values confined to the UI scheduler.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::reactive::scheduler::UiScheduler;
use crate::reactive::subscription::Subscription;

/// Hint delivered to subscribers alongside a new value.
///
/// `Animated` is the default; `Immediate` is requested per-mutation via
/// [`Property::set_without_animation`] and applies to that one write only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Animated,
    Immediate,
}

type Listener<T> = Arc<dyn Fn(&T, Transition) + Send + Sync>;

struct ListenerEntry<T> {
    id: u64,
    listener: Listener<T>,
}

struct PropertyShared<T> {
    scheduler: UiScheduler,
    value: Mutex<T>,
    listeners: Mutex<Vec<ListenerEntry<T>>>,
    owner: Mutex<Option<ChangeNotifier>>,
    next_listener_id: AtomicU64,
}

/// A single mutable value whose writes are marshaled onto the UI scheduler
/// and broadcast to subscribers.
///
/// `get` is a synchronous snapshot from any thread. `set` never mutates on
/// the calling thread: the write and every notification happen on the
/// scheduler, in dispatch order, so subscribers see exactly one notification
/// per write with no reordering.
pub struct Property<T> {
    shared: Arc<PropertyShared<T>>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Property<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(scheduler: &UiScheduler, initial: T) -> Self {
        Self {
            shared: Arc::new(PropertyShared {
                scheduler: scheduler.clone(),
                value: Mutex::new(initial),
                listeners: Mutex::new(Vec::new()),
                owner: Mutex::new(None),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    /// Create a property already wired to an owner-changed signal.
    pub fn with_owner(scheduler: &UiScheduler, initial: T, owner: ChangeNotifier) -> Self {
        let property = Self::new(scheduler, initial);
        property.set_owner(owner);
        property
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.shared.value.lock().clone()
    }

    /// Store a new value with the default animated transition hint.
    pub fn set(&self, value: T) {
        self.store(value, Transition::Animated);
    }

    /// Store a new value, suppressing the transition hint for this write
    /// only. The next `set` animates again.
    pub fn set_without_animation(&self, value: T) {
        self.store(value, Transition::Immediate);
    }

    fn store(&self, value: T, transition: Transition) {
        let shared = Arc::clone(&self.shared);
        self.shared.scheduler.dispatch(move || {
            *shared.value.lock() = value.clone();
            // Listeners are invoked outside the list lock so a callback may
            // subscribe or cancel without deadlocking.
            let listeners: Vec<Listener<T>> = shared
                .listeners
                .lock()
                .iter()
                .map(|entry| Arc::clone(&entry.listener))
                .collect();
            for listener in listeners {
                listener(&value, transition);
            }
            let owner = shared.owner.lock().clone();
            if let Some(owner) = owner {
                owner.notify();
            }
        });
    }

    /// Observe every subsequent mutation.
    ///
    /// The callback runs on the scheduler thread. There is no initial
    /// replay; only writes issued after the subscription are delivered.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T, Transition) + Send + Sync + 'static,
    {
        let id = self.shared.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.shared.listeners.lock().push(ListenerEntry {
            id,
            listener: Arc::new(listener),
        });

        let weak: Weak<PropertyShared<T>> = Arc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.listeners.lock().retain(|entry| entry.id != id);
            }
        })
    }

    /// Attach the owner-changed signal fired after each mutation, letting a
    /// containing view model trigger a host re-render.
    pub fn set_owner(&self, owner: ChangeNotifier) {
        *self.shared.owner.lock() = Some(owner);
    }

    /// Scheduler this property is confined to.
    pub fn scheduler(&self) -> &UiScheduler {
        &self.shared.scheduler
    }
}

struct NotifierShared {
    listeners: Mutex<Vec<(u64, Arc<dyn Fn() + Send + Sync>)>>,
    next_listener_id: AtomicU64,
}

/// Payload-free change signal shared by every property of one view model.
#[derive(Clone)]
pub struct ChangeNotifier {
    shared: Arc<NotifierShared>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(NotifierShared {
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.shared.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.shared.listeners.lock().push((id, Arc::new(listener)));

        let weak = Arc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.listeners.lock().retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    pub fn notify(&self) {
        let listeners: Vec<Arc<dyn Fn() + Send + Sync>> = self
            .shared
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn get_returns_latest_value_after_flush() {
        let scheduler = UiScheduler::new();
        let property = Property::new(&scheduler, 0u32);
        property.set(7);
        scheduler.flush();
        assert_eq!(property.get(), 7);
    }

    #[test]
    fn subscribers_see_every_write_in_order() {
        let scheduler = UiScheduler::new();
        let property = Property::new(&scheduler, 0u32);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = property.subscribe(move |value, _| sink.lock().push(*value));

        for i in 1..=5 {
            property.set(i);
        }
        scheduler.flush();
        assert_eq!(*seen.lock(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn set_without_animation_affects_only_that_write() {
        let scheduler = UiScheduler::new();
        let property = Property::new(&scheduler, 0u32);
        let hints = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&hints);
        let _subscription = property.subscribe(move |_, transition| sink.lock().push(transition));

        property.set(1);
        property.set_without_animation(2);
        property.set(3);
        scheduler.flush();
        assert_eq!(
            *hints.lock(),
            vec![
                Transition::Animated,
                Transition::Immediate,
                Transition::Animated
            ]
        );
    }

    #[test]
    fn cancelled_subscription_receives_nothing() {
        let scheduler = UiScheduler::new();
        let property = Property::new(&scheduler, 0u32);
        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        let subscription = property.subscribe(move |_, _| {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        property.set(1);
        scheduler.flush();
        subscription.cancel();
        property.set(2);
        scheduler.flush();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn owner_notifier_fires_after_each_write() {
        let scheduler = UiScheduler::new();
        let property = Property::new(&scheduler, 0u32);
        let notifier = ChangeNotifier::new();
        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        let _subscription = notifier.subscribe(move || {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        property.set_owner(notifier);

        property.set(1);
        property.set(2);
        scheduler.flush();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
