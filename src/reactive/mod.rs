//! Reactive state primitives for view models.
//!
//! This module provides the building blocks for unidirectional state flow
//! between view models and a host view layer.
//!
//! # Architecture
//!
//! ```text
//! set() ──→ UiScheduler ──→ backing value ──→ subscribers ──→ view
//!                (single thread, FIFO)
//! ```
//!
//! - **UiScheduler**: a single-threaded executor all mutations are marshaled
//!   onto, standing in for main-thread confinement
//! - **Property**: an observable value; writes hop onto the scheduler and are
//!   broadcast to subscribers with a transition hint
//! - **Router**: a component's current navigation state plus the parent/child
//!   binding that is torn down and re-established on every rebind

mod property;
mod router;
mod scheduler;
mod subscription;

pub use property::{ChangeNotifier, Property, Transition};
pub use router::Router;
pub use scheduler::UiScheduler;
pub use subscription::{Subscription, SubscriptionSet};
