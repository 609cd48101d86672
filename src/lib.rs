//! Reactive view-model core for the Nimbus cloud-storage client.
//!
//! The crate is the state and navigation layer a host UI shell links
//! against: observable properties confined to a single UI scheduler, route
//! enums with parent/child binding, a serialized snackbar queue, and the
//! feature view models (onboarding, login, password reminder, account)
//! built on top of them. All SDK-bound work — accounts, sessions, the
//! preference cache, OS notifications — sits behind narrow capability
//! traits wired together in [`container::AppServices`].

pub mod config;
pub mod container;
pub mod features;
pub mod logging;
pub mod reactive;
pub mod services;
pub mod snackbar;
pub mod timeout;

pub use container::{AppServices, AppServicesBuilder, ContainerError};
pub use reactive::{ChangeNotifier, Property, Router, Subscription, SubscriptionSet, Transition, UiScheduler};
pub use snackbar::{SnackbarDisplayer, SnackbarEntity};
