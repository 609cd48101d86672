//! Feature view models.
//!
//! Each feature module follows the same layout: a `state` module with the
//! feature's route enum, and a `view_model` module with the stateful unit
//! binding properties, routing, and injected services together.

pub mod account;
pub mod fields;
pub mod login;
pub mod onboarding;
pub mod password_reminder;
pub mod whats_new;

pub use fields::FieldState;
