//! Transient notification queue.
//!
//! Any component may hand a message to the [`SnackbarDisplayer`] at any
//! time; the displayer guarantees at most one message is on screen and
//! advances FIFO as messages are dismissed.

mod displayer;
mod entity;

pub use displayer::SnackbarDisplayer;
pub use entity::{SnackbarEntity, DEFAULT_SHOW_DURATION};
