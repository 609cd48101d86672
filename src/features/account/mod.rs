mod state;
mod view_model;

pub use state::AccountRoute;
pub use view_model::{AccountViewModel, ReminderFactory, CANCEL_SURVEY_SUBMITTED_KEY};
pub(crate) use view_model::AccountViewModelDeps;
