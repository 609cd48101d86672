mod state;
mod view_model;

pub use state::LoginRoute;
pub use view_model::LoginViewModel;
