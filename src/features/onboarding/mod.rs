mod state;
mod view_model;

pub use state::{AuthDestination, DataUsageRoute, OnboardingRoute};
pub use view_model::{
    DataUsageNoticeViewModel, OnboardingViewModel, DATA_USAGE_NOTICE_SHOWN_KEY,
};
