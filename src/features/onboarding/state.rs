/// Where the user is headed after the data-usage notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDestination {
    Login,
    Signup,
}

/// Navigation state of the onboarding wizard.
///
/// Flow: `None → DataUsage → Login|Signup → LoggedIn`. The notice step is
/// skipped when it was already acknowledged on this device. `LoggedIn` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingRoute {
    /// Data-usage notice is presented; `then` is the pending destination.
    DataUsage { then: AuthDestination },
    Login,
    Signup,
    LoggedIn,
}

/// Completion signal of the data-usage notice child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataUsageRoute {
    Agreed,
}
