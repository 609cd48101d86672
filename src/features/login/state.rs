/// Navigation state of the login screen.
///
/// `TwoFactor` presents the PIN entry; `LoggedIn` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRoute {
    TwoFactor,
    LoggedIn,
}
