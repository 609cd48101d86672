/// Navigation state of the account screen.
///
/// `LoggedOut` is terminal; the other cases present modally and clear
/// back to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRoute {
    ChangePassword,
    PasswordReminder,
    LoggedOut,
}
