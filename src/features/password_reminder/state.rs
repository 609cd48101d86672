/// Navigation state of the password-reminder dialog.
///
/// `Logout` continues the interrupted logout; `Dismissed` closes the
/// dialog without logging out. Both are terminal for this dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordReminderRoute {
    Logout,
    Dismissed,
}
