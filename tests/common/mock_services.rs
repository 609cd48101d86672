//! Mock service implementations for testing view models.
//!
//! Each mock captures its calls for assertions and returns scripted
//! responses, falling back to a benign default when nothing is enqueued.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use nimbus::features::password_reminder::{PasswordReminderRepository, ReminderOutcome};
use nimbus::services::{
    Account, AccountDetails, AccountError, AccountService, AnalyticsEvent, AnalyticsSink,
    AuthError, AuthService, CancelSurveyAnswer, ClipboardError, ClipboardService, ExportError,
    FileExporter, NotificationRequest, NotificationScheduling, NotifyError, PlanTier,
    SecureString, Session,
};

pub fn sample_account() -> Account {
    Account {
        email: "user@example.com".to_string(),
        display_name: "Test User".to_string(),
        plan: PlanTier::Pro,
    }
}

pub fn sample_details() -> AccountDetails {
    AccountDetails {
        storage_used_bytes: 20 * 1024 * 1024 * 1024,
        storage_max_bytes: 400 * 1024 * 1024 * 1024,
        transfer_used_bytes: 1024,
        transfer_max_bytes: 8 * 1024,
        plan_expiry: None,
    }
}

// -- Auth ----------------------------------------------------------------------

/// A captured login attempt: username plus exposed password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLogin {
    pub username: String,
    pub password: String,
    pub pin: Option<String>,
}

pub struct MockAuthService {
    login_results: Mutex<VecDeque<Result<(), AuthError>>>,
    two_factor_results: Mutex<VecDeque<Result<(), AuthError>>>,
    verify_result: Mutex<Result<bool, AuthError>>,
    login_calls: Mutex<Vec<CapturedLogin>>,
    verify_calls: AtomicUsize,
    logout_calls: AtomicUsize,
    session: Mutex<Option<Session>>,
}

impl MockAuthService {
    pub fn new() -> Self {
        Self {
            login_results: Mutex::new(VecDeque::new()),
            two_factor_results: Mutex::new(VecDeque::new()),
            verify_result: Mutex::new(Ok(false)),
            login_calls: Mutex::new(Vec::new()),
            verify_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            session: Mutex::new(None),
        }
    }

    /// Script the next `login` outcome; default is success.
    pub fn enqueue_login_result(&self, result: Result<(), AuthError>) {
        self.login_results.lock().push_back(result);
    }

    /// Script the next `login_with_two_factor` outcome; default is success.
    pub fn enqueue_two_factor_result(&self, result: Result<(), AuthError>) {
        self.two_factor_results.lock().push_back(result);
    }

    pub fn set_verify_result(&self, result: Result<bool, AuthError>) {
        *self.verify_result.lock() = result;
    }

    pub fn login_calls(&self) -> Vec<CapturedLogin> {
        self.login_calls.lock().clone()
    }

    pub fn verify_count(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn logout_count(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    fn complete(&self, username: &str, scripted: Option<Result<(), AuthError>>) -> Result<Session, AuthError> {
        match scripted.unwrap_or(Ok(())) {
            Ok(()) => {
                let session = Session {
                    user_email: username.to_string(),
                };
                *self.session.lock() = Some(session.clone());
                Ok(session)
            }
            Err(error) => Err(error),
        }
    }
}

impl AuthService for MockAuthService {
    fn login(&self, username: &str, password: &SecureString) -> Result<Session, AuthError> {
        self.login_calls.lock().push(CapturedLogin {
            username: username.to_string(),
            password: password.expose().to_string(),
            pin: None,
        });
        let scripted = self.login_results.lock().pop_front();
        self.complete(username, scripted)
    }

    fn login_with_two_factor(
        &self,
        username: &str,
        password: &SecureString,
        pin: &str,
    ) -> Result<Session, AuthError> {
        self.login_calls.lock().push(CapturedLogin {
            username: username.to_string(),
            password: password.expose().to_string(),
            pin: Some(pin.to_string()),
        });
        let scripted = self.two_factor_results.lock().pop_front();
        self.complete(username, scripted)
    }

    fn current_session(&self) -> Option<Session> {
        self.session.lock().clone()
    }

    fn verify_password(&self, _password: &SecureString) -> Result<bool, AuthError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.verify_result.lock().clone()
    }

    fn logout(&self) -> Result<(), AuthError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        *self.session.lock() = None;
        Ok(())
    }
}

// -- Account -------------------------------------------------------------------

pub struct MockAccountService {
    account_results: Mutex<VecDeque<Result<Account, AccountError>>>,
    details_results: Mutex<VecDeque<Result<AccountDetails, AccountError>>>,
    change_password_results: Mutex<VecDeque<Result<(), AccountError>>>,
    survey_results: Mutex<VecDeque<Result<(), AccountError>>>,
    survey_calls: Mutex<Vec<CancelSurveyAnswer>>,
    change_password_calls: AtomicUsize,
}

impl MockAccountService {
    pub fn new() -> Self {
        Self {
            account_results: Mutex::new(VecDeque::new()),
            details_results: Mutex::new(VecDeque::new()),
            change_password_results: Mutex::new(VecDeque::new()),
            survey_results: Mutex::new(VecDeque::new()),
            survey_calls: Mutex::new(Vec::new()),
            change_password_calls: AtomicUsize::new(0),
        }
    }

    pub fn enqueue_account_result(&self, result: Result<Account, AccountError>) {
        self.account_results.lock().push_back(result);
    }

    pub fn enqueue_details_result(&self, result: Result<AccountDetails, AccountError>) {
        self.details_results.lock().push_back(result);
    }

    pub fn enqueue_change_password_result(&self, result: Result<(), AccountError>) {
        self.change_password_results.lock().push_back(result);
    }

    pub fn enqueue_survey_result(&self, result: Result<(), AccountError>) {
        self.survey_results.lock().push_back(result);
    }

    pub fn survey_calls(&self) -> Vec<CancelSurveyAnswer> {
        self.survey_calls.lock().clone()
    }

    pub fn change_password_count(&self) -> usize {
        self.change_password_calls.load(Ordering::SeqCst)
    }
}

impl AccountService for MockAccountService {
    fn fetch_account(&self) -> Result<Account, AccountError> {
        self.account_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(sample_account()))
    }

    fn fetch_account_details(&self) -> Result<AccountDetails, AccountError> {
        self.details_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(sample_details()))
    }

    fn change_password(
        &self,
        _current: &SecureString,
        _new: &SecureString,
    ) -> Result<(), AccountError> {
        self.change_password_calls.fetch_add(1, Ordering::SeqCst);
        self.change_password_results
            .lock()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    fn submit_cancel_survey(&self, answer: &CancelSurveyAnswer) -> Result<(), AccountError> {
        self.survey_calls.lock().push(answer.clone());
        self.survey_results.lock().pop_front().unwrap_or(Ok(()))
    }
}

// -- Recording sinks -----------------------------------------------------------

pub struct RecordingAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().clone()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        self.events.lock().push(event);
    }
}

pub struct RecordingClipboard {
    copied: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self {
            copied: Mutex::new(Vec::new()),
        }
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.lock().clone()
    }
}

impl ClipboardService for RecordingClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        self.copied.lock().push(text.to_string());
        Ok(())
    }
}

pub struct RecordingExporter {
    files: Mutex<Vec<(String, String)>>,
}

impl RecordingExporter {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(Vec::new()),
        }
    }

    pub fn files(&self) -> Vec<(String, String)> {
        self.files.lock().clone()
    }
}

impl FileExporter for RecordingExporter {
    fn write_text_file(&self, file_name: &str, contents: &str) -> Result<PathBuf, ExportError> {
        self.files
            .lock()
            .push((file_name.to_string(), contents.to_string()));
        Ok(PathBuf::from("/exports").join(file_name))
    }
}

pub struct RecordingNotifications {
    requested: Mutex<Vec<NotificationRequest>>,
    cancelled: Mutex<Vec<String>>,
}

impl RecordingNotifications {
    pub fn new() -> Self {
        Self {
            requested: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<NotificationRequest> {
        self.requested.lock().clone()
    }

    pub fn cancelled(&self) -> Vec<String> {
        self.cancelled.lock().clone()
    }
}

impl NotificationScheduling for RecordingNotifications {
    fn request(&self, request: NotificationRequest) -> Result<(), NotifyError> {
        self.requested.lock().push(request);
        Ok(())
    }

    fn cancel(&self, ids: &[String]) {
        self.cancelled.lock().extend(ids.iter().cloned());
    }
}

// -- Password reminder ---------------------------------------------------------

/// Repository counting every mark call for exact-once assertions.
pub struct CountingReminderRepository {
    skipped: AtomicUsize,
    blocked: AtomicUsize,
    succeeded: AtomicUsize,
    outcome: Mutex<ReminderOutcome>,
}

impl CountingReminderRepository {
    pub fn new() -> Self {
        Self {
            skipped: AtomicUsize::new(0),
            blocked: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            outcome: Mutex::new(ReminderOutcome::Pending),
        }
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.load(Ordering::SeqCst)
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.load(Ordering::SeqCst)
    }

    pub fn succeeded_count(&self) -> usize {
        self.succeeded.load(Ordering::SeqCst)
    }

    pub fn set_outcome(&self, outcome: ReminderOutcome) {
        *self.outcome.lock() = outcome;
    }
}

impl PasswordReminderRepository for CountingReminderRepository {
    fn mark_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
        *self.outcome.lock() = ReminderOutcome::Skipped;
    }

    fn mark_blocked(&self) {
        self.blocked.fetch_add(1, Ordering::SeqCst);
        *self.outcome.lock() = ReminderOutcome::Blocked;
    }

    fn mark_succeeded(&self) {
        self.succeeded.fetch_add(1, Ordering::SeqCst);
        *self.outcome.lock() = ReminderOutcome::Succeeded;
    }

    fn outcome(&self) -> ReminderOutcome {
        *self.outcome.lock()
    }
}
