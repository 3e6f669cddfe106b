// Error reporting utilities
// User-facing notifications plus the log line that accompanies every failure

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::types::ClinicError;

/// Visual weight of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A transient, user-facing message ("toast")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            description: description.into(),
            variant: NotificationVariant::Default,
            created_at: Utc::now(),
        }
    }

    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
            created_at: Utc::now(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// Sink for user-facing notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that keeps every notification in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.received.lock().clone()
    }

    /// Drain everything received so far
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.lock())
    }

    pub fn has_failure(&self) -> bool {
        self.received.lock().iter().any(Notification::is_failure)
    }

    pub fn last(&self) -> Option<Notification> {
        self.received.lock().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received.lock().push(notification);
    }
}

/// Logs failures and forwards the matching notification to the user.
#[derive(Clone)]
pub struct ErrorReporter {
    notifier: Arc<dyn Notifier>,
    sanitize: fn(&str) -> String,
}

impl ErrorReporter {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            sanitize: str::to_string,
        }
    }

    /// Run error text through `sanitize` before it is logged.
    pub fn with_sanitizer(mut self, sanitize: fn(&str) -> String) -> Self {
        self.sanitize = sanitize;
        self
    }

    pub fn report_success(&self, description: impl Into<String>) {
        self.notifier.notify(Notification::success(description));
    }

    pub fn report_failure(&self, context: &str, description: &str, error: &ClinicError) {
        let message = (self.sanitize)(&error.to_string());
        tracing::error!(
            context = context,
            error_code = error.code(),
            error = %message,
            "Error {}",
            context
        );
        self.notifier.notify(Notification::failure(description));
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_is_destructive() {
        let n = Notification::failure("Failed to fetch patients");
        assert_eq!(n.title, "Error");
        assert!(n.is_failure());
        assert!(!Notification::success("Patient added successfully").is_failure());
    }

    #[test]
    fn test_reporter_forwards_to_notifier() {
        let notifier = Arc::new(RecordingNotifier::new());
        let reporter = ErrorReporter::new(notifier.clone());

        reporter.report_success("Bill created successfully");
        reporter.report_failure(
            "deleting bill",
            "Failed to delete bill",
            &ClinicError::StoreError("timeout".into()),
        );

        let received = notifier.take();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].description, "Bill created successfully");
        assert_eq!(received[1].description, "Failed to delete bill");
        assert!(notifier.notifications().is_empty());
    }
}
