use std::sync::atomic::{AtomicBool, Ordering};

use colored::*;
use error_common::{Notification, Notifier};

/// Prints notifications to the terminal; failures go to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    failed: AtomicBool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a failure has already been shown to the user
    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::Relaxed)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        if notification.is_failure() {
            self.failed.store(true, Ordering::Relaxed);
            eprintln!("{} {}", format!("✖ {}:", notification.title).bright_red(), notification.description);
        } else {
            println!("{} {}", format!("✔ {}:", notification.title).bright_green(), notification.description);
        }
    }
}

/// Section heading for listings
pub fn heading(title: &str, count: usize) {
    println!("{} {}", title.bright_cyan().bold(), format!("({count})").dimmed());
}

pub fn empty(what: &str) {
    println!("  {}", format!("No {what} found").dimmed());
}

/// `label: value` line
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<22} {}", format!("{label}:").bright_white(), value);
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_notifier_tracks_failures() {
        let notifier = ConsoleNotifier::new();
        notifier.notify(Notification::success("Patient added successfully"));
        assert!(!notifier.has_failed());

        notifier.notify(Notification::failure("Failed to add patient"));
        assert!(notifier.has_failed());
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("Asha")), "Asha");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(None), "-");
    }
}
