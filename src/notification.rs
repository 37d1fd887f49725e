//! Notification primitives used by the burn action.
//!
//! The action never renders anything itself; it hands [`Notification`]s to
//! whatever [`Notifier`] the host provides (toasts in the GUI, a recorder in
//! tests).

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Success => "OK",
            Severity::Warning => "!",
            Severity::Error => "!!",
        }
    }
}

/// A transient message with a severity and an optional display duration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    /// `None` means the host's default duration.
    pub duration: Option<Duration>,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            duration: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// Displays notifications to the user.
pub trait Notifier {
    fn show_notification(&mut self, notification: Notification);
}

impl Notifier for Vec<Notification> {
    fn show_notification(&mut self, notification: Notification) {
        self.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        assert_eq!(Notification::success("a").severity, Severity::Success);
        assert_eq!(Notification::warning("b").severity, Severity::Warning);
        assert_eq!(Notification::error("c").severity, Severity::Error);
    }

    #[test]
    fn test_with_duration() {
        let n = Notification::warning("slow").with_duration(Duration::from_secs(3));
        assert_eq!(n.duration, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_vec_notifier_records_in_order() {
        let mut sink: Vec<Notification> = Vec::new();
        sink.show_notification(Notification::warning("first"));
        sink.show_notification(Notification::error("second"));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].message, "first");
        assert_eq!(sink[1].message, "second");
    }
}
