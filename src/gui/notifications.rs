//! Toasts and notification history for the GUI.

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::time::Duration;

use crate::notification::{Notification, Notifier, Severity};
use crate::user_settings::UserSettings;

/// A notification as it is kept in the history
#[derive(Clone, Debug)]
pub struct NotificationEntry {
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Local>,
    /// The toast disappears after this moment; the history keeps the entry.
    pub expires_at: DateTime<Local>,
}

impl NotificationEntry {
    pub fn new(
        notification: Notification,
        default_duration: Duration,
        now: DateTime<Local>,
    ) -> Self {
        let shown_for = notification.duration.unwrap_or(default_duration);
        let shown_for =
            chrono::Duration::from_std(shown_for).unwrap_or_else(|_| chrono::Duration::seconds(5));
        Self {
            message: notification.message,
            severity: notification.severity,
            timestamp: now,
            expires_at: now + shown_for,
        }
    }

    pub fn is_active_at(&self, now: DateTime<Local>) -> bool {
        now < self.expires_at
    }

    pub fn time_ago(&self) -> String {
        self.time_ago_at(Local::now())
    }

    pub fn time_ago_at(&self, now: DateTime<Local>) -> String {
        let duration = now.signed_duration_since(self.timestamp);
        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            format!("{}m ago", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h ago", duration.num_hours())
        } else {
            self.timestamp.format("%m/%d %H:%M").to_string()
        }
    }
}

/// Collects notifications from the burn action and the rest of the UI.
pub struct NotificationCenter {
    entries: VecDeque<NotificationEntry>,
    max_history: usize,
    default_duration: Duration,
}

impl NotificationCenter {
    pub fn new(max_history: usize, default_duration: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            max_history: max_history.max(1),
            default_duration,
        }
    }

    pub fn from_settings(settings: &UserSettings) -> Self {
        Self::new(
            settings.notification_history,
            Duration::from_secs(settings.default_toast_secs),
        )
    }

    pub fn push_at(&mut self, notification: Notification, now: DateTime<Local>) {
        self.entries
            .push_back(NotificationEntry::new(notification, self.default_duration, now));
        while self.entries.len() > self.max_history {
            self.entries.pop_front();
        }
    }

    /// Oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &NotificationEntry> {
        self.entries.iter()
    }

    /// Entries whose toast is still on screen, oldest first.
    pub fn active_at(&self, now: DateTime<Local>) -> impl Iterator<Item = &NotificationEntry> {
        self.entries.iter().filter(move |e| e.is_active_at(now))
    }

    pub fn has_active(&self) -> bool {
        let now = Local::now();
        self.active_at(now).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Notifier for NotificationCenter {
    fn show_notification(&mut self, notification: Notification) {
        self.push_at(notification, Local::now());
    }
}
