use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub raised_at: Instant,
}

/// Fire-and-forget sink for user-visible messages. Delivery is best effort.
pub trait Notifier {
    fn notify(&self, severity: Severity, message: String);

    fn success(&self, message: String) {
        self.notify(Severity::Success, message);
    }

    fn error(&self, message: String) {
        self.notify(Severity::Error, message);
    }
}

/// In-memory notification list; the window renders it as toasts.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.lock()
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|n| n.message.clone()).collect()
    }

    /// Drops every entry older than `ttl`.
    pub fn expire(&self, ttl: Duration) {
        let now = Instant::now();
        self.lock()
            .retain(|n| now.saturating_duration_since(n.raised_at) < ttl);
    }

    pub fn dismiss(&self, index: usize) {
        let mut entries = self.lock();
        if index < entries.len() {
            entries.remove(index);
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        // a poisoned log still holds valid entries
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, severity: Severity, message: String) {
        log_notification(severity, &message);
        self.lock().push(Notification {
            severity,
            message,
            raised_at: Instant::now(),
        });
    }
}

fn log_notification(severity: Severity, message: &str) {
    match severity {
        Severity::Success => tracing::info!(%message, "notification"),
        Severity::Error => tracing::warn!(%message, "notification"),
    }
}
