//! User-facing notifications.
//!
//! Managers report the outcome of shopper actions as [`Notification`]s
//! through a [`Notifier`]. Rendering them (toasts, terminal output) is up to
//! the front end.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// A short message about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    /// A success notification.
    #[must_use]
    pub fn success(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            level: Level::Success,
            title: title.into(),
            description,
        }
    }

    /// An error notification.
    #[must_use]
    pub fn error(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            level: Level::Error,
            title: title.into(),
            description,
        }
    }

    /// Whether this reports a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Receives notifications.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let description = notification.description.as_deref().unwrap_or_default();
        match notification.level {
            Level::Success => tracing::info!(title = %notification.title, description, "Notification"),
            Level::Error => tracing::warn!(title = %notification.title, description, "Notification"),
        }
    }
}

/// Keeps every notification in memory.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far, oldest first.
    #[must_use]
    pub fn received(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return everything received so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(
            &mut *self
                .received
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// The most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// Log output collected in memory.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap_or_else(PoisonError::into_inner))
                .into_owned()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_tracing_notifier_logs_by_level() {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingNotifier.notify(Notification::success(
                "Added to cart",
                Some("Yoga Mat has been added to your cart".to_string()),
            ));
            TracingNotifier.notify(Notification::error("Error", None));
        });

        let output = log.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2, "{output}");
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains("Added to cart"));
        assert!(lines[0].contains("Yoga Mat has been added to your cart"));
        assert!(lines[1].contains("WARN"));
        assert!(lines[1].contains("title=Error"));
    }

    #[test]
    fn test_recording_notifier_shares_buffer_between_clones() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();

        handle.notify(Notification::success("Added to cart", None));
        handle.notify(Notification::error(
            "Failed to add item to cart",
            Some("Could not save your changes".to_string()),
        ));

        let received = notifier.received();
        assert_eq!(received.len(), 2);
        assert!(!received[0].is_error());
        assert!(received[1].is_error());

        assert_eq!(notifier.drain().len(), 2);
        assert!(notifier.last().is_none());
    }

    #[test]
    fn test_notification_serializes_level_lowercase() {
        let json = serde_json::to_value(Notification::success("Removed from cart", None))
            .expect("serialize");
        assert_eq!(json["level"], "success");
        assert_eq!(json["title"], "Removed from cart");
    }
}
