use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Collects GPU errors that wgpu would otherwise raise as panics.
///
/// Installed as the device's uncaptured-error handler. Callers that issue a
/// group of GPU calls can drain the sink right after to attribute the errors
/// to that group; whatever remains is drained and logged by the runtime at the
/// end of each frame.
#[derive(Debug, Clone, Default)]
pub struct ErrorSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes uncaptured errors of `device` into this sink.
    pub fn install(&self, device: &wgpu::Device) {
        let sink = self.clone();
        device.on_uncaptured_error(Arc::new(move |err: wgpu::Error| {
            log::debug!("captured GPU error: {err}");
            sink.push(err.to_string());
        }));
    }

    pub fn push(&self, message: String) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }

    /// Removes and returns every message recorded so far, oldest first.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(
            &mut *self
                .messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

/// Tracks which drained GPU error messages have already been reported.
///
/// An invalid pipeline raises the same validation error on every frame; only
/// its first occurrence is worth an `error` line.
#[derive(Debug, Default)]
pub(crate) struct ReportedErrors {
    seen: HashSet<String>,
}

impl ReportedErrors {
    /// Returns true the first time `message` is passed in.
    pub(crate) fn first_report(&mut self, message: &str) -> bool {
        if self.seen.contains(message) {
            return false;
        }
        self.seen.insert(message.to_owned());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_drains_in_arrival_order() {
        let sink = ErrorSink::new();
        sink.push("first".into());
        sink.push("second".into());

        assert_eq!(sink.take(), vec!["first".to_string(), "second".to_string()]);
        assert!(sink.take().is_empty());
    }

    #[test]
    fn clones_share_storage() {
        let sink = ErrorSink::new();
        let handler_side = sink.clone();
        handler_side.push("validation".into());

        assert_eq!(sink.take(), vec!["validation".to_string()]);
    }

    #[test]
    fn repeated_message_is_reported_once() {
        let mut reported = ReportedErrors::default();
        assert!(reported.first_report("invalid pipeline"));
        for _ in 0..120 {
            assert!(!reported.first_report("invalid pipeline"));
        }
    }

    #[test]
    fn distinct_messages_are_each_reported() {
        let mut reported = ReportedErrors::default();
        assert!(reported.first_report("invalid pipeline"));
        assert!(reported.first_report("invalid bind group"));
        assert!(!reported.first_report("invalid bind group"));
    }
}
