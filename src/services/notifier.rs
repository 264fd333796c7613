//! Transient user notifications ("toasts").
//!
//! Every toast is logged through `tracing` and kept in a small bounded queue
//! that the front end drains and displays.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::types::notification::{Toast, ToastLevel};

/// Oldest toasts are dropped past this many undisplayed entries.
const MAX_PENDING: usize = 32;

/// Cloneable handle to a shared toast queue.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    pending: Arc<Mutex<VecDeque<Toast>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&self, level: ToastLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            ToastLevel::Error => tracing::error!(%message, "notification"),
            ToastLevel::Warning => tracing::warn!(%message, "notification"),
            ToastLevel::Success | ToastLevel::Info => tracing::info!(%message, "notification"),
        }

        // A poisoned queue only loses the toast; the log line above still went out.
        if let Ok(mut queue) = self.pending.lock() {
            if queue.len() == MAX_PENDING {
                queue.pop_front();
            }
            queue.push_back(Toast { level, message });
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(ToastLevel::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(ToastLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(ToastLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(ToastLevel::Error, message);
    }

    /// Removes and returns every pending toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        self.pending
            .lock()
            .map(|mut queue| queue.drain(..).collect())
            .unwrap_or_default()
    }
}
