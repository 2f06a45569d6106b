//! Toast notifications.
//!
//! Widgets report outcomes through the [`Notifier`] trait and never wait on
//! it. The terminal UI uses [`ToastQueue`], which keeps toasts around for a
//! configurable time so the status area can show them.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn new(title: impl Into<String>, message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant,
        }
    }
}

/// Fire-and-forget notification sink
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Shared queue of recent toasts
#[derive(Clone)]
pub struct ToastQueue {
    toasts: Arc<Mutex<VecDeque<(Toast, Instant)>>>,
    ttl: Duration,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(VecDeque::new())),
            ttl,
        }
    }

    /// Newest toast that has not expired yet
    pub fn current(&self) -> Option<Toast> {
        let Ok(mut toasts) = self.toasts.lock() else {
            return None;
        };
        let ttl = self.ttl;
        toasts.retain(|(_, shown_at)| shown_at.elapsed() < ttl);
        toasts.back().map(|(toast, _)| toast.clone())
    }

    /// Every toast received so far, oldest first, emptying the queue
    pub fn drain(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|mut toasts| toasts.drain(..).map(|(toast, _)| toast).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.toasts.lock().map(|toasts| toasts.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::constants::DEFAULT_TOAST_SECONDS))
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Error => log::warn!("Toast [{}] {}", toast.title, toast.message),
            ToastVariant::Success => log::info!("Toast [{}] {}", toast.title, toast.message),
        }
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push_back((toast, Instant::now()));
        }
    }
}
