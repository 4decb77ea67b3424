//! Transient user-facing notifications.
//!
//! # Responsibility
//! - Fan toast messages out to whatever UI surface is subscribed.
//! - Keep emission fire-and-forget for the data layer.
//!
//! # Invariants
//! - Emitting with no subscribers is not an error.
//! - Toasts never carry raw error objects, only presentable text.

use log::info;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 32;

/// Visual category of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Destructive,
}

/// One transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub kind: ToastKind,
}

/// Broadcast handle the data layer emits toasts through.
///
/// Cloning shares the underlying channel, so hooks and UI code can hold
/// their own handles.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribes a consumer to subsequently emitted toasts.
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }

    /// Emits a success toast.
    pub fn success(&self, title: impl Into<String>, description: impl Into<String>) {
        self.emit(Toast {
            title: title.into(),
            description: description.into(),
            kind: ToastKind::Success,
        });
    }

    /// Emits a destructive (failure) toast.
    pub fn destructive(&self, title: impl Into<String>, description: impl Into<String>) {
        self.emit(Toast {
            title: title.into(),
            description: description.into(),
            kind: ToastKind::Destructive,
        });
    }

    fn emit(&self, toast: Toast) {
        info!(
            "event=toast module=notify kind={:?} title={}",
            toast.kind, toast.title
        );
        // A send error only means nobody is listening right now.
        let _ = self.sender.send(toast);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Notifier, ToastKind};

    #[tokio::test]
    async fn subscribers_receive_emitted_toasts() {
        let notifier = Notifier::new();
        let mut receiver = notifier.subscribe();

        notifier.success("Success!", "Crewmate created successfully.");
        let toast = receiver.recv().await.unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.title, "Success!");
    }

    #[test]
    fn emitting_without_subscribers_is_not_an_error() {
        let notifier = Notifier::new();
        notifier.destructive("Error fetching crewmates", "boom");
    }
}
