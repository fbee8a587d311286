//! Broadcast notification sink.
//!
//! Fans notices out to any number of in-process listeners.
//! Works within a single process only.

use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

use postdesk_core::ErrorKind;
use postdesk_core::domain::Post;
use postdesk_core::ports::NotificationSink;
use postdesk_shared::Notice;

use super::{created_notice, deleted_notice, error_notice, updated_notice};

pub struct BroadcastNotificationSink {
    sender: broadcast::Sender<Notice>,
}

impl BroadcastNotificationSink {
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    fn publish(&self, notice: Notice) {
        // Ignore send errors (no subscribers)
        if self.sender.send(notice).is_err() {
            tracing::debug!("No subscribers for notices");
        }
    }
}

impl Default for BroadcastNotificationSink {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl NotificationSink for BroadcastNotificationSink {
    async fn on_created(&self, post: &Post) {
        self.publish(created_notice(post));
    }

    async fn on_updated(&self, post: &Post) {
        self.publish(updated_notice(post));
    }

    async fn on_deleted(&self, id: Uuid) {
        self.publish(deleted_notice(id));
    }

    async fn on_error(&self, kind: ErrorKind, message: &str) {
        self.publish(error_notice(kind, message));
    }
}
