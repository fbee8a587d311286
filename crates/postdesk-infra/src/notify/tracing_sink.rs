//! Notification sink that reports outcomes through `tracing`.

use async_trait::async_trait;
use uuid::Uuid;

use postdesk_core::ErrorKind;
use postdesk_core::domain::Post;
use postdesk_core::ports::NotificationSink;

/// Reports outcomes as log events. The terminal is the user's toast.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn on_created(&self, post: &Post) {
        tracing::info!(post_id = %post.id, title = %post.title, status = %post.status, "Post created");
    }

    async fn on_updated(&self, post: &Post) {
        tracing::info!(post_id = %post.id, title = %post.title, status = %post.status, "Post updated");
    }

    async fn on_deleted(&self, id: Uuid) {
        tracing::info!(post_id = %id, "Post deleted");
    }

    async fn on_error(&self, kind: ErrorKind, message: &str) {
        tracing::error!(kind = %kind, "{}", message);
    }
}
