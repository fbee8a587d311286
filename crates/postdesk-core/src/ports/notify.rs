use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::ErrorKind;

/// Receives exactly one callback per collection outcome.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn on_created(&self, post: &Post);

    async fn on_updated(&self, post: &Post);

    async fn on_deleted(&self, id: Uuid);

    async fn on_error(&self, kind: ErrorKind, message: &str);
}
