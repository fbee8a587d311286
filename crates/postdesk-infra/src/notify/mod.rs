//! Notification sinks.

mod broadcast;
mod tracing_sink;

pub use broadcast::BroadcastNotificationSink;
pub use tracing_sink::TracingNotificationSink;

use uuid::Uuid;

use postdesk_core::ErrorKind;
use postdesk_core::domain::Post;
use postdesk_shared::Notice;

pub fn created_notice(post: &Post) -> Notice {
    Notice::success("created", "Post created", "The post was created successfully")
        .with_post_id(post.id)
}

pub fn updated_notice(post: &Post) -> Notice {
    Notice::success("updated", "Post updated", "The post was updated successfully")
        .with_post_id(post.id)
}

pub fn deleted_notice(id: Uuid) -> Notice {
    Notice::success("deleted", "Post deleted", "The post was deleted successfully")
        .with_post_id(id)
}

pub fn error_notice(kind: ErrorKind, message: &str) -> Notice {
    Notice::error(kind.as_str(), message)
}
