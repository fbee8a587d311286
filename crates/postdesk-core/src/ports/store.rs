use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostPatch};
use crate::error::StoreError;

/// Remote post store - owner-scoped CRUD over the "posts" collection.
///
/// Implementations own timeouts and transport concerns; the core imposes none.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts of `owner_id`, most recently created first.
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Post>, StoreError>;

    /// Insert a post and return it as stored, with id and timestamps assigned.
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Apply a partial update and return the stored record.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, StoreError>;

    /// Delete a post by its ID.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
