//! In-memory post store - used as fallback when no remote store is configured.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use postdesk_core::StoreError;
use postdesk_core::domain::{NewPost, Post, PostPatch};
use postdesk_core::ports::PostStore;

struct StoredPost {
    /// Insertion order, breaks `created_at` ties.
    seq: u64,
    post: Post,
}

/// In-memory post store using a HashMap with async RwLock.
///
/// Assigns ids and timestamps the way the remote store would.
/// Note: Data is lost on process restart.
pub struct InMemoryPostStore {
    rows: RwLock<HashMap<Uuid, StoredPost>>,
    next_seq: AtomicU64,
    injected: Mutex<Option<StoreError>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
            injected: Mutex::new(None),
        }
    }

    /// Make the next store call fail with `err`.
    pub async fn fail_next(&self, err: StoreError) {
        *self.injected.lock().await = Some(err);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    async fn injected_failure(&self, op: &'static str) -> Result<(), StoreError> {
        match self.injected.lock().await.take() {
            Some(err) => {
                tracing::debug!(op, error = %err, "Injected store failure");
                Err(err)
            }
            None => Ok(()),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Post>, StoreError> {
        self.injected_failure("list").await?;

        let rows = self.rows.read().await;
        let mut owned: Vec<&StoredPost> = rows
            .values()
            .filter(|row| row.post.owner_id == owner_id)
            .collect();
        // Newest first; equal timestamps fall back to newest insert first.
        owned.sort_by(|a, b| {
            b.post
                .created_at
                .cmp(&a.post.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(owned.into_iter().map(|row| row.post.clone()).collect())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        self.injected_failure("insert").await?;

        if post.title.trim().is_empty() {
            return Err(StoreError::Rejected("title must not be empty".to_string()));
        }

        let now = Utc::now();
        let stored = Post {
            id: Uuid::new_v4(),
            owner_id: post.owner_id,
            title: post.title,
            content: post.content,
            status: post.status,
            created_at: now,
            updated_at: now,
        };

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.rows.write().await.insert(
            stored.id,
            StoredPost {
                seq,
                post: stored.clone(),
            },
        );

        tracing::debug!(post_id = %stored.id, "Post inserted");
        Ok(stored)
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, StoreError> {
        self.injected_failure("update").await?;

        let mut rows = self.rows.write().await;
        let row = rows.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(StoreError::Rejected("title must not be empty".to_string()));
            }
            row.post.title = title;
        }
        if let Some(content) = patch.content {
            row.post.content = content;
        }
        if let Some(status) = patch.status {
            row.post.status = status;
        }
        row.post.updated_at = Utc::now().max(row.post.created_at);

        Ok(row.post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.injected_failure("delete").await?;

        let mut rows = self.rows.write().await;
        rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}
