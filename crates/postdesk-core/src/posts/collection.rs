//! Owner-scoped post list kept in step with the store.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::gate::MutationGate;
use crate::domain::{Post, PostFields, PostPatch, PostStatus};
use crate::editor::Mutation;
use crate::error::{PostError, StoreError};
use crate::ports::{NotificationSink, PostStore, SessionProvider};

#[derive(Default)]
struct CollectionState {
    /// Owner the current list belongs to.
    owner: Option<Uuid>,
    posts: Vec<Post>,
    /// Loads still waiting on the store.
    loads_in_flight: usize,
}

/// Owner-scoped list of posts, patched only from store-confirmed records.
///
/// Every operation reports exactly one outcome to the notification sink.
/// A failed operation leaves the list as it was, except `load`, which
/// leaves it empty.
///
/// # Example
/// ```ignore
/// let posts = PostCollection::new(store, session, sink);
/// posts.load().await?;
/// let post = posts.create(PostFields::new("Hello", "World", PostStatus::Draft)).await?;
/// posts.set_status(post.id, PostStatus::Published).await?;
/// ```
pub struct PostCollection {
    store: Arc<dyn PostStore>,
    session: Arc<dyn SessionProvider>,
    sink: Arc<dyn NotificationSink>,
    state: RwLock<CollectionState>,
    gate: MutationGate,
}

impl PostCollection {
    pub fn new(
        store: Arc<dyn PostStore>,
        session: Arc<dyn SessionProvider>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            session,
            sink,
            state: RwLock::new(CollectionState::default()),
            gate: MutationGate::default(),
        }
    }

    /// Snapshot of the list, most recently created first.
    pub async fn posts(&self) -> Vec<Post> {
        self.state.read().await.posts.clone()
    }

    pub async fn get(&self, id: Uuid) -> Option<Post> {
        self.state
            .read()
            .await
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.posts.is_empty()
    }

    /// True while any `load` is waiting on the store.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loads_in_flight > 0
    }

    pub async fn owner(&self) -> Option<Uuid> {
        self.state.read().await.owner
    }

    /// Replace the list with the owner's posts as the store orders them.
    ///
    /// No retry: a failed load leaves an empty list until called again.
    pub async fn load(&self) -> Result<(), PostError> {
        let owner = self.require_owner().await?;

        self.state.write().await.loads_in_flight += 1;
        tracing::debug!(owner_id = %owner, "Loading posts");

        let result = self
            .store
            .list(owner)
            .await
            .and_then(|posts| ensure_owned_by(owner, posts));

        let mut state = self.state.write().await;
        state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
        state.owner = Some(owner);

        match result {
            Ok(posts) => {
                tracing::info!(owner_id = %owner, count = posts.len(), "Posts loaded");
                state.posts = posts;
                Ok(())
            }
            Err(cause) => {
                state.posts.clear();
                drop(state);
                self.fail(PostError::LoadFailed(cause)).await
            }
        }
    }

    /// Insert a post and prepend the stored record.
    pub async fn create(&self, fields: PostFields) -> Result<Post, PostError> {
        let owner = self.require_owner().await?;

        let post = match self.store.insert(fields.into_new_post(owner)).await {
            Ok(post) if post.owner_id != owner => {
                let cause = StoreError::Rejected(format!(
                    "insert returned a post owned by {}",
                    post.owner_id
                ));
                return self.fail(PostError::CreateFailed(cause)).await;
            }
            Ok(post) => post,
            Err(cause) => return self.fail(PostError::CreateFailed(cause)).await,
        };

        let mut state = self.state.write().await;
        if state.owner != Some(owner) {
            // The session moved on while the insert was in flight.
            tracing::warn!(
                post_id = %post.id,
                owner_id = %owner,
                "Created post belongs to a previous session, not listing it"
            );
        } else if let Some(entry) = state.posts.iter_mut().find(|p| p.id == post.id) {
            // A load that finished first already picked up the new row.
            tracing::debug!(post_id = %post.id, "Created post already listed, refreshing entry");
            *entry = post.clone();
        } else {
            state.posts.insert(0, post.clone());
        }
        drop(state);

        tracing::info!(post_id = %post.id, owner_id = %owner, status = %post.status, "Post created");
        self.sink.on_created(&post).await;
        Ok(post)
    }

    /// One-click draft with placeholder title and content.
    pub async fn quick_create(&self) -> Result<Post, PostError> {
        self.create(PostFields::quick_draft()).await
    }

    /// Apply a partial update and replace the entry in place.
    ///
    /// `id` must already be in the list; unknown ids fail without a store call.
    pub async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, PostError> {
        self.require_owner().await?;
        let _guard = self.gate.acquire(id).await;

        if !self.contains(id).await {
            return self.fail(PostError::UnknownPost(id)).await;
        }

        let post = match self.store.update(id, patch).await {
            Ok(post) if post.id != id => {
                let cause = StoreError::Rejected(format!("update returned post {}", post.id));
                return self.fail(PostError::UpdateFailed { id, cause }).await;
            }
            Ok(post) => post,
            Err(cause) => return self.fail(PostError::UpdateFailed { id, cause }).await,
        };

        let mut state = self.state.write().await;
        match state.posts.iter_mut().find(|p| p.id == id) {
            Some(entry) => *entry = post.clone(),
            None => tracing::warn!(post_id = %id, "Post left the list while its update was in flight"),
        }
        drop(state);

        tracing::info!(post_id = %id, status = %post.status, "Post updated");
        self.sink.on_updated(&post).await;
        Ok(post)
    }

    /// Publish or unpublish a post.
    pub async fn set_status(&self, id: Uuid, status: PostStatus) -> Result<Post, PostError> {
        self.update(id, PostPatch::status(status)).await
    }

    /// Delete a post. Confirmation is the caller's job.
    pub async fn delete(&self, id: Uuid) -> Result<(), PostError> {
        self.require_owner().await?;
        let _guard = self.gate.acquire(id).await;

        if !self.contains(id).await {
            return self.fail(PostError::UnknownPost(id)).await;
        }

        if let Err(cause) = self.store.delete(id).await {
            return self.fail(PostError::DeleteFailed { id, cause }).await;
        }

        self.state.write().await.posts.retain(|p| p.id != id);

        tracing::info!(post_id = %id, "Post deleted");
        self.sink.on_deleted(id).await;
        Ok(())
    }

    /// Run a mutation produced by an edit session.
    pub async fn apply(&self, mutation: Mutation) -> Result<Post, PostError> {
        match mutation {
            Mutation::Create(fields) => self.create(fields).await,
            Mutation::Update { id, patch } => self.update(id, patch).await,
        }
    }

    async fn contains(&self, id: Uuid) -> bool {
        self.state.read().await.posts.iter().any(|p| p.id == id)
    }

    /// Current session owner. Clears the list if it belonged to someone else.
    async fn require_owner(&self) -> Result<Uuid, PostError> {
        let Some(owner) = self.session.current_owner() else {
            return self.fail(PostError::Unauthenticated).await;
        };

        let mut state = self.state.write().await;
        match state.owner {
            Some(previous) if previous != owner => {
                tracing::warn!(
                    previous_owner = %previous,
                    owner_id = %owner,
                    dropped = state.posts.len(),
                    "Session owner changed, clearing post list"
                );
                state.posts.clear();
                state.owner = Some(owner);
            }
            Some(_) => {}
            None => state.owner = Some(owner),
        }

        Ok(owner)
    }

    async fn fail<T>(&self, err: PostError) -> Result<T, PostError> {
        let message = err.message();
        tracing::warn!(
            kind = %err.kind(),
            cause = ?err.cause_kind(),
            "{}",
            message
        );
        self.sink.on_error(err.kind(), &message).await;
        Err(err)
    }
}

fn ensure_owned_by(owner: Uuid, posts: Vec<Post>) -> Result<Vec<Post>, StoreError> {
    match posts.iter().find(|p| p.owner_id != owner) {
        Some(foreign) => Err(StoreError::Rejected(format!(
            "list returned post {} owned by {}",
            foreign.id, foreign.owner_id
        ))),
        None => Ok(posts),
    }
}
