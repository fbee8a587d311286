//! Conversions between store rows and domain posts.

use postdesk_core::StoreError;
use postdesk_core::domain::{NewPost, Post, PostPatch, PostStatus};
use postdesk_shared::{NewPostRow, PostPatchRow, PostRow};

/// Row to domain post. A status outside the lifecycle is a store contract breach.
pub(crate) fn post_from_row(row: PostRow) -> Result<Post, StoreError> {
    let status = row
        .status
        .parse::<PostStatus>()
        .map_err(|e| StoreError::Rejected(format!("post {}: {e}", row.id)))?;

    Ok(Post {
        id: row.id,
        owner_id: row.user_id,
        title: row.title,
        content: row.content,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub(crate) fn row_from_new_post(post: NewPost) -> NewPostRow {
    NewPostRow {
        user_id: post.owner_id,
        title: post.title,
        content: post.content,
        status: post.status.as_str().to_string(),
    }
}

pub(crate) fn row_from_patch(patch: PostPatch) -> PostPatchRow {
    PostPatchRow {
        title: patch.title,
        content: patch.content,
        status: patch.status.map(|s| s.as_str().to_string()),
    }
}
