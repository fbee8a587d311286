use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication lifecycle of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names neither `draft` nor `published`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown post status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for PostStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Post entity - a record as confirmed by the remote store.
///
/// `id`, `created_at` and `updated_at` are always assigned by the store;
/// nothing in this crate fabricates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
}

/// Partial update. `None` fields are left as the store has them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

impl PostPatch {
    pub fn status(status: PostStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.status.is_none()
    }
}

/// A complete, validated set of user-editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
}

impl PostFields {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        status: PostStatus,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            status,
        }
    }

    /// Fields used by the dashboard's one-click "new post" action.
    pub fn quick_draft() -> Self {
        Self::new("New post", "Post content...", PostStatus::Draft)
    }

    pub fn into_new_post(self, owner_id: Uuid) -> NewPost {
        NewPost {
            owner_id,
            title: self.title,
            content: self.content,
            status: self.status,
        }
    }
}

impl From<PostFields> for PostPatch {
    fn from(fields: PostFields) -> Self {
        Self {
            title: Some(fields.title),
            content: Some(fields.content),
            status: Some(fields.status),
        }
    }
}

impl From<&Post> for PostFields {
    fn from(post: &Post) -> Self {
        Self::new(post.title.clone(), post.content.clone(), post.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_only_known_values() {
        assert_eq!("draft".parse::<PostStatus>(), Ok(PostStatus::Draft));
        assert_eq!("published".parse::<PostStatus>(), Ok(PostStatus::Published));
        assert_eq!(
            "archived".parse::<PostStatus>(),
            Err(UnknownStatus("archived".to_string()))
        );
        assert!("Draft".parse::<PostStatus>().is_err());
    }

    #[test]
    fn fields_become_full_patch() {
        let patch: PostPatch = PostFields::new("T", "C", PostStatus::Published).into();
        assert_eq!(patch.title.as_deref(), Some("T"));
        assert_eq!(patch.content.as_deref(), Some("C"));
        assert_eq!(patch.status, Some(PostStatus::Published));
        assert!(PostPatch::default().is_empty());
    }

    #[test]
    fn quick_draft_is_a_draft() {
        let fields = PostFields::quick_draft();
        assert_eq!(fields.status, PostStatus::Draft);
        assert!(!fields.title.is_empty());
    }
}
