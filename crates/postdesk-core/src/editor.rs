//! Post edit session - the create-or-edit form as an explicit state machine.
//!
//! A [`PostEditor`] is either idle or holds one open [`EditSession`].
//! Submitting a valid session yields a [`Mutation`] for
//! [`PostCollection::apply`](crate::PostCollection::apply); the editor itself
//! never talks to the store.

use uuid::Uuid;

use crate::domain::{Post, PostFields, PostPatch, PostStatus};
use crate::error::{EditorError, Field};

/// What the session will produce on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Create,
    /// Edit an existing post; the draft starts from its current values.
    Edit(Post),
}

/// A validated request for the post collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create(PostFields),
    Update { id: Uuid, patch: PostPatch },
}

/// Working copy of the form. Kept as raw text until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Draft {
    title: String,
    content: String,
    status: String,
}

/// One open form interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    mode: EditMode,
    draft: Draft,
}

impl EditSession {
    pub fn new(mode: EditMode) -> Self {
        let draft = match &mode {
            EditMode::Create => Draft {
                title: String::new(),
                content: String::new(),
                status: PostStatus::Draft.as_str().to_string(),
            },
            EditMode::Edit(target) => Draft {
                title: target.title.clone(),
                content: target.content.clone(),
                status: target.status.as_str().to_string(),
            },
        };

        Self { mode, draft }
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    /// The post being edited, if any.
    pub fn target(&self) -> Option<&Post> {
        match &self.mode {
            EditMode::Create => None,
            EditMode::Edit(post) => Some(post),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.draft.title,
            Field::Content => &self.draft.content,
            Field::Status => &self.draft.status,
        }
    }

    /// Overwrite one draft field. Validation waits for submit.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.draft.title = value,
            Field::Content => self.draft.content = value,
            Field::Status => self.draft.status = value,
        }
    }

    /// Check the draft and build the mutation it stands for.
    pub fn validate(&self) -> Result<Mutation, EditorError> {
        let mut invalid = Vec::new();
        if self.draft.title.trim().is_empty() {
            invalid.push(Field::Title);
        }
        if self.draft.content.trim().is_empty() {
            invalid.push(Field::Content);
        }
        let status = self.draft.status.parse::<PostStatus>();
        if status.is_err() {
            invalid.push(Field::Status);
        }

        let status = match status {
            Ok(status) if invalid.is_empty() => status,
            _ => return Err(EditorError::Validation(invalid)),
        };

        let fields = PostFields::new(self.draft.title.clone(), self.draft.content.clone(), status);
        Ok(match &self.mode {
            EditMode::Create => Mutation::Create(fields),
            EditMode::Edit(target) => Mutation::Update {
                id: target.id,
                patch: fields.into(),
            },
        })
    }
}

/// Single-slot holder for the active edit session.
#[derive(Debug, Default)]
pub struct PostEditor {
    active: Option<EditSession>,
}

impl PostEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.active.as_ref()
    }

    /// Open a session. An already open session is cancelled and handed back.
    pub fn begin(&mut self, mode: EditMode) -> Option<EditSession> {
        let displaced = self.active.replace(EditSession::new(mode));

        if let Some(previous) = &displaced {
            tracing::info!(
                target_post = ?previous.target().map(|p| p.id),
                "Edit session replaced, previous draft cancelled"
            );
        }

        displaced
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), EditorError> {
        let session = self.active.as_mut().ok_or(EditorError::NotOpen)?;
        session.set_field(field, value);
        Ok(())
    }

    /// Validate and close the session.
    ///
    /// On a validation error the session stays open for correction.
    pub fn submit(&mut self) -> Result<Mutation, EditorError> {
        let session = self.active.as_ref().ok_or(EditorError::NotOpen)?;

        match session.validate() {
            Ok(mutation) => {
                self.active = None;
                Ok(mutation)
            }
            Err(err) => {
                tracing::debug!(error = %err, "Edit session rejected");
                Err(err)
            }
        }
    }

    /// Discard the open session, if any.
    pub fn cancel(&mut self) -> Option<EditSession> {
        self.active.take()
    }
}
