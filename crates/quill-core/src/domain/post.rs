use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a titled piece of text owned by the persistence store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post from validated fields.
    pub fn new(draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            body: draft.body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and body, keeping the id and creation time.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.body = draft.body;
        self.updated_at = Utc::now();
    }
}

/// Title and body that passed validation.
///
/// Only [`PostInput::validate_into_draft`](super::PostInput::validate_into_draft)
/// hands these out, so a draft always satisfies the post invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub(crate) title: String,
    pub(crate) body: String,
}

impl PostDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
