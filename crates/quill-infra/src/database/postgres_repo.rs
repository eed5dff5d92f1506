//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DbErr, Set, Unchanged};
use uuid::Uuid;

use quill_core::domain::{Post, PostDraft};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn replace(&self, id: Uuid, draft: PostDraft) -> Result<Post, RepoError> {
        tracing::debug!(post_id = %id, "Replacing post");

        let active = post::ActiveModel {
            id: Unchanged(id),
            title: Set(draft.title().to_owned()),
            body: Set(draft.body().to_owned()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = active.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => RepoError::Query(other.to_string()),
        })?;

        Ok(model.into())
    }
}
