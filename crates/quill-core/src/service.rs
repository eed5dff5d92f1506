//! Post use cases: list, create, get, update and delete.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostInput};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, PostRepository};

const ENTITY: &str = "Post";

/// Stateless translation from post operations to repository calls.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// All posts in storage order. An empty store is an error, not an empty list.
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self.repo.find_all().await?;
        if posts.is_empty() {
            return Err(DomainError::EmptyCollection("posts"));
        }

        tracing::debug!(count = posts.len(), "Listed posts");
        Ok(posts)
    }

    pub async fn create(&self, input: PostInput) -> Result<Post, DomainError> {
        let draft = input.validate_into_draft()?;

        let post = self
            .repo
            .insert(Post::new(draft))
            .await
            .map_err(write_failure)?;

        tracing::info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            })
    }

    /// Existence is checked before the input is validated.
    pub async fn update(&self, id: Uuid, input: PostInput) -> Result<Post, DomainError> {
        let existing = self.get(id).await?;
        let draft = input.validate_into_draft()?;

        let post = self
            .repo
            .replace(existing.id, draft)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::NotFound {
                    entity_type: ENTITY,
                    id,
                },
                other => write_failure(other),
            })?;

        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let existing = self.get(id).await?;

        self.repo
            .delete(existing.id)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::NotFound {
                    entity_type: ENTITY,
                    id,
                },
                other => write_failure(other),
            })?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }
}

/// Writes surface the store's message to the caller verbatim.
fn write_failure(err: RepoError) -> DomainError {
    tracing::error!(error = %err, "Post write failed");
    DomainError::Internal(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostDraft;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Vec-backed store that can be told to fail every write, or to lose
    /// rows between a lookup and the write that follows it.
    #[derive(Default)]
    struct MockPostRepository {
        posts: Mutex<Vec<Post>>,
        fail_writes: bool,
        vanish_on_write: bool,
        writes: AtomicUsize,
    }

    impl MockPostRepository {
        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Default::default()
            }
        }

        fn vanishing() -> Self {
            Self {
                vanish_on_write: true,
                ..Default::default()
            }
        }

        fn write(&self) -> Result<(), RepoError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                return Err(RepoError::Query("disk full".to_string()));
            }
            if self.vanish_on_write {
                self.posts.lock().unwrap().clear();
            }
            Ok(())
        }
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for MockPostRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().clone())
        }

        async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
            self.write()?;
            self.posts.lock().unwrap().push(entity.clone());
            Ok(entity)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.write()?;
            let mut posts = self.posts.lock().unwrap();
            let before = posts.len();
            posts.retain(|p| p.id != id);
            if posts.len() == before {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for MockPostRepository {
        async fn replace(&self, id: Uuid, draft: PostDraft) -> Result<Post, RepoError> {
            self.write()?;
            let mut posts = self.posts.lock().unwrap();
            let post = posts
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(RepoError::NotFound)?;
            post.apply(draft);
            Ok(post.clone())
        }
    }

    fn service_with(repo: Arc<MockPostRepository>) -> PostService {
        PostService::new(repo)
    }

    fn seeded_post(title: &str, body: &str) -> Post {
        Post::new(PostInput::new(title, body).validate_into_draft().unwrap())
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_fields() {
        let service = service_with(Arc::new(MockPostRepository::default()));

        let created = service
            .create(PostInput::new("Hello", "World"))
            .await
            .unwrap();
        let fetched = service.get(created.id).await.unwrap();

        assert_eq!(fetched.title, "Hello");
        assert_eq!(fetched.body, "World");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_with_missing_field_never_persists() {
        let repo = Arc::new(MockPostRepository::default());
        let service = service_with(repo.clone());

        let err = service
            .create(PostInput {
                title: Some("Hello".to_string()),
                body: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(ref e) if e.get("body").is_some()));
        assert_eq!(repo.writes.load(Ordering::SeqCst), 0);
        assert!(matches!(
            service.list().await,
            Err(DomainError::EmptyCollection(_))
        ));
    }

    #[tokio::test]
    async fn test_create_write_failure_is_internal() {
        let service = service_with(Arc::new(MockPostRepository::failing()));

        let err = service
            .create(PostInput::new("Hello", "World"))
            .await
            .unwrap_err();

        match err {
            DomainError::Internal(message) => assert!(message.contains("disk full")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let service = service_with(Arc::new(MockPostRepository::default()));
        let err = service.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(err.to_string(), "Post not found");
    }

    #[tokio::test]
    async fn test_list_empty_then_one() {
        let service = service_with(Arc::new(MockPostRepository::default()));

        let err = service.list().await.unwrap_err();
        assert_eq!(err.to_string(), "No posts found");

        let created = service.create(PostInput::new("One", "Body")).await.unwrap();
        let posts = service.list().await.unwrap();
        assert_eq!(posts, vec![created]);
    }

    #[tokio::test]
    async fn test_update_replaces_title_and_body_keeping_id() {
        let service = service_with(Arc::new(MockPostRepository::default()));
        let created = service.create(PostInput::new("Old", "Text")).await.unwrap();

        let updated = service
            .update(created.id, PostInput::new("New", "Words"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "New");
        assert_eq!(updated.body, "Words");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(service.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_id_fails_before_validation() {
        let service = service_with(Arc::new(MockPostRepository::default()));

        let err = service
            .update(Uuid::new_v4(), PostInput::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_invalid_input_leaves_record_untouched() {
        let service = service_with(Arc::new(MockPostRepository::default()));
        let created = service.create(PostInput::new("Keep", "Me")).await.unwrap();

        let err = service
            .update(created.id, PostInput::new("", "changed"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_write_failure_carries_store_message() {
        let repo = Arc::new(MockPostRepository::failing());
        let post = seeded_post("Title", "Body");
        repo.posts.lock().unwrap().push(post.clone());
        let service = service_with(repo);

        let err = service
            .update(post.id, PostInput::new("New", "Body"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Internal(ref m) if m.contains("disk full")));
    }

    #[tokio::test]
    async fn test_row_gone_before_write_is_not_found() {
        let repo = Arc::new(MockPostRepository::vanishing());
        let post = seeded_post("Title", "Body");
        repo.posts.lock().unwrap().push(post.clone());
        let service = service_with(repo.clone());

        let err = service
            .update(post.id, PostInput::new("New", "Body"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id, .. } if id == post.id));

        repo.posts.lock().unwrap().push(post.clone());
        let err = service.delete(post.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id, .. } if id == post.id));
        assert_eq!(err.to_string(), "Post not found");
        assert_eq!(repo.writes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_second_delete_is_not_found() {
        let service = service_with(Arc::new(MockPostRepository::default()));
        let created = service.create(PostInput::new("Bye", "Now")).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get(created.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_write_failure_is_internal() {
        let repo = Arc::new(MockPostRepository::failing());
        let post = seeded_post("Title", "Body");
        repo.posts.lock().unwrap().push(post.clone());
        let service = service_with(repo);

        let err = service.delete(post.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
