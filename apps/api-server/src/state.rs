//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::PostRepository;
use quill_infra::InMemoryPostRepository;
use quill_infra::database::DatabaseConfig;

#[cfg(feature = "postgres")]
use quill_infra::{DatabaseConnections, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state, falling back to memory when the database is unavailable.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            let Some(config) = db_config else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                return Self::in_memory();
            };

            match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    let repo = Arc::new(PostgresPostRepository::new(Arc::clone(&conn.main)));
                    tracing::info!("Application state initialized (postgres)");
                    Self {
                        db: Some(conn),
                        ..Self::with_posts(repo)
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
            Self::in_memory()
        }
    }

    /// State backed by a fresh in-memory post store.
    pub fn in_memory() -> Self {
        tracing::info!("Application state initialized (in-memory)");
        Self::with_posts(Arc::new(InMemoryPostRepository::new()))
    }

    /// State serving posts from `repo`, with no database attached.
    pub fn with_posts(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            posts: PostService::new(repo),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}
