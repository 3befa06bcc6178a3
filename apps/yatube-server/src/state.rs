//! Application state - shared across all handlers.

use std::sync::Arc;

use yatube_core::ports::{GroupRepository, PasswordService, PostRepository, TokenService, UserRepository};
use yatube_core::{Paginator, PostService};
use yatube_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService};

use crate::config::AppConfig;

type Repositories = (
    Arc<dyn UserRepository>,
    Arc<dyn GroupRepository>,
    Arc<dyn PostRepository>,
);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store when
    /// no database is configured or reachable.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        #[cfg(feature = "postgres")]
        let connected = match &config.database {
            Some(db_config) => match Self::postgres(db_config).await {
                Ok(repos) => Some(repos),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    None
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                None
            }
        };

        #[cfg(not(feature = "postgres"))]
        let connected: Option<Repositories> = {
            tracing::info!("Running without postgres feature - using in-memory store");
            None
        };

        if let Some((users, groups, posts)) = connected {
            tracing::info!("Application state initialized (postgres)");
            return Self::from_parts(users, groups, posts, config.posts_per_page, tokens, passwords);
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(Arc::new(InMemoryStore::new()), config.posts_per_page, tokens, passwords)
    }

    /// State backed by a single in-memory store.
    pub fn in_memory(
        store: Arc<InMemoryStore>,
        posts_per_page: u64,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self::from_parts(
            store.clone(),
            store.clone(),
            store,
            posts_per_page,
            tokens,
            passwords,
        )
    }

    fn from_parts(
        users: Arc<dyn UserRepository>,
        groups: Arc<dyn GroupRepository>,
        posts: Arc<dyn PostRepository>,
        posts_per_page: u64,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        let service = PostService::new(users.clone(), groups, posts, Paginator::new(posts_per_page));
        Self {
            posts: Arc::new(service),
            users,
            tokens,
            passwords,
        }
    }

    #[cfg(feature = "postgres")]
    async fn postgres(
        config: &yatube_infra::DatabaseConfig,
    ) -> Result<Repositories, yatube_infra::database::DbErr> {
        use yatube_infra::database::{connect, ensure_schema};
        use yatube_infra::{PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository};

        let conn = connect(config).await?;
        ensure_schema(&conn).await?;

        Ok((
            Arc::new(PostgresUserRepository::new(conn.clone())),
            Arc::new(PostgresGroupRepository::new(conn.clone())),
            Arc::new(PostgresPostRepository::new(conn)),
        ))
    }
}
