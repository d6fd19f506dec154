//! # User Repository
//!
//! Lookup access to the user directory. The booking core only ever reads
//! users; account creation and mutation belong to an external collaborator.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::models::User;
use crate::repo::RepoError;

/// Read access to stored user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Looks up a user by id. Returns `None` when no such account exists.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError>;
}

/// Postgres-backed user directory.
pub struct PgUserRepository {
    db_pool: PgPool,
}

impl PgUserRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, is_provider, avatar_url
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(user)
    }
}
