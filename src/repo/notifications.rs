//! # Notification Repository
//!
//! Append-only sink for user-directed notifications. The booking core only
//! ever writes here; reading and marking notifications belongs to an
//! external collaborator.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::models::Notification;
use crate::repo::RepoError;

/// Write access to the notification sink.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Appends a notification addressed to `recipient_id` and returns the
    /// stored record.
    async fn append(&self, recipient_id: i64, content: &str) -> Result<Notification, RepoError>;
}

/// Postgres-backed notification sink.
pub struct PgNotificationRepository {
    db_pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, content))]
    async fn append(&self, recipient_id: i64, content: &str) -> Result<Notification, RepoError> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (recipient_id, content)
            VALUES ($1, $2)
            RETURNING id, recipient_id, content, read, created_at
            "#,
        )
        .bind(recipient_id)
        .bind(content)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(notification)
    }
}
