//! # Appointment Repository
//!
//! Persistence for appointment records. Slot exclusivity is enforced twice:
//! the rule engine runs an advisory availability check for a friendly
//! rejection, and the partial unique index on the hour-truncated date is the
//! authority under concurrent writers. An insert that loses that race
//! reports [`RepoError::DuplicateSlot`].

use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::instrument;

use crate::models::{Appointment, AppointmentSummary, ProviderProfile};
use crate::repo::RepoError;

/// Storage access for appointment records.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Persists a new active appointment, storing `date` at the caller's
    /// precision.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::DuplicateSlot`] when an active appointment
    /// already holds the same (provider, hour) slot.
    async fn insert(
        &self,
        requester_id: i64,
        provider_id: i64,
        date: OffsetDateTime,
    ) -> Result<Appointment, RepoError>;

    /// Looks up an appointment by id, canceled or not.
    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, RepoError>;

    /// Finds the active appointment occupying the clock hour starting at
    /// `hour_start` for the given provider, if any.
    async fn find_active_in_slot(
        &self,
        provider_id: i64,
        hour_start: OffsetDateTime,
    ) -> Result<Option<Appointment>, RepoError>;

    /// Marks an appointment canceled at `at` and returns the updated record.
    /// Returns `None` when the appointment was already canceled, so the
    /// transition stays one-way even if two cancellations race.
    async fn mark_canceled(
        &self,
        id: i64,
        at: OffsetDateTime,
    ) -> Result<Option<Appointment>, RepoError>;

    /// Lists the requester's active appointments ordered by date ascending,
    /// each enriched with the provider's public profile.
    async fn list_active_for_requester(
        &self,
        requester_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AppointmentSummary>, RepoError>;
}

/// Postgres-backed appointment store.
pub struct PgAppointmentRepository {
    db_pool: PgPool,
}

impl PgAppointmentRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

const APPOINTMENT_COLUMNS: &str = "id, requester_id, provider_id, date, canceled_at, created_at";

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    date: OffsetDateTime,
    provider_id: i64,
    provider_name: String,
    provider_avatar_url: Option<String>,
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    #[instrument(skip(self))]
    async fn insert(
        &self,
        requester_id: i64,
        provider_id: i64,
        date: OffsetDateTime,
    ) -> Result<Appointment, RepoError> {
        let query = format!(
            r#"
            INSERT INTO appointments (requester_id, provider_id, date)
            VALUES ($1, $2, $3)
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Appointment>(&query)
            .bind(requester_id)
            .bind(provider_id)
            .bind(date)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::DuplicateSlot,
                _ => RepoError::Db(e),
            })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, RepoError> {
        let query = format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1");

        let appointment = sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(appointment)
    }

    #[instrument(skip(self))]
    async fn find_active_in_slot(
        &self,
        provider_id: i64,
        hour_start: OffsetDateTime,
    ) -> Result<Option<Appointment>, RepoError> {
        let query = format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE provider_id = $1
              AND canceled_at IS NULL
              AND date >= $2
              AND date < $2 + INTERVAL '1 hour'
            LIMIT 1
            "#
        );

        let appointment = sqlx::query_as::<_, Appointment>(&query)
            .bind(provider_id)
            .bind(hour_start)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(appointment)
    }

    #[instrument(skip(self))]
    async fn mark_canceled(
        &self,
        id: i64,
        at: OffsetDateTime,
    ) -> Result<Option<Appointment>, RepoError> {
        let query = format!(
            r#"
            UPDATE appointments
            SET canceled_at = $2
            WHERE id = $1 AND canceled_at IS NULL
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        );

        let appointment = sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(at)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(appointment)
    }

    #[instrument(skip(self))]
    async fn list_active_for_requester(
        &self,
        requester_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<AppointmentSummary>, RepoError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT a.id,
                   a.date,
                   u.id AS provider_id,
                   u.name AS provider_name,
                   u.avatar_url AS provider_avatar_url
            FROM appointments a
            JOIN users u ON u.id = a.provider_id
            WHERE a.requester_id = $1 AND a.canceled_at IS NULL
            ORDER BY a.date ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(requester_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| AppointmentSummary {
                id: row.id,
                date: row.date,
                provider: ProviderProfile {
                    id: row.provider_id,
                    name: row.provider_name,
                    avatar_url: row.provider_avatar_url,
                },
            })
            .collect())
    }
}
