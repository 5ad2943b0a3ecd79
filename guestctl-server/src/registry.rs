//! Guest registry - registration and listing workflow
//!
//! Holds the pool and the event schedule; handlers call into this rather
//! than touching repositories directly.

use serde_json::{Map, Value};
use sqlx::SqlitePool;

use crate::config::EventSchedule;
use crate::db::{DbError, Guest, GuestRepo};
use crate::models::{AccessToken, GuestFilter, NewGuest, ValidationError};

/// Registry error type
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("guest with phone '{phone}' already exists")]
    Duplicate { phone: String },

    #[error("storage error: {0}")]
    Storage(#[source] DbError),
}

impl From<DbError> for RegistryError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Duplicate { phone } => Self::Duplicate { phone },
            other => Self::Storage(other),
        }
    }
}

/// Result of a successful registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub id: i64,
    pub token: AccessToken,
}

/// Registration and lookup of event guests
#[derive(Debug, Clone)]
pub struct GuestRegistry {
    pool: SqlitePool,
    schedule: EventSchedule,
}

impl GuestRegistry {
    pub fn new(pool: SqlitePool, schedule: EventSchedule) -> Self {
        Self { pool, schedule }
    }

    pub fn schedule(&self) -> &EventSchedule {
        &self.schedule
    }

    /// Validate a decoded request body, then register it.
    pub async fn register_payload(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<Registration, RegistryError> {
        let guest = NewGuest::from_payload(payload)?;
        self.register(guest).await
    }

    /// Register a validated guest and issue its access token.
    ///
    /// A phone already on the list fails with `Duplicate` before any token
    /// is drawn. If a concurrent registration wins between the check and
    /// the insert, the storage constraint turns the insert into `Duplicate`.
    pub async fn register(&self, guest: NewGuest) -> Result<Registration, RegistryError> {
        let repo = GuestRepo::new(&self.pool);

        if let Some(existing) = repo.find_id_by_phone(&guest.phone).await? {
            tracing::warn!(guest_id = existing, "Duplicate registration rejected");
            return Err(RegistryError::Duplicate { phone: guest.phone });
        }

        let token = AccessToken::generate();
        let id = repo
            .insert(&guest, &token, self.schedule.token_expires_at())
            .await
            .inspect_err(|e| {
                if matches!(e, DbError::Duplicate { .. }) {
                    tracing::warn!("Duplicate registration lost race on insert");
                }
            })?;

        tracing::info!(
            guest_id = id,
            category = guest.category.as_str(),
            gender = guest.gender.as_str(),
            "Guest registered"
        );

        Ok(Registration { id, token })
    }

    /// Guests matching `filter`, most recently registered first.
    pub async fn list(&self, filter: &GuestFilter) -> Result<Vec<Guest>, RegistryError> {
        let guests = GuestRepo::new(&self.pool).list(filter).await?;
        tracing::debug!(count = guests.len(), ?filter, "Listed guests");
        Ok(guests)
    }
}
