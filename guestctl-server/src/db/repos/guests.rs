//! Guest repository
//!
//! - insert: single statement with ON CONFLICT on `telefono`; the UNIQUE
//!   constraint decides races, the caller's pre-check is only a fast path
//! - list: one query, filters AND-combined, newest first

use chrono::NaiveDateTime;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::config::DATETIME_FORMAT;
use crate::models::{AccessToken, Category, Gender, GuestFilter, GuestStatus, NewGuest};

/// Guest record from database
#[derive(Debug, Clone, FromRow)]
pub struct Guest {
    pub id: i64,
    #[sqlx(rename = "nombre_completo")]
    pub full_name: String,
    #[sqlx(rename = "telefono")]
    pub phone: String,
    #[sqlx(rename = "tipo")]
    pub category: Category,
    #[sqlx(rename = "genero")]
    pub gender: Gender,
    #[sqlx(rename = "estado")]
    pub status: GuestStatus,
    pub token: String,
    pub token_expires_at: NaiveDateTime,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("guest with phone '{phone}' already exists")]
    Duplicate { phone: String },
}

const GUEST_COLUMNS: &str = "id, nombre_completo, telefono, tipo, genero, estado, token, \
                             token_expires_at, created_at, updated_at";

/// Guest repository
pub struct GuestRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GuestRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Id of the guest registered under `phone`, if any.
    pub async fn find_id_by_phone(&self, phone: &str) -> Result<Option<i64>, DbError> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM guests WHERE telefono = ?")
            .bind(phone)
            .fetch_optional(self.pool)
            .await?;
        Ok(id)
    }

    /// Insert a new guest with status INVITADO, returning its id.
    ///
    /// Returns `DbError::Duplicate` when the phone is already taken,
    /// including when another writer inserted it after the caller's check.
    pub async fn insert(
        &self,
        guest: &NewGuest,
        token: &AccessToken,
        token_expires_at: NaiveDateTime,
    ) -> Result<i64, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO guests
                (nombre_completo, telefono, tipo, genero, estado, token, token_expires_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (telefono) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&guest.full_name)
        .bind(&guest.phone)
        .bind(guest.category)
        .bind(guest.gender)
        .bind(GuestStatus::Invited)
        .bind(token.as_str())
        .bind(token_expires_at.format(DATETIME_FORMAT).to_string())
        .fetch_optional(self.pool)
        .await?;

        id.ok_or_else(|| DbError::Duplicate {
            phone: guest.phone.clone(),
        })
    }

    /// List guests matching every supplied filter, highest id first.
    pub async fn list(&self, filter: &GuestFilter) -> Result<Vec<Guest>, DbError> {
        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new("SELECT ");
        query.push(GUEST_COLUMNS).push(" FROM guests WHERE 1=1");

        if let Some(category) = &filter.category {
            query.push(" AND tipo = ").push_bind(category.clone());
        }
        if let Some(gender) = &filter.gender {
            query.push(" AND genero = ").push_bind(gender.clone());
        }
        query.push(" ORDER BY id DESC");

        let guests = query
            .build_query_as::<Guest>()
            .fetch_all(self.pool)
            .await?;
        Ok(guests)
    }
}
