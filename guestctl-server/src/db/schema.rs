//! Schema initialization for the guest table
//!
//! Idempotent: safe to run on every startup. Enumerated columns carry
//! CHECK constraints, and `telefono` is UNIQUE so concurrent registrations
//! of one phone cannot both land. The unique index is created separately
//! so tables made by older bootstraps (no column constraint) gain it too.

use sqlx::SqlitePool;

const CREATE_GUESTS: &str = r#"
CREATE TABLE IF NOT EXISTS guests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre_completo TEXT NOT NULL,
    telefono TEXT NOT NULL UNIQUE,
    tipo TEXT NOT NULL DEFAULT 'JOVEN'
        CHECK (tipo IN ('JOVEN', 'ADULTO')),
    genero TEXT NOT NULL DEFAULT 'NO_ESPECIFICADO'
        CHECK (genero IN ('MASC', 'FEM', 'NO_ESPECIFICADO')),
    estado TEXT NOT NULL DEFAULT 'INVITADO'
        CHECK (estado IN ('INVITADO', 'PRECONFIRMADO', 'CONFIRMADO', 'NO_ASISTE')),
    token TEXT NOT NULL UNIQUE,
    token_expires_at DATETIME NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

const CREATE_PHONE_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_guests_telefono ON guests (telefono)";

const CREATE_FILTER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_guests_tipo_genero ON guests (tipo, genero)";

/// Ensure the guest table and its indexes exist.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring guest schema...");

    sqlx::query(CREATE_GUESTS).execute(pool).await?;
    sqlx::query(CREATE_PHONE_INDEX).execute(pool).await?;
    sqlx::query(CREATE_FILTER_INDEX).execute(pool).await?;

    tracing::debug!("Guest schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    async fn fresh_pool() -> (tempfile::TempDir, SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&dir.path().join("guests.db")).await.unwrap();
        ensure_schema(&pool).await.unwrap();
        (dir, pool)
    }

    async fn insert_raw(
        pool: &SqlitePool,
        telefono: &str,
        tipo: &str,
        genero: &str,
        token: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO guests (nombre_completo, telefono, tipo, genero, token, token_expires_at) \
             VALUES ('x', ?, ?, ?, ?, '2025-01-02 00:00:00')",
        )
        .bind(telefono)
        .bind(tipo)
        .bind(genero)
        .bind(token)
        .execute(pool)
        .await
        .map(|_| ())
    }

    #[tokio::test]
    async fn schema_is_idempotent() {
        let (_dir, pool) = fresh_pool().await;
        ensure_schema(&pool).await.expect("second run should succeed");
        insert_raw(&pool, "1", "JOVEN", "MASC", "t1").await.unwrap();
        ensure_schema(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guests")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn check_constraints_reject_unknown_values() {
        let (_dir, pool) = fresh_pool().await;
        assert!(insert_raw(&pool, "1", "NINO", "MASC", "t1").await.is_err());
        assert!(insert_raw(&pool, "2", "ADULTO", "OTRO", "t2").await.is_err());
        insert_raw(&pool, "3", "ADULTO", "NO_ESPECIFICADO", "t3")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn defaults_status_to_invited() {
        let (_dir, pool) = fresh_pool().await;
        insert_raw(&pool, "1", "JOVEN", "FEM", "t1").await.unwrap();
        let estado: String = sqlx::query_scalar("SELECT estado FROM guests")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(estado, "INVITADO");
    }

    #[tokio::test]
    async fn upgrades_table_without_phone_constraint() {
        use crate::models::{AccessToken, Category, Gender, NewGuest};
        use crate::db::{DbError, GuestRepo};

        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&dir.path().join("invitados.db")).await.unwrap();

        // Legacy layout: telefono without a UNIQUE column constraint
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS guests (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nombre_completo TEXT NOT NULL,
                telefono TEXT NOT NULL,
                tipo TEXT NOT NULL DEFAULT 'JOVEN' CHECK (tipo IN ('JOVEN', 'ADULTO')),
                genero TEXT NOT NULL DEFAULT 'NO_ESPECIFICADO'
                    CHECK (genero IN ('MASC', 'FEM', 'NO_ESPECIFICADO')),
                estado TEXT NOT NULL DEFAULT 'INVITADO'
                    CHECK (estado IN ('INVITADO', 'PRECONFIRMADO', 'CONFIRMADO', 'NO_ASISTE')),
                token TEXT NOT NULL UNIQUE,
                token_expires_at DATETIME NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        ensure_schema(&pool).await.unwrap();

        let repo = GuestRepo::new(&pool);
        let guest = NewGuest {
            full_name: "ana perez".into(),
            phone: "5551234".into(),
            category: Category::Youth,
            gender: Gender::Female,
        };
        let expires = chrono::NaiveDateTime::parse_from_str(
            "2025-12-21 18:00:00",
            crate::config::DATETIME_FORMAT,
        )
        .unwrap();

        repo.insert(&guest, &AccessToken::generate(), expires)
            .await
            .expect("insert into upgraded table");
        let err = repo
            .insert(&guest, &AccessToken::generate(), expires)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn phone_and_token_are_unique() {
        let (_dir, pool) = fresh_pool().await;
        insert_raw(&pool, "555", "JOVEN", "FEM", "t1").await.unwrap();

        let err = insert_raw(&pool, "555", "JOVEN", "FEM", "t2")
            .await
            .unwrap_err();
        assert!(err
            .as_database_error()
            .is_some_and(|e| e.is_unique_violation()));

        assert!(insert_raw(&pool, "556", "JOVEN", "FEM", "t1").await.is_err());
    }
}
