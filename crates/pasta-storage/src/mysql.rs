use async_trait::async_trait;
use jiff::Timestamp;
use pasta_core::error::{Result, StorageError};
use pasta_core::{Paste, PasteId, PasteSummary, ReadRepository, Repository};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::{debug, trace};

/// DDL for the `pastes` table.
pub const SCHEMA: &str = include_str!("../ddl/mysql/pastes.sql");

/// MySQL implementation of the repository contract.
///
/// Pastes live in a single `pastes` table keyed by a case-sensitive
/// `paste_id` with a unique index, so inserts are conditional: a second
/// insert with the same id fails with [`StorageError::Conflict`] instead
/// of overwriting. `created_at` is stored in microseconds since the Unix
/// epoch; the auto-increment `seq` breaks ties in listings.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `pastes` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("pastes schema is in place");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn parse_created_at(micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", micros))
    })
}

fn parse_paste_id(raw: String) -> Result<PasteId> {
    PasteId::new(raw).map_err(|e| StorageError::InvalidData(e.to_string()))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn paste_from_row(row: &MySqlRow) -> Result<Paste> {
    let id: String = row.try_get("paste_id").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(Paste {
        id: parse_paste_id(id)?,
        timestamp: parse_created_at(created_at)?,
        content: row.try_get("content").map_err(map_sqlx_error)?,
        email: row.try_get("email").map_err(map_sqlx_error)?,
        title: row.try_get("title").map_err(map_sqlx_error)?,
        language: row.try_get("language").map_err(map_sqlx_error)?,
    })
}

fn summary_from_row(row: &MySqlRow) -> Result<PasteSummary> {
    let id: String = row.try_get("paste_id").map_err(map_sqlx_error)?;

    Ok(PasteSummary {
        id: parse_paste_id(id)?,
        title: row.try_get("title").map_err(map_sqlx_error)?,
        email: row.try_get("email").map_err(map_sqlx_error)?,
    })
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn get(&self, id: &PasteId) -> Result<Option<Paste>> {
        trace!(id = %id, "fetching paste from mysql");

        let row = sqlx::query(
            r#"
            SELECT paste_id, created_at, content, email, title, language
            FROM pastes
            WHERE paste_id = ?
            LIMIT 1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(paste_from_row).transpose()
    }

    async fn list_recent(&self) -> Result<Vec<PasteSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT paste_id, title, email
            FROM pastes
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        trace!(count = rows.len(), "listed pastes from mysql");
        rows.iter().map(summary_from_row).collect()
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, paste: &Paste) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO pastes (paste_id, created_at, content, email, title, language)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(paste.id.as_str())
        .bind(paste.timestamp.as_microsecond())
        .bind(&paste.content)
        .bind(&paste.email)
        .bind(paste.title.as_deref())
        .bind(paste.language.as_deref())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(paste.id.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn delete(&self, id: &PasteId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM pastes
            WHERE paste_id = ?
            "#,
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
