//! Repository layer for database operations
//!
//! Every operation runs inside a [`Session`]: one transaction borrowed from the
//! pool for the duration of a request. Committing is explicit; a session that
//! is dropped without [`Session::commit`] rolls back and returns its
//! connection to the pool.

pub mod books;
pub mod listings;
pub mod seed;
pub mod users;

use sqlx::{migrate::Migrator, Pool, Postgres, Transaction};

use crate::error::AppResult;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema
    pub async fn migrate(&self) -> AppResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| crate::error::AppError::Internal(format!("Migration failed: {}", e)))
    }

    /// Open a request-scoped session
    pub async fn session(&self) -> AppResult<Session> {
        let tx = self.pool.begin().await?;
        Ok(Session { tx })
    }

    /// Round-trip to the database (readiness check)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// A unit of work over one pooled connection
pub struct Session {
    tx: Transaction<'static, Postgres>,
}

impl Session {
    /// Make every write in this session durable
    pub async fn commit(self) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

/// Appends ` WHERE a AND b ...` clause separators to a query builder.
pub(crate) fn push_clause(builder: &mut sqlx::QueryBuilder<'_, Postgres>, index: usize) {
    builder.push(if index == 0 { " WHERE " } else { " AND " });
}

/// Escape `%`, `_` and `\` for use inside a LIKE pattern.
pub(crate) fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
