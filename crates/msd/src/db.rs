//! SQLite pool management and the generic load/retrieve operations.
//!
//! The core only emits SQL text plus bound parameters; table and column
//! existence is the engine's authority, so unknown tables and arity
//! mismatches surface as the engine's own error, never wrapped or
//! swallowed.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row as SqlxRow, TypeInfo, ValueRef};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::registry::table_schemas;
use crate::schema::{Row, SchemaError, SqlValue};

/// Database operation errors with contextual information.
#[derive(Error, Debug)]
pub enum DbError {
    /// SQL query or connection error, passed through from the engine.
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Defective schema definition or statement arguments.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Database configuration is invalid or missing.
    #[error("Database configuration error: {0}. Check DATABASE_URL and connection settings.")]
    Config(String),
}

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://msd.db".to_string(),
            max_connections: 1,
            connect_timeout_secs: 30,
        }
    }
}

impl DbConfig {
    pub fn from_env() -> DbResult<Self> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| DbError::Config("DATABASE_URL not set".to_string()))?;

        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(1);

        let connect_timeout_secs = std::env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        Ok(Self { url, max_connections, connect_timeout_secs })
    }
}

pub async fn create_pool(config: &DbConfig) -> DbResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_with(options)
        .await?;

    tracing::info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

pub async fn health_check(pool: &SqlitePool) -> DbResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::from)
}

/// Creates every registered table in registry order. Safe to repeat on
/// every process start.
pub async fn init_database(pool: &SqlitePool) -> DbResult<()> {
    for table in table_schemas() {
        sqlx::query(&table.create_table()).execute(pool).await?;
        tracing::debug!(table = table.name(), "ensured table exists");
    }
    Ok(())
}

/// Inserts one row into the named table.
///
/// Placeholders follow the row's arity, so a row/column-count mismatch — and
/// an unrecognized table name — fail with the engine's operational error.
pub async fn insert_into_table(
    pool: &SqlitePool,
    table_name: &str,
    row: &[SqlValue],
) -> DbResult<()> {
    let placeholders = vec!["?"; row.len()].join(", ");
    let statement = format!("INSERT INTO {} VALUES({})", table_name, placeholders);
    bind_values(sqlx::query(&statement), row).execute(pool).await?;
    Ok(())
}

/// Fetches every row of the named table with the given entry id, decoded
/// back into [`SqlValue`]s. Always a list: empty when nothing matches,
/// one-element for entry-keyed tables.
pub async fn retrieve_from_table(
    pool: &SqlitePool,
    table_name: &str,
    entry_id: &str,
) -> DbResult<Vec<Row>> {
    let statement = format!("SELECT * FROM {} WHERE entry_id = ?", table_name);
    let rows = sqlx::query(&statement).bind(entry_id).fetch_all(pool).await?;
    rows.iter().map(decode_row).collect()
}

/// Binds row values positionally onto a prepared query.
pub(crate) fn bind_values<'q>(
    mut query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    row: &'q [SqlValue],
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    for value in row {
        query = match value {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Int(value) => query.bind(*value),
            SqlValue::Real(value) => query.bind(*value),
            SqlValue::Text(value) => query.bind(value.as_str()),
        };
    }
    query
}

/// Decodes a fetched row by SQLite storage class.
fn decode_row(row: &SqliteRow) -> DbResult<Row> {
    let mut values = Vec::with_capacity(row.len());
    for index in 0..row.len() {
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => SqlValue::Int(row.try_get(index)?),
                "REAL" => SqlValue::Real(row.try_get(index)?),
                _ => SqlValue::Text(row.try_get(index)?),
            }
        };
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DbConfig::default();
        assert_eq!(config.url, "sqlite://msd.db");
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.connect_timeout_secs, 30);
    }

    #[test]
    fn test_config_from_env() {
        std::env::set_var("DATABASE_URL", "sqlite://test.db");
        std::env::set_var("DB_MAX_CONNECTIONS", "4");

        let config = DbConfig::from_env().unwrap();
        assert_eq!(config.url, "sqlite://test.db");
        assert_eq!(config.max_connections, 4);

        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("DB_MAX_CONNECTIONS");
    }

    #[tokio::test]
    async fn test_create_pool_in_memory() {
        let config = DbConfig { url: "sqlite::memory:".to_string(), ..DbConfig::default() };
        let pool = create_pool(&config).await.unwrap();
        health_check(&pool).await.unwrap();
    }
}
