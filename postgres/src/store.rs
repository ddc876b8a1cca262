//! sqlx-backed gateway.

use crate::row::{column_names, render_row};
use airline_core::error::{Result, StoreError};
use airline_core::gateway::{Gateway, Param, RowSet, Statement, Transactional, UnitOfWork};
use sqlx::postgres::{PgArguments, PgConnectOptions, PgPoolOptions};
use sqlx::query::Query;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use std::time::Duration;

/// Gateway over a single `PostgreSQL` connection.
///
/// The pool is capped at one connection that is opened eagerly and never
/// recycled, so every statement of a session runs on the same backend.
///
/// # Example
///
/// ```no_run
/// use airline_postgres::PostgresStore;
///
/// # async fn example(pool: sqlx::PgPool) {
/// let store = PostgresStore::from_pool(pool);
/// store.close().await;
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Open the connection described by a `postgres://` URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL does not parse, or see
    /// [`PostgresStore::connect_with`].
    pub async fn connect(database_url: &str, timeout: Duration) -> Result<Self> {
        let options = database_url
            .parse::<PgConnectOptions>()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Self::connect_with(options, timeout).await
    }

    /// Open the connection from structured options.
    ///
    /// Credentials are passed as-is, so passwords need no URL escaping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the server cannot be reached within
    /// `timeout` or rejects the credentials.
    pub async fn connect_with(options: PgConnectOptions, timeout: Duration) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!("Connected to database");
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the connection, waiting for in-flight statements.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Disconnected from database");
    }
}

impl Gateway for PostgresStore {
    async fn fetch_table(&mut self, statement: &Statement) -> Result<RowSet> {
        let mut conn = self.pool.acquire().await.map_err(query_error)?;
        run_query(&mut conn, statement).await
    }

    async fn apply(&mut self, statement: &Statement) -> Result<u64> {
        let mut conn = self.pool.acquire().await.map_err(query_error)?;
        run_update(&mut conn, statement).await
    }
}

impl Transactional for PostgresStore {
    type Unit<'a>
        = PostgresUnit
    where
        Self: 'a;

    async fn begin(&mut self) -> Result<Self::Unit<'_>> {
        let transaction = self.pool.begin().await.map_err(query_error)?;
        tracing::debug!("Transaction started");
        Ok(PostgresUnit { transaction })
    }
}

/// Open transaction on a [`PostgresStore`].
///
/// Dropping it without [`UnitOfWork::commit`] rolls back.
pub struct PostgresUnit {
    transaction: Transaction<'static, Postgres>,
}

impl Gateway for PostgresUnit {
    async fn fetch_table(&mut self, statement: &Statement) -> Result<RowSet> {
        run_query(&mut self.transaction, statement).await
    }

    async fn apply(&mut self, statement: &Statement) -> Result<u64> {
        run_update(&mut self.transaction, statement).await
    }
}

impl UnitOfWork for PostgresUnit {
    async fn commit(self) -> Result<()> {
        self.transaction.commit().await.map_err(query_error)?;
        tracing::debug!("Transaction committed");
        Ok(())
    }
}

async fn run_query(conn: &mut PgConnection, statement: &Statement) -> Result<RowSet> {
    tracing::debug!(statement = %statement, "Running query");
    metrics::counter!("airline.store.statements", "kind" => "query").increment(1);

    let rows = bind_params(statement)
        .fetch_all(&mut *conn)
        .await
        .map_err(|error| {
            tracing::warn!(statement = %statement, error = %error, "Query failed");
            query_error(error)
        })?;

    let columns = rows.first().map(column_names).unwrap_or_default();
    let rows = rows.iter().map(render_row).collect::<Result<Vec<_>>>()?;
    Ok(RowSet { columns, rows })
}

async fn run_update(conn: &mut PgConnection, statement: &Statement) -> Result<u64> {
    tracing::debug!(statement = %statement, "Applying statement");
    metrics::counter!("airline.store.statements", "kind" => "update").increment(1);

    let result = bind_params(statement)
        .execute(&mut *conn)
        .await
        .map_err(|error| {
            tracing::warn!(statement = %statement, error = %error, "Statement failed");
            query_error(error)
        })?;
    Ok(result.rows_affected())
}

fn bind_params(statement: &Statement) -> Query<'_, Postgres, PgArguments> {
    statement
        .params
        .iter()
        .fold(sqlx::query(&statement.sql), |query, param| match param {
            Param::Text(value) => query.bind(value.as_str()),
            Param::Int(value) => query.bind(*value),
            Param::Date(value) => query.bind(*value),
            Param::Bool(value) => query.bind(*value),
        })
}

#[allow(clippy::needless_pass_by_value)] // Used as a map_err adapter
fn query_error(error: sqlx::Error) -> StoreError {
    StoreError::QueryExecution(error.to_string())
}
