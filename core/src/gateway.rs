//! Data access gateway: the only way workflows touch the relational store.
//!
//! # Design
//!
//! Every read or write is a [`Statement`]: SQL text with `$n` placeholders plus the
//! positional [`Param`]s bound to them. Values are never spliced into the SQL text,
//! so quoting and injection are handled by the driver while the logical predicates
//! stay exactly what they would be as hand-written queries.
//!
//! Results come back as text, one `Vec<String>` per row, in column order. The
//! workflows parse the few numeric or boolean cells they compute with and print
//! the rest as-is.
//!
//! Multi-statement workflows run inside a [`UnitOfWork`] obtained from
//! [`Transactional::begin`]. A unit that is dropped without [`UnitOfWork::commit`]
//! rolls back.
//!
//! # Implementations
//!
//! - `PostgresStore` (in `airline-postgres`): sqlx over a single Postgres connection
//! - `MockGateway` (in `airline-testing`): scripted responses for unit tests

use crate::error::{Result, StoreError};
use crate::schedule::display_date;
use chrono::NaiveDate;
use std::fmt;

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// Text / varchar / char columns
    Text(String),
    /// Integer columns
    Int(i64),
    /// Date columns
    Date(NaiveDate),
    /// Boolean columns
    Bool(bool),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Date(value) => f.write_str(&display_date(*value)),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<NaiveDate> for Param {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A parameterized SQL statement.
///
/// # Example
///
/// ```
/// use airline_core::gateway::{Param, Statement};
///
/// let statement = Statement::new("SELECT * FROM Schedule WHERE FlightNumber = $1")
///     .bind("F100");
/// assert_eq!(statement.params, vec![Param::Text("F100".to_string())]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// SQL text with `$1`, `$2`, ... placeholders
    pub sql: String,
    /// Values for the placeholders, in order
    pub params: Vec<Param>,
}

impl Statement {
    /// Create a statement with no parameters.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind the next positional parameter.
    #[must_use]
    pub fn bind(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql.trim())?;
        if !self.params.is_empty() {
            let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
            write!(f, " [{}]", params.join(", "))?;
        }
        Ok(())
    }
}

/// One result row, each column rendered as text.
pub type Row = Vec<String>;

/// A full result set: column names plus rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    /// Column names, in select order
    pub columns: Vec<String>,
    /// Result rows
    pub rows: Vec<Row>,
}

impl RowSet {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` if the query matched nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First cell of the first row, if any.
    #[must_use]
    pub fn scalar(&self) -> Option<&str> {
        self.rows.first().and_then(|row| row.first()).map(String::as_str)
    }
}

/// Rendering of SQL `NULL` in a [`Row`].
pub const NULL_TEXT: &str = "null";

/// Read/write access to the relational store.
///
/// Methods take `&mut self`: a gateway owns one connection (or one open
/// transaction) and statements on it run one at a time.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    /// Run a read query and return the column names and every row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QueryExecution`] if the driver rejects the query, or
    /// [`StoreError::UnsupportedColumn`] if a column cannot be rendered as text.
    async fn fetch_table(&mut self, statement: &Statement) -> Result<RowSet>;

    /// Run a mutating statement and return the number of rows it touched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QueryExecution`] on syntax errors, constraint
    /// violations or connectivity loss.
    async fn apply(&mut self, statement: &Statement) -> Result<u64>;

    /// Run a read query and return its rows.
    ///
    /// # Errors
    ///
    /// See [`Gateway::fetch_table`].
    async fn fetch_rows(&mut self, statement: &Statement) -> Result<Vec<Row>> {
        Ok(self.fetch_table(statement).await?.rows)
    }

    /// Run a read query and return how many rows matched.
    ///
    /// Used both for real counts and as an existence check.
    ///
    /// # Errors
    ///
    /// See [`Gateway::fetch_table`].
    async fn count(&mut self, statement: &Statement) -> Result<usize> {
        Ok(self.fetch_table(statement).await?.len())
    }
}

/// A gateway that can open an atomic unit of work.
#[allow(async_fn_in_trait)]
pub trait Transactional: Gateway {
    /// The open transaction type.
    type Unit<'a>: UnitOfWork
    where
        Self: 'a;

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QueryExecution`] if the store refuses to start one.
    async fn begin(&mut self) -> Result<Self::Unit<'_>>;
}

/// An open transaction.
///
/// Statements run through it are visible to the rest of the store only after
/// [`UnitOfWork::commit`]. Dropping it without committing rolls everything back.
#[allow(async_fn_in_trait)]
pub trait UnitOfWork: Gateway {
    /// Make every statement of this unit durable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QueryExecution`] if the commit fails; the unit is
    /// rolled back in that case.
    async fn commit(self) -> Result<()>;
}

/// Parse an integer cell.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] if the cell is not a whole number.
pub fn int_cell(row: &[String], column: usize) -> Result<i64> {
    let cell = row
        .get(column)
        .ok_or_else(|| StoreError::decode(column, "missing column"))?;
    cell.trim()
        .parse()
        .map_err(|_| StoreError::decode(column, format!("{cell:?} is not an integer")))
}

/// Parse a boolean cell rendered as `t`/`f` (or `true`/`false`).
///
/// # Errors
///
/// Returns [`StoreError::Decode`] for anything else, including `null`.
pub fn bool_cell(row: &[String], column: usize) -> Result<bool> {
    let cell = row
        .get(column)
        .ok_or_else(|| StoreError::decode(column, "missing column"))?;
    match cell.trim() {
        "t" | "true" => Ok(true),
        "f" | "false" => Ok(false),
        other => Err(StoreError::decode(column, format!("{other:?} is not a boolean"))),
    }
}

/// Borrow a text cell, treating `null` as absent.
#[must_use]
pub fn text_cell(row: &[String], column: usize) -> Option<&str> {
    row.get(column)
        .map(|cell| cell.trim_end())
        .filter(|cell| *cell != NULL_TEXT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn statement_binds_in_order() {
        let date = NaiveDate::from_ymd_opt(2023, 3, 10).unwrap();
        let statement = Statement::new("SELECT 1 WHERE a = $1 AND b = $2")
            .bind("F100")
            .bind(date);
        assert_eq!(
            statement.params,
            vec![Param::Text("F100".into()), Param::Date(date)]
        );
        assert_eq!(
            statement.to_string(),
            "SELECT 1 WHERE a = $1 AND b = $2 [F100, 3/10/23]"
        );
    }

    #[test]
    fn cells_parse() {
        let r = row(&["150", "t", "null", "F100    "]);
        assert_eq!(int_cell(&r, 0).unwrap(), 150);
        assert!(bool_cell(&r, 1).unwrap());
        assert!(bool_cell(&r, 2).is_err());
        assert_eq!(text_cell(&r, 2), None);
        assert_eq!(text_cell(&r, 3), Some("F100"));
        assert!(int_cell(&r, 9).is_err());
    }

    #[test]
    fn scalar_of_empty_set_is_none() {
        assert_eq!(RowSet::default().scalar(), None);
    }
}
