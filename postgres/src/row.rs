//! Text rendering of result columns.

use airline_core::error::{Result, StoreError};
use airline_core::gateway::{Row, NULL_TEXT};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::postgres::{PgColumn, PgRow};
use sqlx::{Column, Decode, Postgres, Row as _, Type, TypeInfo};

/// Column names of a result row, in select order.
pub(crate) fn column_names(row: &PgRow) -> Vec<String> {
    row.columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect()
}

/// Render every column of `row` as text.
///
/// # Errors
///
/// Returns [`StoreError::UnsupportedColumn`] for column types with no rendering
/// (`NUMERIC`, arrays, JSON, ...) and [`StoreError::Decode`] if a value does not
/// decode as its declared type.
pub(crate) fn render_row(row: &PgRow) -> Result<Row> {
    row.columns()
        .iter()
        .map(|column| render_cell(row, column))
        .collect()
}

fn render_cell(row: &PgRow, column: &PgColumn) -> Result<String> {
    match column.type_info().name() {
        "BOOL" => cell(row, column, |value: bool| {
            if value { "t" } else { "f" }.to_string()
        }),
        "INT2" => cell(row, column, |value: i16| value.to_string()),
        "INT4" => cell(row, column, |value: i32| value.to_string()),
        "INT8" => cell(row, column, |value: i64| value.to_string()),
        "FLOAT4" => cell(row, column, |value: f32| value.to_string()),
        "FLOAT8" => cell(row, column, |value: f64| value.to_string()),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => cell(row, column, |value: String| value),
        "DATE" => cell(row, column, |value: NaiveDate| {
            value.format("%Y-%m-%d").to_string()
        }),
        "TIME" => cell(row, column, |value: NaiveTime| {
            value.format("%H:%M:%S").to_string()
        }),
        "TIMESTAMP" => cell(row, column, |value: NaiveDateTime| {
            value.format("%Y-%m-%d %H:%M:%S").to_string()
        }),
        "TIMESTAMPTZ" => cell(row, column, |value: DateTime<Utc>| {
            value.format("%Y-%m-%d %H:%M:%S%:z").to_string()
        }),
        other => Err(StoreError::UnsupportedColumn {
            column: column.name().to_string(),
            type_name: other.to_string(),
        }),
    }
}

fn cell<'r, T>(
    row: &'r PgRow,
    column: &PgColumn,
    render: impl FnOnce(T) -> String,
) -> Result<String>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    let value: Option<T> = row
        .try_get(column.ordinal())
        .map_err(|error| StoreError::Decode {
            column: column.name().to_string(),
            reason: error.to_string(),
        })?;
    Ok(value.map_or_else(|| NULL_TEXT.to_string(), render))
}
