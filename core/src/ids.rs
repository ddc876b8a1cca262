//! Next-identifier computation for tables keyed by a running number.
//!
//! The caller reads `MAX(id)` inside the same transaction that inserts the new row,
//! after locking the table against concurrent writers. `MAX` over an empty table is
//! `NULL`, which both functions treat as "no rows yet".

use crate::error::{Result, StoreError};
use crate::gateway::NULL_TEXT;
use crate::types::ReservationId;

/// Reservation id following the current maximum, `R0001` for an empty table.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] if the maximum is not an `R####` id.
///
/// # Example
///
/// ```
/// use airline_core::ids::next_reservation_id;
///
/// assert_eq!(next_reservation_id(None).unwrap().to_string(), "R0001");
/// assert_eq!(next_reservation_id(Some("R0047")).unwrap().to_string(), "R0048");
/// ```
pub fn next_reservation_id(max: Option<&str>) -> Result<ReservationId> {
    match max.filter(|value| !is_null(value)) {
        None => Ok(ReservationId::new(1)),
        Some(value) => ReservationId::parse(value)
            .map(|id| ReservationId::new(id.sequence() + 1))
            .ok_or_else(|| StoreError::decode(0, format!("{value:?} is not a reservation id"))),
    }
}

/// Integer id following the current maximum, `1` for an empty table.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] if the maximum is not an integer.
pub fn next_numeric_id(max: Option<&str>) -> Result<i64> {
    match max.filter(|value| !is_null(value)) {
        None => Ok(1),
        Some(value) => value
            .trim()
            .parse::<i64>()
            .map(|id| id + 1)
            .map_err(|_| StoreError::decode(0, format!("{value:?} is not an integer id"))),
    }
}

fn is_null(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == NULL_TEXT
}
