//! Seat accounting and date-ranged flight statistics.
//!
//! ```text
//! open   = total - sold            (0 once a flight is oversold)
//! status = reserved  if sold < total
//!          waitlist  otherwise      (decided before the new seat is counted)
//! ```
//!
//! `SeatsSold` counts every reservation row on the instance, waitlisted ones included,
//! so it can exceed `SeatsTotal`. Cancelling decrements it again.

use crate::error::Result;
use crate::gateway::{bool_cell, int_cell, Row};
use crate::types::ReservationStatus;
use serde::{Deserialize, Serialize};

/// Seat counters of one flight instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatAccount {
    /// `FlightInstance.SeatsTotal`
    pub total: i64,
    /// `FlightInstance.SeatsSold`
    pub sold: i64,
}

impl SeatAccount {
    /// Counters for an instance.
    #[must_use]
    pub const fn new(total: i64, sold: i64) -> Self {
        Self { total, sold }
    }

    /// Decode a `(SeatsTotal, SeatsSold)` row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`](crate::error::StoreError::Decode) if either
    /// cell is not an integer.
    pub fn from_row(row: &[String]) -> Result<Self> {
        Ok(Self::new(int_cell(row, 0)?, int_cell(row, 1)?))
    }

    /// Seats still available.
    #[must_use]
    pub const fn open(&self) -> i64 {
        let open = self.total - self.sold;
        if open < 0 { 0 } else { open }
    }

    /// `true` while at least one seat is unsold.
    #[must_use]
    pub const fn has_open_seat(&self) -> bool {
        self.sold < self.total
    }

    /// Status a reservation made now would get.
    #[must_use]
    pub const fn status_for_next(&self) -> ReservationStatus {
        if self.has_open_seat() {
            ReservationStatus::Reserved
        } else {
            ReservationStatus::Waitlist
        }
    }
}

/// Per-instance values needed for flight statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Seat counters
    pub seats: SeatAccount,
    /// `FlightInstance.DepartedOnTime`
    pub departed_on_time: bool,
    /// `FlightInstance.ArrivedOnTime`
    pub arrived_on_time: bool,
}

impl InstanceRecord {
    /// Decode a `(SeatsTotal, SeatsSold, DepartedOnTime, ArrivedOnTime)` row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`](crate::error::StoreError::Decode) on malformed cells.
    pub fn from_row(row: &[String]) -> Result<Self> {
        Ok(Self {
            seats: SeatAccount::new(int_cell(row, 0)?, int_cell(row, 1)?),
            departed_on_time: bool_cell(row, 2)?,
            arrived_on_time: bool_cell(row, 3)?,
        })
    }

    /// Departed and arrived on time.
    #[must_use]
    pub const fn on_time(&self) -> bool {
        self.departed_on_time && self.arrived_on_time
    }
}

/// Totals of a flight over a date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightStatistics {
    /// Number of flight instances in the range
    pub instances: i64,
    /// Instances that departed on time
    pub departed_on_time: i64,
    /// Instances that arrived on time
    pub arrived_on_time: i64,
    /// Sum of sold seats
    pub seats_sold: i64,
    /// Sum of `total - sold`; an oversold instance contributes a negative term,
    /// so `seats_sold + seats_unsold` always equals the summed capacity
    pub seats_unsold: i64,
}

impl FlightStatistics {
    /// Fold instance records into totals. An empty range yields all zeros.
    #[must_use]
    pub fn fold<'a>(records: impl IntoIterator<Item = &'a InstanceRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut totals, record| {
            totals.instances += 1;
            totals.departed_on_time += i64::from(record.departed_on_time);
            totals.arrived_on_time += i64::from(record.arrived_on_time);
            totals.seats_sold += record.seats.sold;
            totals.seats_unsold += record.seats.total - record.seats.sold;
            totals
        })
    }

    /// Decode rows and fold them.
    ///
    /// # Errors
    ///
    /// Returns the first decode failure.
    pub fn from_rows(rows: &[Row]) -> Result<Self> {
        let records = rows
            .iter()
            .map(|row| InstanceRecord::from_row(row))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::fold(&records))
    }
}

/// Share of instances that departed and arrived on time, in percent.
///
/// `None` when there are no instances to judge.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Instance counts are far below 2^52
pub fn on_time_percentage(records: &[InstanceRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let on_time = records.iter().filter(|record| record.on_time()).count();
    Some(on_time as f64 * 100.0 / records.len() as f64)
}
