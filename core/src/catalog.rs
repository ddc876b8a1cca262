//! Reference tables whose keys user input is validated against.

use crate::error::InputError;
use crate::gateway::{Param, Statement};

/// How a key column is typed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// `CHAR`/`VARCHAR`/`TEXT` key
    Text,
    /// `INTEGER` key
    Integer,
}

/// A table and its key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityKey {
    /// Table name
    pub table: &'static str,
    /// Key column name
    pub column: &'static str,
    /// Column type
    pub kind: KeyKind,
    /// Upper-case label used in "does not exist" messages
    pub label: &'static str,
}

impl EntityKey {
    /// Turn raw input into a typed key value.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidInteger`] if an integer key is not a number.
    pub fn key_param(&self, input: &str) -> Result<Param, InputError> {
        let input = input.trim();
        match self.kind {
            KeyKind::Text => Ok(Param::Text(input.to_string())),
            KeyKind::Integer => input
                .parse()
                .map(Param::Int)
                .map_err(|_| InputError::InvalidInteger(input.to_string())),
        }
    }

    /// `SELECT` matching the rows with the given key.
    #[must_use]
    pub fn lookup(&self, key: Param) -> Statement {
        Statement::new(format!(
            "SELECT {column} FROM {table} WHERE {column} = $1",
            table = self.table,
            column = self.column,
        ))
        .bind(key)
    }
}

/// `Flight.FlightNumber`
pub const FLIGHT: EntityKey = EntityKey {
    table: "Flight",
    column: "FlightNumber",
    kind: KeyKind::Text,
    label: "FLIGHT",
};

/// `FlightInstance.FlightInstanceID`
pub const FLIGHT_INSTANCE: EntityKey = EntityKey {
    table: "FlightInstance",
    column: "FlightInstanceID",
    kind: KeyKind::Integer,
    label: "FLIGHT INSTANCE",
};

/// `Customer.CustomerID`
pub const CUSTOMER: EntityKey = EntityKey {
    table: "Customer",
    column: "CustomerID",
    kind: KeyKind::Integer,
    label: "CUSTOMER",
};

/// `Reservation.ReservationID`
pub const RESERVATION: EntityKey = EntityKey {
    table: "Reservation",
    column: "ReservationID",
    kind: KeyKind::Text,
    label: "RESERVATION",
};

/// `Plane.PlaneID`
pub const PLANE: EntityKey = EntityKey {
    table: "Plane",
    column: "PlaneID",
    kind: KeyKind::Text,
    label: "PLANE",
};

/// `Pilot.PilotID`
pub const PILOT: EntityKey = EntityKey {
    table: "Pilot",
    column: "PilotID",
    kind: KeyKind::Text,
    label: "PILOT",
};

/// `Technician.TechnicianID`
pub const TECHNICIAN: EntityKey = EntityKey {
    table: "Technician",
    column: "TechnicianID",
    kind: KeyKind::Text,
    label: "TECHNICIAN",
};
