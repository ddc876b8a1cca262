//! Domain value types.

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a logged-in user, stored as an integer code in `Users.UserType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    /// Airline management (code 1)
    Management,
    /// Customer (code 2)
    Customer,
    /// Pilot (code 3)
    Pilot,
    /// Maintenance technician (code 4)
    Technician,
}

impl UserType {
    /// All user types in code order.
    pub const ALL: [Self; 4] = [
        Self::Management,
        Self::Customer,
        Self::Pilot,
        Self::Technician,
    ];

    /// Stored integer code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Management => 1,
            Self::Customer => 2,
            Self::Pilot => 3,
            Self::Technician => 4,
        }
    }

    /// Look up a user type by its stored code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Management),
            2 => Some(Self::Customer),
            3 => Some(Self::Pilot),
            4 => Some(Self::Technician),
            _ => None,
        }
    }

    /// Menu heading for this role.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Management => "AIRLINE MANAGEMENT",
            Self::Customer => "CUSTOMER",
            Self::Pilot => "PILOT",
            Self::Technician => "TECHNICIAN",
        }
    }
}

impl FromStr for UserType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| InputError::InvalidUserType(s.to_string()))
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.code(), self.title())
    }
}

/// Reservation state stored in `Reservation.Status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Holds a seat
    Reserved,
    /// Queued for a seat on a full flight
    Waitlist,
    /// Travelled on the flight
    Flown,
}

impl ReservationStatus {
    /// Database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Waitlist => "waitlist",
            Self::Flown => "flown",
        }
    }

    /// Parse status from its database string.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidStatus`] for unknown strings.
    pub fn parse(s: &str) -> Result<Self, InputError> {
        match s.trim() {
            "reserved" => Ok(Self::Reserved),
            "waitlist" => Ok(Self::Waitlist),
            "flown" => Ok(Self::Flown),
            other => Err(InputError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation identifier: `R` followed by a zero-padded sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReservationId(u32);

impl ReservationId {
    /// Prefix of every reservation id.
    pub const PREFIX: char = 'R';

    /// Wrap a sequence number.
    #[must_use]
    pub const fn new(sequence: u32) -> Self {
        Self(sequence)
    }

    /// Numeric suffix.
    #[must_use]
    pub const fn sequence(self) -> u32 {
        self.0
    }

    /// Parse an id such as `R0047`. Surrounding blanks (from `CHAR(n)` columns) are ignored.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        s.trim()
            .strip_prefix(Self::PREFIX)
            .and_then(|digits| digits.parse().ok())
            .map(Self)
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", Self::PREFIX, self.0)
    }
}
