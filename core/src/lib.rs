//! # Airline Core
//!
//! Domain types, derived-value computations and store abstractions for the
//! airline schedule console.
//!
//! ## Layers
//!
//! - **Gateway** ([`gateway`]): parameterized reads and writes against the relational
//!   store, with row sets rendered as text and transactional units of work
//! - **Validation** ([`validation`]): prompt loops that re-ask until a referenced row
//!   exists or the input parses
//! - **Computations** ([`schedule`], [`seats`], [`ids`]): weekday resolution, seat
//!   accounting, range statistics, next-id generation
//!
//! Workflow operations compose these three layers; they live in
//! `airline-management`. Nothing in this crate performs I/O except through the
//! [`Gateway`](gateway::Gateway) and [`Console`](environment::Console) traits.
//!
//! ## Example
//!
//! ```
//! use airline_core::seats::SeatAccount;
//! use airline_core::types::ReservationStatus;
//!
//! let seats = SeatAccount::new(150, 150);
//! assert_eq!(seats.open(), 0);
//! assert_eq!(seats.status_for_next(), ReservationStatus::Waitlist);
//! ```

pub mod catalog;
pub mod environment;
pub mod error;
pub mod gateway;
pub mod ids;
pub mod schedule;
pub mod seats;
pub mod types;
pub mod validation;

pub use environment::{Console, TerminalConsole};
pub use error::{ConsoleError, InputError, StoreError, WorkflowError};
pub use gateway::{Gateway, Param, Row, RowSet, Statement, Transactional, UnitOfWork};
pub use types::{ReservationId, ReservationStatus, UserType};
pub use validation::RetryLimit;
