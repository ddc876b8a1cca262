//! `PostgreSQL` data access gateway for the airline console.
//!
//! This crate implements the [`Gateway`](airline_core::Gateway) and
//! [`Transactional`](airline_core::Transactional) traits from `airline-core` on top
//! of sqlx. It provides:
//!
//! - Positional parameter binding for every statement
//! - Result columns rendered as text (`t`/`f` booleans, ISO dates, `null`)
//! - One connection held for the lifetime of the process
//! - Transactions that roll back unless committed
//!
//! # Example
//!
//! ```no_run
//! use airline_core::gateway::{Gateway, Statement};
//! use airline_postgres::PostgresStore;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store =
//!     PostgresStore::connect("postgres://postgres@localhost:5432/airline", Duration::from_secs(30))
//!         .await?;
//! let flights = store
//!     .fetch_rows(&Statement::new("SELECT FlightNumber FROM Flight"))
//!     .await?;
//! println!("{} flights", flights.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod row;
mod store;

pub use store::{PostgresStore, PostgresUnit};
