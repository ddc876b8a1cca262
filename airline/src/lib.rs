//! # Airline Management
//!
//! Role-gated text console over an airline schedule database.
//!
//! Four kinds of users log in: management browses flights, seats, passengers and
//! repairs; customers search flights and manage reservations; pilots file
//! maintenance requests; technicians log repairs. Each menu entry is one
//! [`workflows`] operation that prompts for input, runs parameterized statements
//! through a [`Gateway`](airline_core::Gateway) and prints the result.
//!
//! ## Example
//!
//! ```
//! use airline_core::RetryLimit;
//! use airline_management::{menu, workflows::Session};
//! use airline_testing::{MockGateway, ScriptedConsole};
//!
//! let mut session = Session::new(
//!     MockGateway::new(),
//!     ScriptedConsole::new(["9"]),
//!     RetryLimit::Unbounded,
//! );
//! tokio_test::block_on(menu::run(&mut session)).unwrap();
//! assert!(session.console.printed("MAIN MENU"));
//! ```

pub mod config;
pub mod menu;
pub mod render;
pub mod workflows;

pub use config::{Args, Config, ConfigError};
pub use workflows::Session;
