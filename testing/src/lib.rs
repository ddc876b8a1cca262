//! # Airline Testing
//!
//! Testing utilities for the airline console.
//!
//! This crate provides:
//! - [`MockGateway`]: scripted store replies with a statement and transaction log
//! - [`ScriptedConsole`]: queued input lines and captured output
//! - [`fixtures`]: schema and seed data for Postgres integration tests
//!
//! ## Example
//!
//! ```
//! use airline_core::validation::{require_existing, RetryLimit};
//! use airline_core::catalog::PLANE;
//! use airline_testing::{MockGateway, ScriptedConsole};
//!
//! # tokio_test::block_on(async {
//! let mut gateway = MockGateway::new()
//!     .expect_empty("FROM Plane")
//!     .expect_count("FROM Plane", 1);
//! let mut console = ScriptedConsole::new(["PL999", "PL001"]);
//!
//! let key = require_existing(&mut gateway, &mut console, &PLANE, "Plane ID: ", RetryLimit::Unbounded)
//!     .await
//!     .unwrap();
//! assert_eq!(key.unwrap().to_string(), "PL001");
//! assert!(console.printed("PLANE PL999 DOES NOT EXIST"));
//! # });
//! ```

pub mod console_mocks;
pub mod fixtures;
pub mod gateway_mocks;

pub use console_mocks::ScriptedConsole;
pub use gateway_mocks::{MockGateway, MockUnit, TransactionEvent};

/// Install a compact `tracing` subscriber for a test run.
///
/// Honors `RUST_LOG`; safe to call from several tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}
