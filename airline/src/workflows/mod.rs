//! Workflow operations, one per menu action.
//!
//! Every operation follows the same shape: collect input (validated against the
//! store where the value is a foreign key), run one or more statements through the
//! [`Gateway`], apply a computation from `airline-core`, print the result.
//!
//! Operations that write more than one row run inside a single
//! [`UnitOfWork`](airline_core::UnitOfWork); returning early drops the unit and
//! rolls back.
//!
//! A query that matches nothing is never an error: the operation prints a
//! "does not exist" / "not available" line and returns to the menu.

pub mod customer;
pub mod maintenance;
pub mod reports;
pub mod reservations;
pub mod users;

use crate::render::print_table;
use airline_core::environment::Console;
use airline_core::error::{ConsoleError, WorkflowError};
use airline_core::gateway::{Gateway, Statement};
use airline_core::validation::{prompt_date, prompt_line};
use airline_core::RetryLimit;
use chrono::NaiveDate;

/// Result of a workflow operation.
pub type Outcome = Result<(), WorkflowError>;

/// Everything a workflow needs: the store, the terminal and the retry policy.
pub struct Session<G, C> {
    /// Data access gateway
    pub gateway: G,
    /// Terminal
    pub console: C,
    /// How many invalid answers a prompt accepts
    pub limit: RetryLimit,
}

impl<G: Gateway, C: Console> Session<G, C> {
    /// Bundle a gateway and a console.
    pub const fn new(gateway: G, console: C, limit: RetryLimit) -> Self {
        Self {
            gateway,
            console,
            limit,
        }
    }

    /// Print one line.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] if the terminal cannot be written.
    pub fn say(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.console.write_line(line)
    }

    /// Ask for a flight number and a date.
    pub(crate) fn prompt_flight_on_date(
        &mut self,
    ) -> Result<Option<(String, NaiveDate)>, ConsoleError> {
        let Some(flight) = prompt_line(&mut self.console, "Enter a flight number: ")? else {
            return Ok(None);
        };
        let Some(date) = prompt_date(&mut self.console, "Enter a flight date (M/D/YY): ", self.limit)? else {
            return Ok(None);
        };
        Ok(Some((flight, date)))
    }

    /// Ask for an inclusive date range.
    pub(crate) fn prompt_range(&mut self) -> Result<Option<(NaiveDate, NaiveDate)>, ConsoleError> {
        let Some(start) = prompt_date(&mut self.console, "Start date (M/D/YY): ", self.limit)? else {
            return Ok(None);
        };
        let Some(end) = prompt_date(&mut self.console, "End date (M/D/YY): ", self.limit)? else {
            return Ok(None);
        };
        Ok(Some((start, end)))
    }

    /// Run `statement` and print the rows under `heading`, or `empty` if there are none.
    pub(crate) async fn show_table(&mut self, statement: &Statement, heading: &str, empty: &str) -> Outcome {
        let table = self.gateway.fetch_table(statement).await?;
        if table.is_empty() {
            self.say(empty)?;
            return Ok(());
        }
        self.say(heading)?;
        print_table(&mut self.console, &table)?;
        Ok(())
    }
}
