//! Error taxonomy shared by the store, the console and the workflows.
//!
//! Nothing here models "row not found": an empty result is a normal branch that
//! every workflow reports to the user and returns from.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by a [`Gateway`](crate::gateway::Gateway) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached at startup.
    ///
    /// Fatal: the process exits.
    #[error("Unable to connect to database: {0}")]
    Connection(String),

    /// Any driver-level failure while running a statement: syntax error,
    /// constraint violation, lost connection.
    #[error("Query execution failed: {0}")]
    QueryExecution(String),

    /// A value could not be turned into the shape a computation needs.
    #[error("Cannot decode column {column}: {reason}")]
    Decode {
        /// Column index or name
        column: String,
        /// What went wrong
        reason: String,
    },

    /// The store returned a column type that has no text rendering.
    #[error("Column {column} has unsupported type {type_name}")]
    UnsupportedColumn {
        /// Column name
        column: String,
        /// Database type name
        type_name: String,
    },
}

impl StoreError {
    /// Build a [`StoreError::Decode`] for a positional column.
    #[must_use]
    pub fn decode(column: usize, reason: impl Into<String>) -> Self {
        Self::Decode {
            column: column.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failure reading from or writing to the terminal.
#[derive(Debug, Error)]
#[error("Console I/O failed: {0}")]
pub struct ConsoleError(#[from] pub std::io::Error);

/// Malformed user input. Always recovered by asking again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Not a whole number.
    #[error("Your input is invalid! Expected a number, got {0:?}")]
    InvalidInteger(String),

    /// Not a date in any accepted format.
    #[error("Invalid date {0:?}, expected M/D/YY or YYYY-MM-DD")]
    InvalidDate(String),

    /// Not one of the four user type codes.
    #[error("Invalid user type {0:?}, expected 1, 2, 3 or 4")]
    InvalidUserType(String),

    /// Not a known reservation status.
    #[error("Invalid reservation status {0:?}")]
    InvalidStatus(String),
}

/// Error returned by a workflow operation.
///
/// The menu loop prints it and carries on with the next choice.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The store rejected a statement.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The terminal went away.
    #[error(transparent)]
    Console(#[from] ConsoleError),
}

impl From<std::io::Error> for WorkflowError {
    fn from(error: std::io::Error) -> Self {
        Self::Console(ConsoleError(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_names_the_column_position() {
        let error = StoreError::decode(2, "not a number");
        assert_eq!(
            error.to_string(),
            "Cannot decode column 2: not a number"
        );
    }

    #[test]
    fn io_errors_become_console_failures() {
        let error: WorkflowError =
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "closed").into();
        assert!(matches!(error, WorkflowError::Console(_)));
    }
}
