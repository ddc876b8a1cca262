//! Scripted gateway for testing workflows without a database.
//!
//! [`MockGateway`] answers statements from a FIFO script. Each scripted reply names
//! a SQL fragment; the statement it answers must contain that fragment, so a test
//! fails loudly when a workflow issues its queries in an unexpected order.
//!
//! Every executed statement is recorded, as is every begin/commit/rollback.

#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use airline_core::error::{Result, StoreError};
use airline_core::gateway::{Gateway, RowSet, Statement, Transactional, UnitOfWork};
use std::collections::VecDeque;

/// Transaction boundary observed by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionEvent {
    /// `begin()` was called
    Begin,
    /// The unit was committed
    Commit,
    /// The unit was dropped without committing
    Rollback,
}

#[derive(Debug, Clone)]
enum Reply {
    Table(RowSet),
    Applied(u64),
    Fail(StoreError),
}

#[derive(Debug, Clone)]
struct Expectation {
    fragment: String,
    reply: Reply,
}

/// Gateway double with scripted replies.
///
/// # Example
///
/// ```
/// use airline_core::gateway::{Gateway, Statement};
/// use airline_testing::MockGateway;
///
/// # tokio_test::block_on(async {
/// let mut gateway = MockGateway::new()
///     .expect_rows("FROM Flight", vec![vec!["F100"]]);
///
/// let count = gateway
///     .count(&Statement::new("SELECT FlightNumber FROM Flight"))
///     .await
///     .unwrap();
/// assert_eq!(count, 1);
/// assert!(gateway.is_exhausted());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MockGateway {
    script: VecDeque<Expectation>,
    executed: Vec<Statement>,
    transactions: Vec<TransactionEvent>,
}

impl MockGateway {
    /// Create a gateway with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next read containing `fragment` with `rows` (unnamed columns).
    #[must_use]
    pub fn expect_rows(self, fragment: &str, rows: Vec<Vec<&str>>) -> Self {
        let width = rows.first().map_or(0, Vec::len);
        let columns = (1..=width).map(|i| format!("column{i}")).collect();
        self.expect_table(fragment, columns, rows)
    }

    /// Answer the next read containing `fragment` with named columns and rows.
    #[must_use]
    pub fn expect_table(mut self, fragment: &str, columns: Vec<String>, rows: Vec<Vec<&str>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(ToString::to_string).collect())
            .collect();
        self.push(fragment, Reply::Table(RowSet { columns, rows }));
        self
    }

    /// Answer the next read containing `fragment` with `n` placeholder rows.
    #[must_use]
    pub fn expect_count(self, fragment: &str, n: usize) -> Self {
        self.expect_rows(fragment, vec![vec!["x"]; n])
    }

    /// Answer the next read containing `fragment` with no rows.
    #[must_use]
    pub fn expect_empty(self, fragment: &str) -> Self {
        self.expect_rows(fragment, Vec::new())
    }

    /// Answer the next write containing `fragment` with `affected` rows.
    #[must_use]
    pub fn expect_apply(mut self, fragment: &str, affected: u64) -> Self {
        self.push(fragment, Reply::Applied(affected));
        self
    }

    /// Fail the next statement containing `fragment`.
    #[must_use]
    pub fn expect_failure(mut self, fragment: &str, error: StoreError) -> Self {
        self.push(fragment, Reply::Fail(error));
        self
    }

    /// Statements executed so far, in order.
    #[must_use]
    pub fn executed(&self) -> &[Statement] {
        &self.executed
    }

    /// Executed statements whose SQL contains `fragment`.
    #[must_use]
    pub fn executed_matching(&self, fragment: &str) -> Vec<&Statement> {
        self.executed
            .iter()
            .filter(|statement| statement.sql.contains(fragment))
            .collect()
    }

    /// Transaction boundaries observed so far.
    #[must_use]
    pub fn transactions(&self) -> &[TransactionEvent] {
        &self.transactions
    }

    /// `true` once every scripted reply has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }

    fn push(&mut self, fragment: &str, reply: Reply) {
        self.script.push_back(Expectation {
            fragment: fragment.to_string(),
            reply,
        });
    }

    fn next_reply(&mut self, statement: &Statement) -> Result<Reply> {
        self.executed.push(statement.clone());
        let expectation = self.script.pop_front().ok_or_else(|| {
            StoreError::QueryExecution(format!("unscripted statement: {statement}"))
        })?;
        if !statement.sql.contains(&expectation.fragment) {
            return Err(StoreError::QueryExecution(format!(
                "expected statement containing {:?}, got: {statement}",
                expectation.fragment
            )));
        }
        Ok(expectation.reply)
    }
}

impl Gateway for MockGateway {
    async fn fetch_table(&mut self, statement: &Statement) -> Result<RowSet> {
        match self.next_reply(statement)? {
            Reply::Table(table) => Ok(table),
            Reply::Fail(error) => Err(error),
            Reply::Applied(_) => Err(StoreError::QueryExecution(format!(
                "scripted a write but got a read: {statement}"
            ))),
        }
    }

    async fn apply(&mut self, statement: &Statement) -> Result<u64> {
        match self.next_reply(statement)? {
            Reply::Applied(affected) => Ok(affected),
            Reply::Fail(error) => Err(error),
            Reply::Table(_) => Err(StoreError::QueryExecution(format!(
                "scripted a read but got a write: {statement}"
            ))),
        }
    }
}

impl Transactional for MockGateway {
    type Unit<'a>
        = MockUnit<'a>
    where
        Self: 'a;

    async fn begin(&mut self) -> Result<Self::Unit<'_>> {
        self.transactions.push(TransactionEvent::Begin);
        Ok(MockUnit {
            gateway: self,
            committed: false,
        })
    }
}

/// Open transaction on a [`MockGateway`].
///
/// Statements go through the parent's script. Dropping without
/// [`UnitOfWork::commit`] records [`TransactionEvent::Rollback`].
#[derive(Debug)]
pub struct MockUnit<'a> {
    gateway: &'a mut MockGateway,
    committed: bool,
}

impl Gateway for MockUnit<'_> {
    async fn fetch_table(&mut self, statement: &Statement) -> Result<RowSet> {
        self.gateway.fetch_table(statement).await
    }

    async fn apply(&mut self, statement: &Statement) -> Result<u64> {
        self.gateway.apply(statement).await
    }
}

impl UnitOfWork for MockUnit<'_> {
    async fn commit(mut self) -> Result<()> {
        self.committed = true;
        self.gateway.transactions.push(TransactionEvent::Commit);
        Ok(())
    }
}

impl Drop for MockUnit<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.gateway.transactions.push(TransactionEvent::Rollback);
        }
    }
}
