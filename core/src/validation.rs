//! Prompt loops that only return once the user has typed something usable.
//!
//! Every loop can be abandoned by entering an empty line (or closing stdin); the
//! caller gets `None` and returns to its menu. [`RetryLimit`] additionally caps how
//! many wrong answers are accepted before giving up.

use crate::catalog::EntityKey;
use crate::environment::Console;
use crate::error::{ConsoleError, InputError, WorkflowError};
use crate::gateway::{Gateway, Param};
use crate::schedule::parse_date;
use chrono::NaiveDate;
use std::str::FromStr;

/// How many invalid answers a prompt loop tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryLimit {
    /// Ask until the answer is valid or the user aborts
    #[default]
    Unbounded,
    /// Give up after this many invalid answers
    Attempts(u32),
}

impl RetryLimit {
    /// `0` means unbounded.
    #[must_use]
    pub const fn from_attempts(attempts: u32) -> Self {
        if attempts == 0 {
            Self::Unbounded
        } else {
            Self::Attempts(attempts)
        }
    }

    /// `true` once `misses` invalid answers use up the allowance.
    #[must_use]
    pub const fn exhausted(self, misses: u32) -> bool {
        match self {
            Self::Unbounded => false,
            Self::Attempts(max) => misses >= max,
        }
    }
}

/// Ask once. Returns the trimmed answer, or `None` for an empty line or end of input.
///
/// # Errors
///
/// Returns [`ConsoleError`] if the terminal fails.
pub fn prompt_line<C: Console>(console: &mut C, prompt: &str) -> Result<Option<String>, ConsoleError> {
    Ok(console
        .read_line(prompt)?
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty()))
}

/// Ask until the answer parses as `T`.
///
/// # Errors
///
/// Returns [`ConsoleError`] if the terminal fails.
pub fn prompt_parsed<C, T>(
    console: &mut C,
    prompt: &str,
    limit: RetryLimit,
) -> Result<Option<T>, ConsoleError>
where
    C: Console,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    prompt_with(console, prompt, limit, |input| input.parse::<T>().map_err(|e| e.to_string()))
}

/// Ask until the answer is a date in one of the accepted formats.
///
/// # Errors
///
/// Returns [`ConsoleError`] if the terminal fails.
pub fn prompt_date<C: Console>(
    console: &mut C,
    prompt: &str,
    limit: RetryLimit,
) -> Result<Option<NaiveDate>, ConsoleError> {
    prompt_with(console, prompt, limit, |input| parse_date(input).map_err(|e| e.to_string()))
}

/// Ask until the answer is a whole number.
///
/// # Errors
///
/// Returns [`ConsoleError`] if the terminal fails.
pub fn prompt_integer<C: Console>(
    console: &mut C,
    prompt: &str,
    limit: RetryLimit,
) -> Result<Option<i64>, ConsoleError> {
    prompt_with(console, prompt, limit, |input| {
        input
            .parse()
            .map_err(|_| InputError::InvalidInteger(input.to_string()).to_string())
    })
}

fn prompt_with<C, T, F>(
    console: &mut C,
    prompt: &str,
    limit: RetryLimit,
    parse: F,
) -> Result<Option<T>, ConsoleError>
where
    C: Console,
    F: Fn(&str) -> Result<T, String>,
{
    let mut misses = 0;
    while let Some(input) = prompt_line(console, prompt)? {
        match parse(&input) {
            Ok(value) => return Ok(Some(value)),
            Err(message) => {
                console.write_line(&message)?;
                misses += 1;
                if limit.exhausted(misses) {
                    console.write_line("Too many invalid answers, returning to menu.")?;
                    break;
                }
            }
        }
    }
    Ok(None)
}

/// Ask for a key of `entity` until one that exists in the store is entered.
///
/// Returns the typed key ready to bind into further statements, or `None` if the
/// user aborted or the retry limit was reached.
///
/// # Errors
///
/// Returns [`WorkflowError`] if the store or the terminal fails.
pub async fn require_existing<G, C>(
    gateway: &mut G,
    console: &mut C,
    entity: &EntityKey,
    prompt: &str,
    limit: RetryLimit,
) -> Result<Option<Param>, WorkflowError>
where
    G: Gateway,
    C: Console,
{
    let mut misses = 0;
    while let Some(input) = prompt_line(console, prompt)? {
        match entity.key_param(&input) {
            Ok(key) => {
                if gateway.count(&entity.lookup(key.clone())).await? > 0 {
                    return Ok(Some(key));
                }
                tracing::debug!(table = entity.table, key = %key, "Key not found");
                console.write_line(&format!("{} {input} DOES NOT EXIST", entity.label))?;
            }
            Err(error) => console.write_line(&error.to_string())?,
        }
        misses += 1;
        if limit.exhausted(misses) {
            console.write_line("Too many invalid answers, returning to menu.")?;
            break;
        }
    }
    Ok(None)
}
