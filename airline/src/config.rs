//! Configuration management for the airline console.
//!
//! The database name, port and user come from the command line; everything else
//! from environment variables (optionally loaded from `.env`) with sensible defaults.

use airline_core::RetryLimit;
use clap::Parser;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Command line of the `airline` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "airline")]
#[command(about = "Role-gated console over an airline schedule database")]
pub struct Args {
    /// Database name
    pub dbname: String,

    /// Server port
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Login role
    pub user: String,
}

/// Invalid environment setting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric variable holds something else.
    #[error("Invalid value for {name}: {value}")]
    InvalidVariable {
        /// Variable name
        name: &'static str,
        /// Raw value found in the environment
        value: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Invalid answers a prompt accepts before giving up (0 = unlimited)
    pub max_prompt_attempts: u32,
}

/// `PostgreSQL` connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database name
    pub name: String,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Login role
    pub user: String,
    /// Login password (empty unless `AIRLINE_DB_PASSWORD` is set)
    #[serde(skip_serializing)]
    pub password: String,
    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

fn numeric<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVariable { name, value }),
    }
}

impl Config {
    /// Build the configuration from parsed arguments and an environment lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVariable`] if `AIRLINE_DB_CONNECT_TIMEOUT`
    /// or `AIRLINE_MAX_PROMPT_ATTEMPTS` is set but not a number.
    pub fn load<F>(args: Args, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database: DatabaseConfig {
                name: args.dbname,
                host: var("AIRLINE_DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: args.port,
                user: args.user,
                password: var("AIRLINE_DB_PASSWORD").unwrap_or_default(),
                connect_timeout: numeric(&var, "AIRLINE_DB_CONNECT_TIMEOUT", 30)?,
            },
            max_prompt_attempts: numeric(&var, "AIRLINE_MAX_PROMPT_ATTEMPTS", 0)?,
        })
    }

    /// Load from the process arguments and environment, reading `.env` first.
    ///
    /// A malformed command line prints usage and exits.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load(Args::parse(), |key| std::env::var(key).ok())
    }

    /// Structured connection options; credentials are never URL-encoded.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        let db = &self.database;
        let options = PgConnectOptions::new()
            .host(&db.host)
            .port(db.port)
            .username(&db.user)
            .database(&db.name);
        if db.password.is_empty() {
            options
        } else {
            options.password(&db.password)
        }
    }

    /// Connection URL without credentials, for display.
    #[must_use]
    pub fn display_url(&self) -> String {
        let db = &self.database;
        format!("postgres://{}:{}/{}", db.host, db.port, db.name)
    }

    /// Get connect timeout as Duration
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.database.connect_timeout)
    }

    /// Retry policy of the prompt loops.
    #[must_use]
    pub const fn retry_limit(&self) -> RetryLimit {
        RetryLimit::from_attempts(self.max_prompt_attempts)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::collections::HashMap;

    fn args(values: &[&str]) -> Args {
        Args::try_parse_from(values.iter().copied()).unwrap()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = Config::load(args(&["airline", "flights", "5432", "alice"]), |_| None).unwrap();

        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.password, "");
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
        assert_eq!(config.retry_limit(), RetryLimit::Unbounded);
        assert_eq!(config.display_url(), "postgres://localhost:5432/flights");
    }

    #[test]
    fn environment_overrides_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("AIRLINE_DB_HOST", "db.internal"),
            ("AIRLINE_DB_PASSWORD", "hunter2"),
            ("AIRLINE_DB_CONNECT_TIMEOUT", "5"),
            ("AIRLINE_MAX_PROMPT_ATTEMPTS", "3"),
        ]);
        let config = Config::load(args(&["airline", "flights", "6543", "alice"]), |key| {
            env.get(key).map(ToString::to_string)
        })
        .unwrap();

        assert_eq!(config.database.password, "hunter2");
        assert_eq!(config.display_url(), "postgres://db.internal:6543/flights");
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.retry_limit(), RetryLimit::Attempts(3));
    }

    #[test]
    fn reserved_characters_in_password_keep_options_intact() {
        let config = Config::load(args(&["airline", "flights", "5432", "alice"]), |key| {
            (key == "AIRLINE_DB_PASSWORD").then(|| "se/cr#et".to_string())
        })
        .unwrap();

        let options = config.connect_options();

        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "alice");
        assert_eq!(options.get_database(), Some("flights"));
    }

    #[test]
    fn malformed_numeric_variable_is_reported() {
        let error = Config::load(args(&["airline", "flights", "5432", "alice"]), |key| {
            (key == "AIRLINE_DB_CONNECT_TIMEOUT").then(|| "soon".to_string())
        })
        .unwrap_err();

        assert_eq!(
            error,
            ConfigError::InvalidVariable {
                name: "AIRLINE_DB_CONNECT_TIMEOUT",
                value: "soon".to_string(),
            }
        );
    }

    #[test]
    fn missing_argument_is_a_usage_error() {
        let error = Args::try_parse_from(["airline", "flights"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn port_must_be_numeric_and_nonzero() {
        let error = Args::try_parse_from(["airline", "flights", "pg", "alice"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueValidation);

        let error = Args::try_parse_from(["airline", "flights", "0", "alice"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueValidation);
    }
}
