//! Account creation and login.
//!
//! Credentials are stored and compared as plain text.

use super::Session;
use airline_core::environment::Console;
use airline_core::error::{StoreError, WorkflowError};
use airline_core::gateway::{int_cell, text_cell, Gateway, Statement, Transactional, UnitOfWork};
use airline_core::ids::next_numeric_id;
use airline_core::types::UserType;
use airline_core::validation::{prompt_line, prompt_parsed};

fn username_lookup(username: &str) -> Statement {
    Statement::new("SELECT Username FROM Users WHERE Username = $1").bind(username)
}

/// Register a new user under a username nobody else has.
///
/// Returns the created user id, or `None` if the user aborted.
///
/// # Errors
///
/// Returns [`WorkflowError`] if the store or the terminal fails.
pub async fn create_user<G, C>(session: &mut Session<G, C>) -> Result<Option<i64>, WorkflowError>
where
    G: Transactional,
    C: Console,
{
    let mut misses = 0;
    let username = loop {
        let Some(username) = prompt_line(&mut session.console, "Enter a username: ")? else {
            return Ok(None);
        };
        if session.gateway.count(&username_lookup(&username)).await? == 0 {
            break username;
        }
        session.say(&format!("USERNAME {username} IS ALREADY TAKEN"))?;
        misses += 1;
        if session.limit.exhausted(misses) {
            session.say("Too many invalid answers, returning to menu.")?;
            return Ok(None);
        }
    };
    let Some(password) = prompt_line(&mut session.console, "Enter a password: ")? else {
        return Ok(None);
    };
    for user_type in UserType::ALL {
        session.say(&user_type.to_string())?;
    }
    let limit = session.limit;
    let Some(user_type) = prompt_parsed::<_, UserType>(&mut session.console, "Enter the user type: ", limit)? else {
        return Ok(None);
    };

    let mut unit = session.gateway.begin().await?;
    unit.apply(&Statement::new("LOCK TABLE Users IN SHARE ROW EXCLUSIVE MODE"))
        .await?;
    // Taken between the prompt and the lock
    if unit.count(&username_lookup(&username)).await? > 0 {
        session
            .console
            .write_line(&format!("USERNAME {username} IS ALREADY TAKEN"))?;
        return Ok(None);
    }
    let max = unit.fetch_rows(&Statement::new("SELECT MAX(UserID) FROM Users")).await?;
    let user_id = next_numeric_id(max.first().and_then(|row| text_cell(row, 0)))?;
    unit.apply(
        &Statement::new(
            "INSERT INTO Users (UserID, Username, Password, UserType) VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(username.as_str())
        .bind(password)
        .bind(user_type.code()),
    )
    .await?;
    unit.commit().await?;

    tracing::info!(user_id, username = %username, user_type = %user_type, "User created");
    session.say(&format!("USER {username} CREATED"))?;
    Ok(Some(user_id))
}

/// Ask for credentials until exactly one user matches.
///
/// Returns that user's type, which selects the menu to show, or `None` if the
/// user aborted.
///
/// # Errors
///
/// Returns [`WorkflowError`] if the store or the terminal fails, or the stored
/// type code is not one of the four known codes.
pub async fn log_in<G, C>(session: &mut Session<G, C>) -> Result<Option<UserType>, WorkflowError>
where
    G: Gateway,
    C: Console,
{
    let mut misses = 0;
    loop {
        let Some(username) = prompt_line(&mut session.console, "Username: ")? else {
            return Ok(None);
        };
        let Some(password) = prompt_line(&mut session.console, "Password: ")? else {
            return Ok(None);
        };
        let rows = session
            .gateway
            .fetch_rows(
                &Statement::new("SELECT UserType FROM Users WHERE Username = $1 AND Password = $2")
                    .bind(username.as_str())
                    .bind(password),
            )
            .await?;

        if let [row] = rows.as_slice() {
            let code = int_cell(row, 0)?;
            let user_type = UserType::from_code(code).ok_or_else(|| {
                StoreError::decode(0, format!("{code} is not a user type"))
            })?;
            tracing::info!(username = %username, user_type = %user_type, "User logged in");
            return Ok(Some(user_type));
        }

        tracing::debug!(username = %username, matches = rows.len(), "Login rejected");
        session.say("Invalid username or password!")?;
        misses += 1;
        if session.limit.exhausted(misses) {
            session.say("Too many invalid answers, returning to menu.")?;
            return Ok(None);
        }
    }
}
