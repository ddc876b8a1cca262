//! Airline schedule console.
//!
//! Usage: `airline <DBNAME> <PORT> <USER>`

use airline_core::environment::{Console, TerminalConsole};
use airline_management::{menu, Config, Session};
use airline_postgres::PostgresStore;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with menu output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,airline_management=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut console = TerminalConsole::stdio();
    if menu::greeting(&mut console).is_err() {
        return ExitCode::FAILURE;
    }

    let url = config.display_url();
    println!("Connection URL: {url}\n");
    info!(url = %url, user = %config.database.user, "Connecting to database");

    let connecting = PostgresStore::connect_with(config.connect_options(), config.connect_timeout());
    let store = match connecting.await {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "Connection failed");
            eprintln!("Error - Unable to Connect to Database: {e}");
            eprintln!("Make sure you started postgres on this machine");
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(store, console, config.retry_limit());
    let result = menu::run(&mut session).await;

    session.gateway.close().await;
    let farewell = session
        .console
        .write_line("Disconnecting from database...Done\n\nBye !");

    match result.and(farewell) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Terminal failure");
            ExitCode::FAILURE
        }
    }
}
