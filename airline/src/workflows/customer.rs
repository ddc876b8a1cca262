//! Customer lookups: flight search, ticket cost, stops, punctuality.

use super::{Outcome, Session};
use airline_core::environment::Console;
use airline_core::gateway::{text_cell, Gateway, Statement};
use airline_core::schedule::{display_date, weekday_name};
use airline_core::seats::{on_time_percentage, InstanceRecord};
use airline_core::validation::{prompt_date, prompt_line};

/// Flights between two cities on a date.
///
/// The date is resolved to its weekday to match the weekly schedule; the
/// instance on that exact date (if any) supplies open seats and punctuality.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn search_flights<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let Some(departure) = prompt_line(&mut session.console, "Departure city: ")? else {
        return Ok(());
    };
    let Some(arrival) = prompt_line(&mut session.console, "Arrival city: ")? else {
        return Ok(());
    };
    let limit = session.limit;
    let Some(date) = prompt_date(&mut session.console, "Flight date (M/D/YY): ", limit)? else {
        return Ok(());
    };
    let weekday = weekday_name(date);
    let label = display_date(date);

    session
        .show_table(
            &Statement::new(
                "SELECT f.FlightNumber, s.DepartureTime, s.ArrivalTime, \
                 GREATEST(fi.SeatsTotal - fi.SeatsSold, 0) AS OpenSeats, \
                 fi.DepartedOnTime, fi.ArrivedOnTime \
                 FROM Flight f \
                 JOIN Schedule s ON s.FlightNumber = f.FlightNumber \
                 LEFT JOIN FlightInstance fi \
                 ON fi.FlightNumber = f.FlightNumber AND fi.FlightDate = $4 \
                 WHERE f.DepartureCity = $1 AND f.ArrivalCity = $2 AND s.DayOfWeek = $3 \
                 ORDER BY s.DepartureTime",
            )
            .bind(departure.as_str())
            .bind(arrival.as_str())
            .bind(weekday)
            .bind(date),
            &format!("FLIGHTS FROM {departure} TO {arrival} ON {weekday} {label}"),
            &format!("NO FLIGHTS FROM {departure} TO {arrival} ON {weekday} {label}"),
        )
        .await
}

/// Ticket cost of a flight on a date.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn ticket_cost<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    instance_value(session, "TicketCost::text", "TICKET COST").await
}

/// Number of stops of a flight on a date.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn number_of_stops<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    instance_value(session, "NumOfStops", "NUMBER OF STOPS").await
}

async fn instance_value<G: Gateway, C: Console>(
    session: &mut Session<G, C>,
    expression: &str,
    label: &str,
) -> Outcome {
    let Some((flight, date)) = session.prompt_flight_on_date()? else {
        return Ok(());
    };
    let table = session
        .gateway
        .fetch_table(
            &Statement::new(format!(
                "SELECT {expression} FROM FlightInstance WHERE FlightNumber = $1 AND FlightDate = $2"
            ))
            .bind(flight.as_str())
            .bind(date),
        )
        .await?;
    let on = display_date(date);
    match table.rows.first().and_then(|row| text_cell(row, 0)) {
        Some(value) => session.say(&format!("{label} OF FLIGHT {flight} ON {on}: {value}"))?,
        None => session.say(&format!("FLIGHT: {flight} NOT AVAILABLE ON {on}"))?,
    }
    Ok(())
}

/// Share of a flight's instances that departed and arrived on time.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal
/// fails, or a row does not decode.
pub async fn on_time_record<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let Some(flight) = prompt_line(&mut session.console, "Enter a flight number: ")? else {
        return Ok(());
    };
    let rows = session
        .gateway
        .fetch_rows(
            &Statement::new(
                "SELECT SeatsTotal, SeatsSold, DepartedOnTime, ArrivedOnTime \
                 FROM FlightInstance WHERE FlightNumber = $1",
            )
            .bind(flight.as_str()),
        )
        .await?;
    let records = rows
        .iter()
        .map(|row| InstanceRecord::from_row(row))
        .collect::<Result<Vec<_>, _>>()?;

    match on_time_percentage(&records) {
        Some(percentage) => session.say(&format!(
            "ON-TIME PERCENTAGE OF FLIGHT {flight}: {percentage:.2}% ({} INSTANCES)",
            records.len()
        ))?,
        None => session.say(&format!("FLIGHT: {flight} HAS NO RECORDED INSTANCES"))?,
    }
    Ok(())
}
