//! Making and cancelling reservations.
//!
//! Both operations run in one unit of work: the reservation row and the
//! `SeatsSold` counter change together or not at all. Reserving then cancelling
//! the same instance leaves `SeatsSold` where it started.

use super::{Outcome, Session};
use airline_core::catalog::{CUSTOMER, FLIGHT_INSTANCE};
use airline_core::environment::Console;
use airline_core::gateway::{int_cell, text_cell, Gateway, Statement, Transactional, UnitOfWork};
use airline_core::ids::next_reservation_id;
use airline_core::seats::SeatAccount;
use airline_core::validation::{prompt_line, require_existing};

/// Reserve a seat on a flight instance for a customer.
///
/// The status is `reserved` while the instance has an open seat and `waitlist`
/// once it is full. `SeatsSold` is incremented either way.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal
/// fails. Nothing is written in that case.
pub async fn make_reservation<G, C>(session: &mut Session<G, C>) -> Outcome
where
    G: Transactional,
    C: Console,
{
    let limit = session.limit;
    let Some(customer) = require_existing(
        &mut session.gateway,
        &mut session.console,
        &CUSTOMER,
        "Enter Customer ID: ",
        limit,
    )
    .await?
    else {
        return Ok(());
    };
    let Some(instance) = require_existing(
        &mut session.gateway,
        &mut session.console,
        &FLIGHT_INSTANCE,
        "Enter Flight Instance ID: ",
        limit,
    )
    .await?
    else {
        return Ok(());
    };

    let mut unit = session.gateway.begin().await?;
    unit.apply(&Statement::new("LOCK TABLE Reservation IN SHARE ROW EXCLUSIVE MODE"))
        .await?;

    let seats = unit
        .fetch_rows(
            &Statement::new(
                "SELECT SeatsTotal, SeatsSold FROM FlightInstance \
                 WHERE FlightInstanceID = $1 FOR UPDATE",
            )
            .bind(instance.clone()),
        )
        .await?;
    let Some(seats) = seats.first() else {
        session
            .console
            .write_line(&format!("FLIGHT INSTANCE {instance} DOES NOT EXIST"))?;
        return Ok(());
    };
    let status = SeatAccount::from_row(seats)?.status_for_next();

    let latest = unit
        .fetch_rows(&Statement::new(
            "SELECT ReservationID FROM Reservation \
             ORDER BY LENGTH(TRIM(ReservationID)) DESC, ReservationID DESC LIMIT 1",
        ))
        .await?;
    let id = next_reservation_id(latest.first().and_then(|row| text_cell(row, 0)))?;

    unit.apply(
        &Statement::new(
            "INSERT INTO Reservation (ReservationID, CustomerID, FlightInstanceID, Status) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id.to_string())
        .bind(customer.clone())
        .bind(instance.clone())
        .bind(status.as_str()),
    )
    .await?;
    unit.apply(
        &Statement::new(
            "UPDATE FlightInstance SET SeatsSold = SeatsSold + 1 WHERE FlightInstanceID = $1",
        )
        .bind(instance.clone()),
    )
    .await?;
    unit.commit().await?;

    tracing::info!(
        reservation_id = %id,
        customer_id = %customer,
        flight_instance_id = %instance,
        status = %status,
        "Reservation created"
    );
    metrics::counter!("airline.reservations.created", "status" => status.as_str()).increment(1);

    session.say(&format!("RESERVATION {id} CREATED WITH STATUS: {status}"))?;
    Ok(())
}

/// Cancel a reservation and release its seat.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal
/// fails. Nothing is written in that case.
pub async fn cancel_reservation<G, C>(session: &mut Session<G, C>) -> Outcome
where
    G: Transactional,
    C: Console,
{
    let Some(reservation) = prompt_line(&mut session.console, "Enter Reservation ID: ")? else {
        return Ok(());
    };

    let mut unit = session.gateway.begin().await?;
    let rows = unit
        .fetch_rows(
            &Statement::new(
                "SELECT FlightInstanceID FROM Reservation WHERE ReservationID = $1 FOR UPDATE",
            )
            .bind(reservation.as_str()),
        )
        .await?;
    let Some(row) = rows.first() else {
        session
            .console
            .write_line(&format!("RESERVATION {reservation} DOES NOT EXIST"))?;
        return Ok(());
    };
    let instance = int_cell(row, 0)?;

    unit.apply(
        &Statement::new("DELETE FROM Reservation WHERE ReservationID = $1")
            .bind(reservation.as_str()),
    )
    .await?;
    unit.apply(
        &Statement::new(
            "UPDATE FlightInstance SET SeatsSold = SeatsSold - 1 WHERE FlightInstanceID = $1",
        )
        .bind(instance),
    )
    .await?;
    unit.commit().await?;

    tracing::info!(reservation_id = %reservation, flight_instance_id = instance, "Reservation cancelled");
    metrics::counter!("airline.reservations.cancelled").increment(1);

    session.say(&format!("RESERVATION {reservation} CANCELLED"))?;
    Ok(())
}
