//! Management reports.

use super::{Outcome, Session};
use crate::render::print_table;
use airline_core::environment::Console;
use airline_core::gateway::{bool_cell, text_cell, Gateway, Statement};
use airline_core::schedule::display_date;
use airline_core::seats::{FlightStatistics, SeatAccount};
use airline_core::types::ReservationStatus;
use airline_core::validation::{prompt_date, prompt_line};
use tracing::warn;

const ON_TIME: &str = "ON TIME";
const NOT_ON_TIME: &str = "NOT ON TIME";

/// Every flight.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn view_flights<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    session
        .show_table(
            &Statement::new("SELECT * FROM Flight ORDER BY FlightNumber"),
            "\tALL FLIGHTS\t",
            "NO FLIGHTS ON RECORD",
        )
        .await
}

/// Weekly schedule of one flight.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn weekly_schedule<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let Some(flight) = prompt_line(&mut session.console, "Enter a flight number: ")? else {
        return Ok(());
    };
    session
        .show_table(
            &Statement::new(
                "SELECT * FROM Schedule WHERE FlightNumber = $1 ORDER BY ScheduleID",
            )
            .bind(flight.as_str()),
            &format!("\tWEEKLY SCHEDULE OF FLIGHT {flight}\t"),
            &format!("FLIGHT: {flight} NOT AVAILABLE THIS WEEK"),
        )
        .await
}

/// Open and sold seats of a flight on a date.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn flight_seats<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let Some((flight, date)) = session.prompt_flight_on_date()? else {
        return Ok(());
    };
    let rows = session
        .gateway
        .fetch_rows(
            &Statement::new(
                "SELECT SeatsTotal, SeatsSold FROM FlightInstance \
                 WHERE FlightNumber = $1 AND FlightDate = $2",
            )
            .bind(flight.as_str())
            .bind(date),
        )
        .await?;
    let Some(row) = rows.first() else {
        session.say(&format!("FLIGHT: {flight} NOT AVAILABLE ON {}", display_date(date)))?;
        return Ok(());
    };

    let seats = SeatAccount::from_row(row)?;
    session.say(&format!("FLIGHT: \t{flight}"))?;
    session.say(&format!("ON DATE: \t{}", display_date(date)))?;
    session.say(&format!("\tNUMBER OF SEATS OPEN:\t{}", seats.open()))?;
    session.say(&format!("\tNUMBER OF SEATS SOLD:\t{}", seats.sold))?;
    Ok(())
}

/// Departure and arrival punctuality of a flight on a date.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn flight_status<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let Some((flight, date)) = session.prompt_flight_on_date()? else {
        return Ok(());
    };
    let rows = session
        .gateway
        .fetch_rows(
            &Statement::new(
                "SELECT DepartedOnTime, ArrivedOnTime FROM FlightInstance \
                 WHERE FlightNumber = $1 AND FlightDate = $2",
            )
            .bind(flight.as_str())
            .bind(date),
        )
        .await?;
    let Some(row) = rows.first() else {
        session.say(&format!("FLIGHT: {flight} NOT AVAILABLE ON {}", display_date(date)))?;
        return Ok(());
    };

    let departed = if bool_cell(row, 0)? { ON_TIME } else { NOT_ON_TIME };
    let arrived = if bool_cell(row, 1)? { ON_TIME } else { NOT_ON_TIME };
    session.say(&format!("FLIGHT: \t{flight}"))?;
    session.say(&format!("ON DATE: \t{}", display_date(date)))?;
    session.say(&format!("DEPARTURE STATUS: \t{departed}"))?;
    session.say(&format!("ARRIVAL STATUS: \t{arrived}"))?;
    Ok(())
}

/// Every flight instance on a date.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn flights_of_the_day<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let limit = session.limit;
    let Some(date) = prompt_date(&mut session.console, "Enter a flight date (M/D/YY): ", limit)? else {
        return Ok(());
    };
    let label = display_date(date);
    session
        .show_table(
            &Statement::new(
                "SELECT * FROM FlightInstance WHERE FlightDate = $1 ORDER BY FlightNumber",
            )
            .bind(date),
            &format!("FLIGHTS SCHEDULED ON: {label}"),
            &format!("NO FLIGHTS SCHEDULED ON: {label}"),
        )
        .await
}

/// Reservations on a flight instance with their status, followed by a tally per status.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn passenger_list<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let Some((flight, date)) = session.prompt_flight_on_date()? else {
        return Ok(());
    };
    let label = display_date(date);
    let table = session
        .gateway
        .fetch_table(
            &Statement::new(
                "SELECT r.ReservationID, r.CustomerID, r.Status \
                 FROM FlightInstance f, Reservation r \
                 WHERE f.FlightNumber = $1 AND f.FlightDate = $2 \
                 AND f.FlightInstanceID = r.FlightInstanceID \
                 ORDER BY r.ReservationID",
            )
            .bind(flight.as_str())
            .bind(date),
        )
        .await?;
    if table.is_empty() {
        session.say(&format!("NO PASSENGERS ON FLIGHT: {flight} ON {label}"))?;
        return Ok(());
    }
    session.say(&format!("ALL PASSENGERS STATUS OF FLIGHT: {flight} ON {label}"))?;
    print_table(&mut session.console, &table)?;

    let (mut reserved, mut waitlist, mut flown) = (0, 0, 0);
    for row in &table.rows {
        match ReservationStatus::parse(text_cell(row, 2).unwrap_or_default()) {
            Ok(ReservationStatus::Reserved) => reserved += 1,
            Ok(ReservationStatus::Waitlist) => waitlist += 1,
            Ok(ReservationStatus::Flown) => flown += 1,
            Err(e) => warn!(flight = %flight, error = %e, "Skipping reservation with unknown status"),
        }
    }
    session.say(&format!(
        "RESERVED:\t{reserved}\tWAITLIST:\t{waitlist}\tFLOWN:\t{flown}"
    ))?;
    Ok(())
}

/// Customer behind a reservation.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn passenger_info<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let Some(reservation) = prompt_line(&mut session.console, "Enter Reservation ID: ")? else {
        return Ok(());
    };
    session
        .show_table(
            &Statement::new(
                "SELECT c.* FROM Customer c WHERE c.CustomerID = \
                 (SELECT r.CustomerID FROM Reservation r WHERE r.ReservationID = $1)",
            )
            .bind(reservation.as_str()),
            &format!("INFORMATION OF CUSTOMER WITH RESERVATION: \t{reservation}"),
            &format!("RESERVATION: {reservation} DOES NOT EXIST"),
        )
        .await
}

/// Make, model, year and last repair of a plane.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn plane_info<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let Some(plane) = prompt_line(&mut session.console, "Enter Plane ID: ")? else {
        return Ok(());
    };
    session
        .show_table(
            &Statement::new("SELECT * FROM Plane WHERE PlaneID = $1").bind(plane.as_str()),
            &format!("INFORMATION OF PLANE: \t{plane}"),
            &format!("PLANE: {plane} DOES NOT EXIST"),
        )
        .await
}

/// Every repair made by a technician.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn technician_repairs<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let Some(technician) = prompt_line(&mut session.console, "Enter Technician ID: ")? else {
        return Ok(());
    };
    session
        .show_table(
            &Statement::new(
                "SELECT * FROM Repair WHERE TechnicianID = $1 ORDER BY RepairDate",
            )
            .bind(technician.as_str()),
            &format!("REPAIRS MADE BY: \t{technician}"),
            &format!("NO REPAIRS MADE BY TECHNICIAN: {technician}"),
        )
        .await
}

/// Repair dates and codes of a plane within a date range.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal fails.
pub async fn plane_repairs_in_range<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let Some(plane) = prompt_line(&mut session.console, "Enter Plane ID: ")? else {
        return Ok(());
    };
    let Some((start, end)) = session.prompt_range()? else {
        return Ok(());
    };
    let (from, to) = (display_date(start), display_date(end));
    session
        .show_table(
            &Statement::new(
                "SELECT PlaneID, RepairDate, RepairCode FROM Repair \
                 WHERE PlaneID = $1 AND RepairDate >= $2 AND RepairDate <= $3 \
                 ORDER BY RepairDate",
            )
            .bind(plane.as_str())
            .bind(start)
            .bind(end),
            &format!("REPAIRS ON PLANE: \t{plane} FROM: {from} TO: {to}"),
            &format!("NO REPAIRS ON PLANE: {plane} BETWEEN {from} AND {to}"),
        )
        .await
}

/// Instance count, punctuality and seat totals of a flight over a date range.
///
/// An empty range prints all-zero totals.
///
/// # Errors
///
/// Returns [`WorkflowError`](airline_core::WorkflowError) if the store or the terminal
/// fails, or a row does not decode.
pub async fn flight_statistics<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let Some(flight) = prompt_line(&mut session.console, "Enter a flight number: ")? else {
        return Ok(());
    };
    let Some((start, end)) = session.prompt_range()? else {
        return Ok(());
    };
    let rows = session
        .gateway
        .fetch_rows(
            &Statement::new(
                "SELECT SeatsTotal, SeatsSold, DepartedOnTime, ArrivedOnTime FROM FlightInstance \
                 WHERE FlightNumber = $1 AND FlightDate >= $2 AND FlightDate <= $3",
            )
            .bind(flight.as_str())
            .bind(start)
            .bind(end),
        )
        .await?;
    let stats = FlightStatistics::from_rows(&rows)?;

    tracing::debug!(flight_number = %flight, instances = stats.instances, "Flight statistics computed");
    session.say(&format!(
        "STATISTICS OF FLIGHT: {flight} FROM: {} TO: {}",
        display_date(start),
        display_date(end)
    ))?;
    session.say(&format!("\tFLIGHT INSTANCES:\t{}", stats.instances))?;
    session.say(&format!("\tDAYS DEPARTED ON TIME:\t{}", stats.departed_on_time))?;
    session.say(&format!("\tDAYS ARRIVED ON TIME:\t{}", stats.arrived_on_time))?;
    session.say(&format!("\tSEATS SOLD:\t{}", stats.seats_sold))?;
    session.say(&format!("\tSEATS UNSOLD:\t{}", stats.seats_unsold))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use airline_core::gateway::Param;
    use airline_core::RetryLimit;
    use airline_testing::{MockGateway, ScriptedConsole};
    use chrono::NaiveDate;

    fn session(gateway: MockGateway, input: &[&str]) -> Session<MockGateway, ScriptedConsole> {
        Session::new(gateway, ScriptedConsole::new(input.iter().copied()), RetryLimit::Unbounded)
    }

    #[tokio::test]
    async fn passenger_list_tallies_each_status() {
        let gateway = MockGateway::new().expect_table(
            "FROM FlightInstance f, Reservation r",
            vec!["reservationid".into(), "customerid".into(), "status".into()],
            vec![
                vec!["R0001", "1", "reserved"],
                vec!["R0002", "2", "waitlist "],
                vec!["R0003", "3", "flown"],
                vec!["R0004", "4", "reserved"],
                vec!["R0005", "5", "lost"],
            ],
        );
        let mut session = session(gateway, &["F100", "3/10/23"]);

        passenger_list(&mut session).await.unwrap();

        assert!(session.console.printed("ALL PASSENGERS STATUS OF FLIGHT: F100"));
        assert!(session
            .console
            .printed("RESERVED:\t2\tWAITLIST:\t1\tFLOWN:\t1"));
    }

    #[tokio::test]
    async fn passenger_list_without_reservations() {
        let gateway = MockGateway::new().expect_empty("FROM FlightInstance f, Reservation r");
        let mut session = session(gateway, &["F100", "3/10/23"]);

        passenger_list(&mut session).await.unwrap();

        assert!(session.console.printed("NO PASSENGERS ON FLIGHT: F100"));
        assert!(!session.console.printed("RESERVED:"));
    }

    #[tokio::test]
    async fn seats_report_open_and_sold() {
        let gateway = MockGateway::new().expect_rows("FROM FlightInstance", vec![vec!["150", "149"]]);
        let mut session = session(gateway, &["F100", "3/10/23"]);

        flight_seats(&mut session).await.unwrap();

        assert!(session.console.printed("NUMBER OF SEATS OPEN:\t1"));
        assert!(session.console.printed("NUMBER OF SEATS SOLD:\t149"));
        assert_eq!(
            session.gateway.executed()[0].params,
            vec![
                Param::Text("F100".into()),
                Param::Date(NaiveDate::from_ymd_opt(2023, 3, 10).unwrap())
            ]
        );
    }

    #[tokio::test]
    async fn seats_report_missing_instance() {
        let gateway = MockGateway::new().expect_empty("FROM FlightInstance");
        let mut session = session(gateway, &["F999", "3/10/23"]);

        flight_seats(&mut session).await.unwrap();

        assert!(session.console.printed("FLIGHT: F999 NOT AVAILABLE ON 3/10/23"));
    }

    #[tokio::test]
    async fn status_report_reads_flags() {
        let gateway = MockGateway::new().expect_rows("FROM FlightInstance", vec![vec!["t", "f"]]);
        let mut session = session(gateway, &["F200", "2023-03-10"]);

        flight_status(&mut session).await.unwrap();

        assert!(session.console.printed("DEPARTURE STATUS: \tON TIME"));
        assert!(session.console.printed("ARRIVAL STATUS: \tNOT ON TIME"));
    }

    #[tokio::test]
    async fn table_report_prints_heading_and_rows() {
        let gateway = MockGateway::new().expect_table(
            "FROM Plane WHERE PlaneID = $1",
            vec!["planeid".into(), "make".into()],
            vec![vec!["PL001", "Boeing"]],
        );
        let mut session = session(gateway, &["PL001"]);

        plane_info(&mut session).await.unwrap();

        assert!(session.console.printed("INFORMATION OF PLANE: \tPL001"));
        assert!(session.console.printed("total row(s): 1"));
        assert!(session.console.printed("PL001               Boeing"));
    }

    #[tokio::test]
    async fn unknown_reservation_is_reported_not_raised() {
        let gateway = MockGateway::new().expect_empty("FROM Customer c");
        let mut session = session(gateway, &["R9999"]);

        passenger_info(&mut session).await.unwrap();

        assert!(session.console.printed("RESERVATION: R9999 DOES NOT EXIST"));
        assert!(!session.console.printed("total row(s)"));
    }

    #[tokio::test]
    async fn statistics_over_empty_range_are_zero() {
        let gateway = MockGateway::new().expect_empty("FROM FlightInstance");
        let mut session = session(gateway, &["F100", "1/1/20", "1/31/20"]);

        flight_statistics(&mut session).await.unwrap();

        assert!(session.console.printed("FLIGHT INSTANCES:\t0"));
        assert!(session.console.printed("SEATS SOLD:\t0"));
        assert!(session.console.printed("SEATS UNSOLD:\t0"));
    }

    #[tokio::test]
    async fn statistics_fold_instances() {
        let gateway = MockGateway::new().expect_rows(
            "FROM FlightInstance",
            vec![vec!["150", "149", "t", "t"], vec!["150", "150", "f", "t"]],
        );
        let mut session = session(gateway, &["F100", "3/1/23", "3/31/23"]);

        flight_statistics(&mut session).await.unwrap();

        assert!(session.console.printed("FLIGHT INSTANCES:\t2"));
        assert!(session.console.printed("DAYS DEPARTED ON TIME:\t1"));
        assert!(session.console.printed("DAYS ARRIVED ON TIME:\t2"));
        assert!(session.console.printed("SEATS SOLD:\t299"));
        assert!(session.console.printed("SEATS UNSOLD:\t1"));
    }

    #[tokio::test]
    async fn aborted_prompt_runs_no_query() {
        let mut session = session(MockGateway::new(), &[""]);
        weekly_schedule(&mut session).await.unwrap();
        assert!(session.gateway.executed().is_empty());
    }
}
