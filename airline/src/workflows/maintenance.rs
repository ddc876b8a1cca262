//! Maintenance requests filed by pilots and repairs logged by technicians.

use super::{Outcome, Session};
use airline_core::catalog::{EntityKey, PILOT, PLANE, TECHNICIAN};
use airline_core::environment::Console;
use airline_core::error::WorkflowError;
use airline_core::gateway::{text_cell, Gateway, Param, Statement, Transactional, UnitOfWork};
use airline_core::ids::next_numeric_id;
use airline_core::schedule::display_date;
use airline_core::validation::{prompt_date, prompt_line, require_existing};
use chrono::NaiveDate;

/// What every maintenance entry records: which plane, what code, when.
struct WorkOrder {
    person: Param,
    plane: Param,
    code: String,
    date: NaiveDate,
}

async fn prompt_work_order<G: Gateway, C: Console>(
    session: &mut Session<G, C>,
    person: (&EntityKey, &str),
    date_prompt: &str,
) -> Result<Option<WorkOrder>, WorkflowError> {
    let limit = session.limit;
    let (entity, prompt) = person;
    let Some(person) =
        require_existing(&mut session.gateway, &mut session.console, entity, prompt, limit).await?
    else {
        return Ok(None);
    };
    let Some(plane) = require_existing(
        &mut session.gateway,
        &mut session.console,
        &PLANE,
        "Enter Plane ID: ",
        limit,
    )
    .await?
    else {
        return Ok(None);
    };
    let Some(code) = prompt_line(&mut session.console, "Enter Repair Code: ")? else {
        return Ok(None);
    };
    let Some(date) = prompt_date(&mut session.console, date_prompt, limit)? else {
        return Ok(None);
    };
    Ok(Some(WorkOrder {
        person,
        plane,
        code,
        date,
    }))
}

/// File a maintenance request for a plane on behalf of a pilot.
///
/// # Errors
///
/// Returns [`WorkflowError`] if the store or the terminal fails.
pub async fn make_maintenance_request<G, C>(session: &mut Session<G, C>) -> Outcome
where
    G: Transactional,
    C: Console,
{
    let Some(order) = prompt_work_order(
        session,
        (&PILOT, "Enter Pilot ID: "),
        "Enter Date of Request (M/D/YY): ",
    )
    .await?
    else {
        return Ok(());
    };

    let mut unit = session.gateway.begin().await?;
    unit.apply(&Statement::new(
        "LOCK TABLE MaintenanceRequest IN SHARE ROW EXCLUSIVE MODE",
    ))
    .await?;
    let max = unit
        .fetch_rows(&Statement::new("SELECT MAX(RequestID) FROM MaintenanceRequest"))
        .await?;
    let request_id = next_numeric_id(max.first().and_then(|row| text_cell(row, 0)))?;
    unit.apply(
        &Statement::new(
            "INSERT INTO MaintenanceRequest (RequestID, PlaneID, RepairCode, RequestDate, PilotID) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(request_id)
        .bind(order.plane.clone())
        .bind(order.code.as_str())
        .bind(order.date)
        .bind(order.person.clone()),
    )
    .await?;
    unit.commit().await?;

    tracing::info!(request_id, pilot_id = %order.person, plane_id = %order.plane, "Maintenance request filed");
    metrics::counter!("airline.maintenance.requests").increment(1);
    session.say(&format!(
        "MAINTENANCE REQUEST {request_id} MADE BY PILOT: {} ON PLANE: {}",
        order.person, order.plane
    ))?;
    Ok(())
}

/// Every maintenance request a pilot has filed.
///
/// # Errors
///
/// Returns [`WorkflowError`] if the store or the terminal fails.
pub async fn pilot_requests<G: Gateway, C: Console>(session: &mut Session<G, C>) -> Outcome {
    let Some(pilot) = prompt_line(&mut session.console, "Enter Pilot ID: ")? else {
        return Ok(());
    };
    session
        .show_table(
            &Statement::new(
                "SELECT RequestID, PlaneID, RepairCode, RequestDate FROM MaintenanceRequest \
                 WHERE PilotID = $1 ORDER BY RequestDate",
            )
            .bind(pilot.as_str()),
            &format!("MAINTENANCE REQUESTS MADE BY PILOT: \t{pilot}"),
            &format!("NO MAINTENANCE REQUESTS MADE BY PILOT: {pilot}"),
        )
        .await
}

/// Record a repair and move the plane's last repair date forward.
///
/// `Plane.LastRepairDate` only changes when the repair is newer than what is on
/// record, so logging an old repair after the fact keeps the latest date.
///
/// # Errors
///
/// Returns [`WorkflowError`] if the store or the terminal fails.
pub async fn log_repair<G, C>(session: &mut Session<G, C>) -> Outcome
where
    G: Transactional,
    C: Console,
{
    let Some(order) = prompt_work_order(
        session,
        (&TECHNICIAN, "Enter Technician ID: "),
        "Enter Repair Date (M/D/YY): ",
    )
    .await?
    else {
        return Ok(());
    };

    let mut unit = session.gateway.begin().await?;
    unit.apply(&Statement::new("LOCK TABLE Repair IN SHARE ROW EXCLUSIVE MODE"))
        .await?;
    let max = unit
        .fetch_rows(&Statement::new("SELECT MAX(RepairID) FROM Repair"))
        .await?;
    let repair_id = next_numeric_id(max.first().and_then(|row| text_cell(row, 0)))?;
    unit.apply(
        &Statement::new(
            "INSERT INTO Repair (RepairID, PlaneID, RepairCode, RepairDate, TechnicianID) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(repair_id)
        .bind(order.plane.clone())
        .bind(order.code.as_str())
        .bind(order.date)
        .bind(order.person.clone()),
    )
    .await?;
    unit.apply(
        &Statement::new(
            "UPDATE Plane SET LastRepairDate = $1 \
             WHERE PlaneID = $2 AND (LastRepairDate IS NULL OR LastRepairDate < $1)",
        )
        .bind(order.date)
        .bind(order.plane.clone()),
    )
    .await?;
    unit.commit().await?;

    tracing::info!(repair_id, technician_id = %order.person, plane_id = %order.plane, "Repair logged");
    metrics::counter!("airline.maintenance.repairs").increment(1);
    session.say(&format!(
        "REPAIR {repair_id} ON PLANE: {} LOGGED BY TECHNICIAN: {} ON {}",
        order.plane,
        order.person,
        display_date(order.date)
    ))?;
    Ok(())
}
