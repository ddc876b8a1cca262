//! Main menu and role menus.
//!
//! A failed workflow never ends the session: store errors are printed and the
//! menu comes back. Only a broken terminal (or end of input) stops the loop.

use crate::workflows::{customer, maintenance, reports, reservations, users, Outcome, Session};
use airline_core::environment::Console;
use airline_core::error::{ConsoleError, WorkflowError};
use airline_core::gateway::Transactional;
use airline_core::types::UserType;

/// Choice that leaves a role menu.
pub const LOG_OUT: u32 = 20;

/// Everything a role menu can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// All flights
    ViewFlights,
    /// Weekly schedule of a flight
    WeeklySchedule,
    /// Open and sold seats on a date
    FlightSeats,
    /// Departure and arrival punctuality on a date
    FlightStatus,
    /// Every flight instance on a date
    FlightsOfTheDay,
    /// Reservations on a flight instance
    PassengerList,
    /// Customer behind a reservation
    PassengerInfo,
    /// One plane
    PlaneInfo,
    /// Repairs made by a technician
    TechnicianRepairs,
    /// Repairs on a plane in a date range
    PlaneRepairs,
    /// Aggregate figures over a date range
    FlightStatistics,
    /// Flights between two cities on a date
    SearchFlights,
    /// Ticket cost on a date
    TicketCost,
    /// Stops on a date
    NumberOfStops,
    /// On-time percentage
    OnTimeRecord,
    /// Reserve a seat
    MakeReservation,
    /// Cancel a reservation
    CancelReservation,
    /// File a maintenance request
    MaintenanceRequest,
    /// Maintenance requests of a pilot
    PilotRequests,
    /// Record a repair
    LogRepair,
}

/// Numbered entries shown to one role.
#[derive(Debug)]
pub struct Menu {
    /// Heading printed above the entries
    pub title: &'static str,
    /// Choice number, label, action
    pub items: &'static [(u32, &'static str, Action)],
}

impl Menu {
    /// Menu for a logged-in user of the given type.
    #[must_use]
    pub fn for_role(user_type: UserType) -> &'static Self {
        match user_type {
            UserType::Management => &MANAGEMENT,
            UserType::Customer => &CUSTOMER,
            UserType::Pilot => &PILOT,
            UserType::Technician => &TECHNICIAN,
        }
    }

    /// Action bound to `choice`, if any.
    #[must_use]
    pub fn action(&self, choice: u32) -> Option<Action> {
        self.items
            .iter()
            .find(|(number, _, _)| *number == choice)
            .map(|(_, _, action)| *action)
    }

    fn show<C: Console>(&self, console: &mut C) -> Result<(), ConsoleError> {
        console.write_line("")?;
        console.write_line(self.title)?;
        console.write_line("---------")?;
        for (number, label, _) in self.items {
            console.write_line(&format!("{number}. {label}"))?;
        }
        console.write_line(&format!("{LOG_OUT}. Log out"))
    }
}

/// Management reports.
pub static MANAGEMENT: Menu = Menu {
    title: "AIRLINE MANAGEMENT",
    items: &[
        (1, "View All Flights", Action::ViewFlights),
        (2, "View Weekly Schedule of a Flight", Action::WeeklySchedule),
        (3, "View Flight Seats", Action::FlightSeats),
        (4, "View Flight Status", Action::FlightStatus),
        (5, "View Flights of the day", Action::FlightsOfTheDay),
        (6, "View Passenger List Status", Action::PassengerList),
        (7, "View Passenger Information", Action::PassengerInfo),
        (8, "View Plane Information", Action::PlaneInfo),
        (9, "View All Repairs of a Technician", Action::TechnicianRepairs),
        (10, "View List of Repairs on a Plane", Action::PlaneRepairs),
        (11, "View Flight Statistics", Action::FlightStatistics),
    ],
};

/// Flight lookups and reservations.
pub static CUSTOMER: Menu = Menu {
    title: "CUSTOMER",
    items: &[
        (1, "Search Flights", Action::SearchFlights),
        (2, "View Ticket Cost", Action::TicketCost),
        (3, "View Number of Stops", Action::NumberOfStops),
        (4, "View On-Time Percentage of a Flight", Action::OnTimeRecord),
        (5, "Make Reservation", Action::MakeReservation),
        (6, "Cancel Reservation", Action::CancelReservation),
    ],
};

/// Maintenance requests.
pub static PILOT: Menu = Menu {
    title: "PILOT",
    items: &[
        (1, "Make Maintenance Request", Action::MaintenanceRequest),
        (2, "View My Maintenance Requests", Action::PilotRequests),
    ],
};

/// Repairs.
pub static TECHNICIAN: Menu = Menu {
    title: "TECHNICIAN",
    items: &[
        (1, "View List of Repairs on a Plane", Action::PlaneRepairs),
        (2, "View Maintenance Requests of a Pilot", Action::PilotRequests),
        (3, "Log a Repair", Action::LogRepair),
    ],
};

/// Ask until the answer is a number. `None` once input runs out.
///
/// # Errors
///
/// Returns [`ConsoleError`] if the terminal fails.
pub fn read_choice<C: Console>(console: &mut C) -> Result<Option<u32>, ConsoleError> {
    while let Some(line) = console.read_line("Please make your choice: ")? {
        match line.trim().parse() {
            Ok(choice) => return Ok(Some(choice)),
            Err(_) => console.write_line("Your input is invalid!")?,
        }
    }
    Ok(None)
}

/// Print the banner shown at startup.
///
/// # Errors
///
/// Returns [`ConsoleError`] if the terminal fails.
pub fn greeting<C: Console>(console: &mut C) -> Result<(), ConsoleError> {
    let rule = "*".repeat(55);
    console.write_line("\n")?;
    console.write_line(&rule)?;
    console.write_line("              User Interface")?;
    console.write_line(&rule)?;
    console.write_line("")
}

/// Run the main menu until the user exits or input runs out.
///
/// # Errors
///
/// Returns [`ConsoleError`] if the terminal fails.
pub async fn run<G, C>(session: &mut Session<G, C>) -> Result<(), ConsoleError>
where
    G: Transactional,
    C: Console,
{
    loop {
        session.say("MAIN MENU")?;
        session.say("---------")?;
        session.say("1. Create user")?;
        session.say("2. Log in")?;
        session.say("9. < EXIT")?;
        let Some(choice) = read_choice(&mut session.console)? else {
            return Ok(());
        };
        match choice {
            1 => {
                let outcome = users::create_user(session).await.map(|_| ());
                settle(&mut session.console, outcome)?;
            }
            2 => match users::log_in(session).await {
                Ok(Some(user_type)) => role_menu(session, user_type).await?,
                Ok(None) => {}
                Err(error) => settle(&mut session.console, Err(error))?,
            },
            9 => return Ok(()),
            _ => session.say("Unrecognized choice!")?,
        }
    }
}

async fn role_menu<G, C>(session: &mut Session<G, C>, user_type: UserType) -> Result<(), ConsoleError>
where
    G: Transactional,
    C: Console,
{
    let menu = Menu::for_role(user_type);
    loop {
        menu.show(&mut session.console)?;
        let Some(choice) = read_choice(&mut session.console)? else {
            return Ok(());
        };
        if choice == LOG_OUT {
            tracing::info!(user_type = %user_type, "Logged out");
            return Ok(());
        }
        match menu.action(choice) {
            Some(action) => {
                let outcome = perform(session, action).await;
                settle(&mut session.console, outcome)?;
            }
            None => session.say("Unrecognized choice!")?,
        }
    }
}

async fn perform<G, C>(session: &mut Session<G, C>, action: Action) -> Outcome
where
    G: Transactional,
    C: Console,
{
    tracing::debug!(?action, "Running workflow");
    match action {
        Action::ViewFlights => reports::view_flights(session).await,
        Action::WeeklySchedule => reports::weekly_schedule(session).await,
        Action::FlightSeats => reports::flight_seats(session).await,
        Action::FlightStatus => reports::flight_status(session).await,
        Action::FlightsOfTheDay => reports::flights_of_the_day(session).await,
        Action::PassengerList => reports::passenger_list(session).await,
        Action::PassengerInfo => reports::passenger_info(session).await,
        Action::PlaneInfo => reports::plane_info(session).await,
        Action::TechnicianRepairs => reports::technician_repairs(session).await,
        Action::PlaneRepairs => reports::plane_repairs_in_range(session).await,
        Action::FlightStatistics => reports::flight_statistics(session).await,
        Action::SearchFlights => customer::search_flights(session).await,
        Action::TicketCost => customer::ticket_cost(session).await,
        Action::NumberOfStops => customer::number_of_stops(session).await,
        Action::OnTimeRecord => customer::on_time_record(session).await,
        Action::MakeReservation => reservations::make_reservation(session).await,
        Action::CancelReservation => reservations::cancel_reservation(session).await,
        Action::MaintenanceRequest => maintenance::make_maintenance_request(session).await,
        Action::PilotRequests => maintenance::pilot_requests(session).await,
        Action::LogRepair => maintenance::log_repair(session).await,
    }
}

/// Report a failed workflow and carry on. Terminal failures are passed up.
fn settle<C: Console>(console: &mut C, outcome: Outcome) -> Result<(), ConsoleError> {
    match outcome {
        Ok(()) => Ok(()),
        Err(WorkflowError::Store(error)) => {
            tracing::error!(error = %error, "Workflow failed");
            console.write_line(&error.to_string())
        }
        Err(WorkflowError::Console(error)) => Err(error),
    }
}
