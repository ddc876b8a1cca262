//! Schema and seed data for integration tests.
//!
//! The console does not own the schema; these statements recreate the tables it
//! reads and writes so integration tests can run against a throwaway Postgres.

/// `CREATE TABLE` statements, parents before children.
pub const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE Plane (
        PlaneID CHAR(10) PRIMARY KEY,
        Make VARCHAR(50) NOT NULL,
        Model VARCHAR(50) NOT NULL,
        Year INTEGER NOT NULL,
        LastRepairDate DATE
    )
    ",
    r"
    CREATE TABLE Flight (
        FlightNumber CHAR(8) PRIMARY KEY,
        PlaneID CHAR(10) NOT NULL REFERENCES Plane(PlaneID),
        DepartureCity VARCHAR(50) NOT NULL,
        ArrivalCity VARCHAR(50) NOT NULL
    )
    ",
    r"
    CREATE TABLE Schedule (
        ScheduleID INTEGER PRIMARY KEY,
        FlightNumber CHAR(8) NOT NULL REFERENCES Flight(FlightNumber),
        DayOfWeek VARCHAR(10) NOT NULL,
        DepartureTime TIME NOT NULL,
        ArrivalTime TIME NOT NULL
    )
    ",
    r"
    CREATE TABLE FlightInstance (
        FlightInstanceID INTEGER PRIMARY KEY,
        FlightNumber CHAR(8) NOT NULL REFERENCES Flight(FlightNumber),
        FlightDate DATE NOT NULL,
        DepartedOnTime BOOLEAN NOT NULL,
        ArrivedOnTime BOOLEAN NOT NULL,
        SeatsTotal INTEGER NOT NULL,
        SeatsSold INTEGER NOT NULL,
        NumOfStops INTEGER NOT NULL,
        TicketCost INTEGER NOT NULL
    )
    ",
    r"
    CREATE TABLE Customer (
        CustomerID INTEGER PRIMARY KEY,
        FirstName VARCHAR(50) NOT NULL,
        LastName VARCHAR(50) NOT NULL,
        Gender CHAR(1),
        DOB DATE,
        Address VARCHAR(100),
        Phone VARCHAR(20),
        Zip VARCHAR(10)
    )
    ",
    r"
    CREATE TABLE Reservation (
        ReservationID CHAR(10) PRIMARY KEY,
        CustomerID INTEGER NOT NULL REFERENCES Customer(CustomerID),
        FlightInstanceID INTEGER NOT NULL REFERENCES FlightInstance(FlightInstanceID),
        Status VARCHAR(10) NOT NULL
    )
    ",
    r"
    CREATE TABLE Technician (
        TechnicianID CHAR(10) PRIMARY KEY,
        Name VARCHAR(50) NOT NULL
    )
    ",
    r"
    CREATE TABLE Pilot (
        PilotID CHAR(10) PRIMARY KEY,
        Name VARCHAR(50) NOT NULL
    )
    ",
    r"
    CREATE TABLE Repair (
        RepairID INTEGER PRIMARY KEY,
        PlaneID CHAR(10) NOT NULL REFERENCES Plane(PlaneID),
        RepairCode CHAR(10) NOT NULL,
        RepairDate DATE NOT NULL,
        TechnicianID CHAR(10) NOT NULL REFERENCES Technician(TechnicianID)
    )
    ",
    r"
    CREATE TABLE MaintenanceRequest (
        RequestID INTEGER PRIMARY KEY,
        PlaneID CHAR(10) NOT NULL REFERENCES Plane(PlaneID),
        RepairCode CHAR(10) NOT NULL,
        RequestDate DATE NOT NULL,
        PilotID CHAR(10) NOT NULL REFERENCES Pilot(PilotID)
    )
    ",
    r"
    CREATE TABLE Users (
        UserID INTEGER PRIMARY KEY,
        Username VARCHAR(50) NOT NULL UNIQUE,
        Password VARCHAR(50) NOT NULL,
        UserType INTEGER NOT NULL
    )
    ",
];

/// Seed rows.
///
/// Instance 1 (`F100` on 3/10/23) has exactly one open seat; instance 2 (`F100`
/// on 3/13/23) is full.
pub const SEED: &[&str] = &[
    r"
    INSERT INTO Plane VALUES
        ('PL001', 'Boeing', '737', 2010, '2023-01-15'),
        ('PL002', 'Airbus', 'A320', 2015, '2022-11-02')
    ",
    r"
    INSERT INTO Flight VALUES
        ('F100', 'PL001', 'Los Angeles', 'New York'),
        ('F200', 'PL002', 'New York', 'Chicago')
    ",
    r"
    INSERT INTO Schedule VALUES
        (1, 'F100', 'Friday', '08:00', '16:30'),
        (2, 'F100', 'Monday', '08:00', '16:30'),
        (3, 'F200', 'Friday', '10:00', '12:15')
    ",
    r"
    INSERT INTO FlightInstance VALUES
        (1, 'F100', '2023-03-10', TRUE, TRUE, 150, 149, 0, 350),
        (2, 'F100', '2023-03-13', FALSE, TRUE, 150, 150, 1, 300),
        (3, 'F200', '2023-03-10', TRUE, FALSE, 100, 20, 0, 120),
        (4, 'F100', '2023-03-17', TRUE, TRUE, 150, 10, 0, 350)
    ",
    r"
    INSERT INTO Customer VALUES
        (1, 'Ada', 'Lovelace', 'F', '1990-12-10', '1 Main St', '555-0100', '92521'),
        (2, 'Alan', 'Turing', 'M', '1985-06-23', '2 Elm St', '555-0101', '92507')
    ",
    r"
    INSERT INTO Reservation VALUES
        ('R0001', 1, 1, 'reserved'),
        ('R0002', 2, 2, 'waitlist'),
        ('R0047', 2, 1, 'flown')
    ",
    r"
    INSERT INTO Technician VALUES
        ('T001', 'Grace Hopper'),
        ('T002', 'Linus Pauling')
    ",
    r"
    INSERT INTO Pilot VALUES
        ('P001', 'Amelia Earhart')
    ",
    r"
    INSERT INTO Repair VALUES
        (1, 'PL001', 'RC01', '2023-01-15', 'T001'),
        (2, 'PL001', 'RC07', '2023-02-20', 'T002'),
        (3, 'PL002', 'RC03', '2022-11-02', 'T001')
    ",
    r"
    INSERT INTO MaintenanceRequest VALUES
        (1, 'PL001', 'RC07', '2023-02-18', 'P001')
    ",
    r"
    INSERT INTO Users VALUES
        (1, 'manager', 'secret', 1),
        (2, 'ada', 'pw', 2),
        (3, 'amelia', 'pw', 3),
        (4, 'grace', 'pw', 4)
    ",
];

/// Every fixture statement in execution order.
pub fn all() -> impl Iterator<Item = &'static str> {
    SCHEMA.iter().chain(SEED.iter()).copied()
}
