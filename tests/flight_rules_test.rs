use flight_booking::core::rules::{
    check_capacity, check_load_factor, check_profitability, RejectionReason, Verdict,
};
use flight_booking::{evaluate, Aircraft, Fleet, Flight, NoFleet, Passenger, Route};
use std::sync::Arc;

fn madrid_to_prague(minimum: f64) -> Arc<Route> {
    Arc::new(Route::new("Madrid", "Prague", 80.0, 150.0, 10, minimum).unwrap())
}

fn small_fleet(first_seats: u32, second_seats: u32) -> Fleet {
    Fleet::new(vec![
        Aircraft::new(123, "Golden C3P-O", first_seats).unwrap(),
        Aircraft::new(124, "Stormtrooper FN-11", second_seats).unwrap(),
    ])
    .unwrap()
}

fn flight_on(route: Arc<Route>, aircraft: Arc<Aircraft>, roster: Vec<Passenger>) -> Flight {
    let mut flight = Flight::new(route);
    flight.set_aircraft(aircraft).unwrap();
    for passenger in roster {
        flight.add_passenger(passenger);
    }
    flight
}

#[test]
fn seats_available() {
    let fleet = small_fleet(3, 5);
    let mut flight = flight_on(
        madrid_to_prague(0.5),
        fleet.get(123).unwrap(),
        vec![
            Passenger::general("George", 23),
            Passenger::loyalty_member("Luke", 33, 1500, true),
        ],
    );

    let report = evaluate(&mut flight, &fleet).unwrap();

    assert!(report.checks.capacity.passed);
    assert!(report.suggested_aircraft().is_empty());
}

#[test]
fn plane_is_full_and_larger_aircraft_is_suggested() {
    let fleet = small_fleet(3, 5);
    let mut flight = flight_on(
        madrid_to_prague(0.5),
        fleet.get(123).unwrap(),
        vec![
            Passenger::general("George", 23),
            Passenger::general("Steph", 25),
            Passenger::general("Alex", 50),
            Passenger::loyalty_member("Luke", 33, 1500, true),
        ],
    );

    let report = evaluate(&mut flight, &fleet).unwrap();

    assert!(!report.checks.capacity.passed);
    let suggested: Vec<u32> = report.suggested_aircraft().iter().map(Aircraft::id).collect();
    assert_eq!(suggested, vec![124]);
    match &report.verdict {
        Verdict::MayNotProceed { reasons } => {
            assert!(reasons.iter().any(|r| matches!(
                r,
                RejectionReason::Overbooked {
                    seats_taken: 4,
                    number_of_seats: 3
                }
            )));
        }
        Verdict::Proceed => panic!("overbooked flight must not proceed"),
    }
}

#[test]
fn capacity_boundary() {
    let aircraft = Aircraft::new(123, "Golden C3P-O", 3).unwrap();
    assert!(check_capacity(2, &aircraft, &NoFleet).passed);
    assert!(!check_capacity(3, &aircraft, &NoFleet).passed);
}

#[test]
fn minimum_percentage_exceeded() {
    let fleet = small_fleet(6, 8);
    let route = madrid_to_prague(0.5);
    let aircraft = fleet.get(123).unwrap();

    assert!(check_load_factor(4, &aircraft, &route).passed);
    assert!(!check_load_factor(2, &aircraft, &route).passed);
}

#[test]
fn minimum_percentage_met_exactly_is_not_enough() {
    let fleet = small_fleet(6, 8);
    let mut flight = flight_on(
        madrid_to_prague(0.5),
        fleet.get(123).unwrap(),
        vec![
            Passenger::general("George", 23),
            Passenger::general("Steph", 25),
            Passenger::general("Alex", 50),
        ],
    );

    let report = evaluate(&mut flight, &fleet).unwrap();

    assert_eq!(report.checks.load_factor.load_factor, 0.5);
    assert!(!report.checks.load_factor.passed);
    assert!(!report.may_proceed());
}

#[test]
fn profit_surplus_is_positive() {
    let aircraft = Aircraft::new(124, "Vader Darth-87", 10).unwrap();
    let check = check_profitability(115.0, 1, &aircraft, &madrid_to_prague(0.3));

    assert!(check.passed);
    assert!(!check.employee_override);
}

#[test]
fn profit_surplus_is_negative_but_airline_employees_exceed_minimum_percentage() {
    let aircraft = Arc::new(Aircraft::new(124, "Vader Darth-87", 10).unwrap());
    let mut flight = flight_on(
        madrid_to_prague(0.3),
        aircraft,
        vec![
            Passenger::airline_employee("John", 32),
            Passenger::airline_employee("Jen", 28),
            Passenger::airline_employee("Tom", 47),
            Passenger::loyalty_member("Mike", 26, 1500, true),
            Passenger::loyalty_member("Pan", 56, 500, false),
            Passenger::airline_employee("Natalie", 30),
            Passenger::discounted("Chris", 38),
        ],
    );

    let report = evaluate(&mut flight, &NoFleet).unwrap();

    assert_eq!(report.financials.profit_surplus, -335.0);
    assert!(report.checks.profitability.passed);
    assert!(report.checks.profitability.employee_override);
    assert_eq!(report.notes.len(), 1);
    assert!(report.may_proceed());
}

#[test]
fn profit_surplus_is_negative_and_airline_employees_do_not_exceed_minimum_percentage() {
    let aircraft = Arc::new(Aircraft::new(124, "Vader Darth-87", 10).unwrap());
    let mut flight = flight_on(
        madrid_to_prague(0.3),
        aircraft,
        vec![
            Passenger::general("John", 32),
            Passenger::discounted("Jen", 28),
            Passenger::loyalty_member("Mike", 26, 1500, true),
            Passenger::airline_employee("Natalie", 30),
            Passenger::discounted("Chris", 38),
        ],
    );

    let report = evaluate(&mut flight, &NoFleet).unwrap();

    assert_eq!(report.financials.profit_surplus, -100.0);
    assert!(!report.checks.profitability.passed);
    assert!(report.notes.is_empty());
    match report.verdict {
        Verdict::MayNotProceed { reasons } => {
            assert_eq!(
                reasons,
                vec![RejectionReason::Unprofitable {
                    profit_surplus: -100.0
                }]
            );
        }
        Verdict::Proceed => panic!("unprofitable flight must not proceed"),
    }
}
