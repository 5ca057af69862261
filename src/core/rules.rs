//! Departure rules. Each check is a standalone function over the aggregated
//! totals; [`run_checks`] evaluates all three and [`DepartureChecks::verdict`]
//! combines them.

use crate::core::aggregate::FlightTotals;
use crate::domain::model::{Aircraft, Route};
use crate::domain::ports::FleetProvider;
use serde::Serialize;

pub const EMPLOYEE_OVERRIDE_NOTE: &str =
    "THE REVENUE IS LESS THAN THE COST OF FLIGHT BUT FLIGHT MAY PROCEED";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityCheck {
    pub passed: bool,
    pub seats_taken: usize,
    pub number_of_seats: u32,
    /// Fleet aircraft large enough for the roster. Only filled when the check fails.
    pub suggested_aircraft: Vec<Aircraft>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadFactorCheck {
    pub passed: bool,
    pub load_factor: f64,
    pub minimum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitabilityCheck {
    pub passed: bool,
    pub profit_surplus: f64,
    pub employee_ratio: f64,
    /// Set when the flight loses money but carries enough staff to fly anyway.
    pub employee_override: bool,
}

impl ProfitabilityCheck {
    pub fn note(&self) -> Option<&'static str> {
        self.employee_override.then_some(EMPLOYEE_OVERRIDE_NOTE)
    }
}

fn ratio(count: usize, number_of_seats: u32) -> f64 {
    count as f64 / f64::from(number_of_seats)
}

/// Passes while at least one seat is left. On failure, lists every fleet
/// aircraft with more seats than passengers booked, in fleet order.
pub fn check_capacity<F: FleetProvider + ?Sized>(
    seats_taken: usize,
    aircraft: &Aircraft,
    fleet: &F,
) -> CapacityCheck {
    let number_of_seats = aircraft.number_of_seats();
    let passed = seats_taken < number_of_seats as usize;

    let suggested_aircraft = if passed {
        Vec::new()
    } else {
        let suggestions: Vec<Aircraft> = fleet
            .available_aircraft()
            .iter()
            .filter(|candidate| candidate.number_of_seats() as usize > seats_taken)
            .map(|candidate| candidate.as_ref().clone())
            .collect();
        tracing::warn!(
            "{} is overbooked ({} passengers, {} seats); {} alternate aircraft available",
            aircraft.name(),
            seats_taken,
            number_of_seats,
            suggestions.len()
        );
        suggestions
    };

    CapacityCheck {
        passed,
        seats_taken,
        number_of_seats,
        suggested_aircraft,
    }
}

/// Passes when the load factor is strictly above the route minimum.
pub fn check_load_factor(
    seats_taken: usize,
    aircraft: &Aircraft,
    route: &Route,
) -> LoadFactorCheck {
    let load_factor = ratio(seats_taken, aircraft.number_of_seats());
    let minimum = route.minimum_take_off_percentage();
    let passed = load_factor > minimum;

    tracing::debug!(
        "Load factor {:.3} against minimum {:.3}: {}",
        load_factor,
        minimum,
        if passed { "pass" } else { "fail" }
    );

    LoadFactorCheck {
        passed,
        load_factor,
        minimum,
    }
}

/// Passes on a strictly positive surplus. A break-even or losing flight still
/// passes when airline employees alone fill more than the route minimum.
pub fn check_profitability(
    profit_surplus: f64,
    employee_count: usize,
    aircraft: &Aircraft,
    route: &Route,
) -> ProfitabilityCheck {
    let employee_ratio = ratio(employee_count, aircraft.number_of_seats());

    let (passed, employee_override) = if profit_surplus > 0.0 {
        (true, false)
    } else if employee_ratio > route.minimum_take_off_percentage() {
        tracing::info!(
            "Flight loses {} but {} airline employees are aboard; override applies",
            profit_surplus.abs(),
            employee_count
        );
        (true, true)
    } else {
        (false, false)
    };

    ProfitabilityCheck {
        passed,
        profit_surplus,
        employee_ratio,
        employee_override,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    Overbooked {
        seats_taken: usize,
        number_of_seats: u32,
    },
    BelowMinimumLoad {
        load_factor: f64,
        minimum: f64,
    },
    Unprofitable {
        profit_surplus: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Proceed,
    MayNotProceed { reasons: Vec<RejectionReason> },
}

impl Verdict {
    pub fn may_proceed(&self) -> bool {
        matches!(self, Verdict::Proceed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartureChecks {
    pub capacity: CapacityCheck,
    pub load_factor: LoadFactorCheck,
    pub profitability: ProfitabilityCheck,
}

impl DepartureChecks {
    pub fn verdict(&self) -> Verdict {
        let mut reasons = Vec::new();

        if !self.capacity.passed {
            reasons.push(RejectionReason::Overbooked {
                seats_taken: self.capacity.seats_taken,
                number_of_seats: self.capacity.number_of_seats,
            });
        }
        if !self.load_factor.passed {
            reasons.push(RejectionReason::BelowMinimumLoad {
                load_factor: self.load_factor.load_factor,
                minimum: self.load_factor.minimum,
            });
        }
        if !self.profitability.passed {
            reasons.push(RejectionReason::Unprofitable {
                profit_surplus: self.profitability.profit_surplus,
            });
        }

        if reasons.is_empty() {
            Verdict::Proceed
        } else {
            Verdict::MayNotProceed { reasons }
        }
    }
}

pub fn run_checks<F: FleetProvider + ?Sized>(
    totals: &FlightTotals,
    aircraft: &Aircraft,
    route: &Route,
    fleet: &F,
) -> DepartureChecks {
    DepartureChecks {
        capacity: check_capacity(totals.seats_taken, aircraft, fleet),
        load_factor: check_load_factor(totals.seats_taken, aircraft, route),
        profitability: check_profitability(
            totals.profit_surplus(),
            totals.counts.airline_employees,
            aircraft,
            route,
        ),
    }
}
