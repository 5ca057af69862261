use crate::core::aggregate::aggregate;
use crate::core::report::FlightReport;
use crate::core::rules::run_checks;
use crate::domain::model::Flight;
use crate::domain::ports::{FleetProvider, NoFleet};
use crate::utils::error::Result;

/// Evaluates flights against a fleet of alternate aircraft.
pub struct FlightEvaluator<F: FleetProvider = NoFleet> {
    fleet: F,
}

impl FlightEvaluator<NoFleet> {
    pub fn without_fleet() -> Self {
        Self { fleet: NoFleet }
    }
}

impl<F: FleetProvider> FlightEvaluator<F> {
    pub fn new(fleet: F) -> Self {
        Self { fleet }
    }

    pub fn fleet(&self) -> &F {
        &self.fleet
    }

    /// Evaluates the flight and then charges redeeming loyalty members.
    ///
    /// Points are deducted on the first evaluation only. Later evaluations
    /// report the same redeemed total without charging the members again.
    ///
    /// Fails with `MissingAircraft` before any passenger is touched.
    pub fn evaluate(&self, flight: &mut Flight) -> Result<FlightReport> {
        let report = self.preview(flight)?;

        let charged = flight.apply_redemptions();
        if charged > 0 {
            tracing::debug!(
                "Charged {} loyalty members {} points each",
                charged,
                flight.route().redemption_cost()
            );
        }

        Ok(report)
    }

    /// Same report as [`FlightEvaluator::evaluate`] without changing any
    /// passenger.
    pub fn preview(&self, flight: &Flight) -> Result<FlightReport> {
        let aircraft = flight.require_aircraft()?;
        let route = flight.route();

        tracing::debug!(
            "Evaluating {} on {} with {} passengers",
            route.title(),
            aircraft,
            flight.passenger_count()
        );

        let totals = aggregate(route, flight.passengers());
        let checks = run_checks(&totals, aircraft, route, &self.fleet);
        let report = FlightReport::build(route, aircraft, &totals, checks);

        if report.may_proceed() {
            tracing::info!("✅ {} may proceed", report.route_title);
        } else {
            tracing::info!("❌ {} may not proceed: {:?}", report.route_title, report.verdict);
        }

        Ok(report)
    }
}

/// One-off evaluation against a fleet.
pub fn evaluate<F: FleetProvider + ?Sized>(flight: &mut Flight, fleet: &F) -> Result<FlightReport> {
    FlightEvaluator::new(fleet).evaluate(flight)
}
