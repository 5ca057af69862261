use crate::core::report::{FinancialOutcome, FlightReport};
use crate::core::rules::{RejectionReason, Verdict};
use crate::domain::ports::ReportRenderer;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const INDENTATION: &str = "    ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

pub fn renderer_for(format: ReportFormat) -> Box<dyn ReportRenderer> {
    match format {
        ReportFormat::Text => Box::new(TextRenderer),
        ReportFormat::Json => Box::new(JsonRenderer),
    }
}

/// Plain-text flight summary for the console.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

fn pass_fail(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}

fn describe(reason: &RejectionReason) -> String {
    match reason {
        RejectionReason::Overbooked {
            seats_taken,
            number_of_seats,
        } => format!(
            "{} passengers booked for {} seats",
            seats_taken, number_of_seats
        ),
        RejectionReason::BelowMinimumLoad {
            load_factor,
            minimum,
        } => format!(
            "load factor {:.1}% does not exceed the required {:.1}%",
            load_factor * 100.0,
            minimum * 100.0
        ),
        RejectionReason::Unprofitable { profit_surplus } => {
            format!(
                "flight loses {} with too few airline employees aboard",
                profit_surplus.abs()
            )
        }
    }
}

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &FlightReport) -> Result<String> {
        let mut out = String::new();
        self.write_report(&mut out, report)?;
        Ok(out)
    }
}

impl TextRenderer {
    fn write_report(&self, out: &mut String, report: &FlightReport) -> std::fmt::Result {
        let counts = &report.passengers;
        let financials = &report.financials;
        let checks = &report.checks;

        writeln!(out, "Flight summary for {}", report.route_title)?;
        writeln!(out)?;

        writeln!(out, "Total passengers: {}", counts.total)?;
        writeln!(out, "{}General sales: {}", INDENTATION, counts.general)?;
        writeln!(out, "{}Loyalty member sales: {}", INDENTATION, counts.loyalty_members)?;
        writeln!(out, "{}Airline employee comps: {}", INDENTATION, counts.airline_employees)?;
        writeln!(out, "{}Discounted sales: {}", INDENTATION, counts.discounted)?;
        writeln!(out)?;

        writeln!(out, "Total expected baggage: {}", report.total_expected_baggage)?;
        writeln!(out)?;

        writeln!(out, "Total revenue from flight: {}", financials.total_revenue)?;
        writeln!(out, "Total costs from flight: {}", financials.total_cost)?;
        match financials.outcome {
            FinancialOutcome::Profit => {
                writeln!(out, "Flight generating profit of: {}", financials.magnitude())?
            }
            FinancialOutcome::Loss => {
                writeln!(out, "Flight losing money of: {}", financials.magnitude())?
            }
        }
        writeln!(out)?;

        writeln!(out, "Total loyalty points given away: {}", report.loyalty.points_accrued)?;
        writeln!(out, "Total loyalty points redeemed: {}", report.loyalty.points_redeemed)?;
        writeln!(out)?;

        writeln!(
            out,
            "Seat capacity: {} ({} of {} seats on {})",
            pass_fail(checks.capacity.passed),
            checks.capacity.seats_taken,
            checks.capacity.number_of_seats,
            report.aircraft.name()
        )?;
        writeln!(
            out,
            "Minimum load: {} ({:.1}% against {:.1}% required)",
            pass_fail(checks.load_factor.passed),
            checks.load_factor.load_factor * 100.0,
            checks.load_factor.minimum * 100.0
        )?;
        writeln!(
            out,
            "Profitability: {}",
            pass_fail(checks.profitability.passed)
        )?;

        for note in &report.notes {
            writeln!(out, "{}", note)?;
        }

        if !checks.capacity.passed {
            if report.suggested_aircraft().is_empty() {
                writeln!(out, "No other aircraft in the fleet can carry this flight")?;
            } else {
                writeln!(out, "Other aircraft that can carry this flight:")?;
                for aircraft in report.suggested_aircraft() {
                    writeln!(out, "{}{}", INDENTATION, aircraft)?;
                }
            }
        }
        writeln!(out)?;

        match &report.verdict {
            Verdict::Proceed => write!(out, "THIS FLIGHT MAY PROCEED")?,
            Verdict::MayNotProceed { reasons } => {
                writeln!(out, "FLIGHT MAY NOT PROCEED")?;
                for reason in reasons {
                    writeln!(out, "{}- {}", INDENTATION, describe(reason))?;
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &FlightReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::FlightEvaluator;
    use crate::domain::model::{Aircraft, Fleet, Flight, Passenger, Route};
    use std::sync::Arc;

    fn madrid_to_prague_report(seats: u32) -> FlightReport {
        let route = Route::new("Madrid", "Prague", 80.0, 150.0, 10, 0.5).unwrap();
        let fleet = Fleet::new(vec![
            Aircraft::new(123, "Golden C3P-O", seats).unwrap(),
            Aircraft::new(124, "Stormtrooper FN-11", 12).unwrap(),
        ])
        .unwrap();
        let mut flight = Flight::new(Arc::new(route));
        flight.set_aircraft(fleet.get(123).unwrap()).unwrap();
        flight.add_passenger(Passenger::general("John", 32));
        flight.add_passenger(Passenger::general("Jen", 28));
        flight.add_passenger(Passenger::general("Tom", 47));
        flight.add_passenger(Passenger::loyalty_member("Mike", 26, 1500, true));
        flight.add_passenger(Passenger::loyalty_member("Pan", 56, 500, false));
        flight.add_passenger(Passenger::airline_employee("Natalie", 30));
        flight.add_passenger(Passenger::discounted("Chris", 38));

        FlightEvaluator::new(fleet).preview(&flight).unwrap()
    }

    #[test]
    fn test_text_report_for_departing_flight() {
        let text = TextRenderer.render(&madrid_to_prague_report(10)).unwrap();

        assert!(text.starts_with("Flight summary for Madrid to Prague\n\n"));
        assert!(text.contains("Total passengers: 7\n"));
        assert!(text.contains("    General sales: 3\n"));
        assert!(text.contains("    Loyalty member sales: 2\n"));
        assert!(text.contains("    Airline employee comps: 1\n"));
        assert!(text.contains("    Discounted sales: 1\n"));
        assert!(text.contains("Total expected baggage: 9\n"));
        assert!(text.contains("Total revenue from flight: 675\n"));
        assert!(text.contains("Total costs from flight: 560\n"));
        assert!(text.contains("Flight generating profit of: 115\n"));
        assert!(text.contains("Total loyalty points given away: 10\n"));
        assert!(text.contains("Total loyalty points redeemed: 150\n"));
        assert!(text.contains("Minimum load: PASS (70.0% against 50.0% required)"));
        assert!(text.ends_with("THIS FLIGHT MAY PROCEED"));
    }

    #[test]
    fn test_text_report_for_overbooked_flight() {
        let text = TextRenderer.render(&madrid_to_prague_report(6)).unwrap();

        assert!(text.contains("Seat capacity: FAIL (7 of 6 seats on Golden C3P-O)"));
        assert!(text.contains("    Stormtrooper FN-11 (id 124, 12 seats)"));
        assert!(text.contains("FLIGHT MAY NOT PROCEED\n"));
        assert!(text.contains("7 passengers booked for 6 seats"));
    }

    #[test]
    fn test_text_report_for_break_even_flight() {
        let route = Route::new("Madrid", "Prague", 100.0, 100.0, 10, 0.5).unwrap();
        let mut flight = Flight::new(Arc::new(route));
        flight
            .set_aircraft(Arc::new(Aircraft::new(123, "Golden C3P-O", 10).unwrap()))
            .unwrap();
        for i in 0..6 {
            flight.add_passenger(Passenger::general(format!("Guest{}", i), 30));
        }
        let report = FlightEvaluator::without_fleet().preview(&flight).unwrap();

        let text = TextRenderer.render(&report).unwrap();

        assert!(text.contains("flight loses 0 with too few airline employees aboard"));
        assert!(!text.contains("-0"));
    }

    #[test]
    fn test_json_report() {
        let json = JsonRenderer.render(&madrid_to_prague_report(10)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["route_title"], "Madrid to Prague");
        assert_eq!(value["passengers"]["total"], 7);
        assert_eq!(value["financials"]["profit_surplus"], 115.0);
        assert_eq!(value["financials"]["outcome"], "profit");
        assert_eq!(value["verdict"]["status"], "proceed");
        assert_eq!(value["checks"]["capacity"]["passed"], true);
    }

    #[test]
    fn test_json_report_lists_reasons() {
        let json = JsonRenderer.render(&madrid_to_prague_report(6)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["verdict"]["status"], "may_not_proceed");
        assert_eq!(value["verdict"]["reasons"][0]["reason"], "overbooked");
        assert_eq!(value["checks"]["capacity"]["suggested_aircraft"][0]["id"], 124);
    }
}
