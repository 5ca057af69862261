use crate::core::aggregate::{FlightTotals, PassengerCounts};
use crate::core::rules::{DepartureChecks, Verdict};
use crate::domain::model::{Aircraft, Route};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialOutcome {
    Profit,
    Loss,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Financials {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub profit_surplus: f64,
    pub outcome: FinancialOutcome,
}

impl Financials {
    fn from_totals(totals: &FlightTotals) -> Self {
        let profit_surplus = totals.profit_surplus();
        let outcome = if profit_surplus > 0.0 {
            FinancialOutcome::Profit
        } else {
            FinancialOutcome::Loss
        };
        Self {
            total_revenue: totals.total_revenue,
            total_cost: totals.total_cost,
            profit_surplus,
            outcome,
        }
    }

    /// Size of the profit or loss, without its sign.
    pub fn magnitude(&self) -> f64 {
        self.profit_surplus.abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoyaltySummary {
    pub points_accrued: i64,
    pub points_redeemed: i64,
}

/// Structured outcome of evaluating a flight. Renderers in
/// [`crate::app::render`] turn it into text or JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightReport {
    pub route_title: String,
    pub aircraft: Aircraft,
    pub evaluated_at: DateTime<Utc>,
    pub passengers: PassengerCounts,
    pub total_expected_baggage: u32,
    pub financials: Financials,
    pub loyalty: LoyaltySummary,
    pub checks: DepartureChecks,
    pub notes: Vec<String>,
    pub verdict: Verdict,
}

impl FlightReport {
    pub fn build(
        route: &Route,
        aircraft: &Aircraft,
        totals: &FlightTotals,
        checks: DepartureChecks,
    ) -> Self {
        let notes = checks
            .profitability
            .note()
            .map(str::to_string)
            .into_iter()
            .collect();
        let verdict = checks.verdict();

        Self {
            route_title: route.title(),
            aircraft: aircraft.clone(),
            evaluated_at: Utc::now(),
            passengers: totals.counts,
            total_expected_baggage: totals.total_expected_baggage,
            financials: Financials::from_totals(totals),
            loyalty: LoyaltySummary {
                points_accrued: totals.loyalty_points_accrued,
                points_redeemed: totals.loyalty_points_redeemed,
            },
            checks,
            notes,
            verdict,
        }
    }

    pub fn seats_taken(&self) -> usize {
        self.passengers.total
    }

    pub fn suggested_aircraft(&self) -> &[Aircraft] {
        &self.checks.capacity.suggested_aircraft
    }

    pub fn may_proceed(&self) -> bool {
        self.verdict.may_proceed()
    }
}
