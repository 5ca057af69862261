use crate::domain::model::{Fare, Passenger, PassengerCategory, Route};
use serde::Serialize;

/// Head count per fare category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassengerCounts {
    pub total: usize,
    pub general: usize,
    pub loyalty_members: usize,
    pub airline_employees: usize,
    pub discounted: usize,
}

impl PassengerCounts {
    pub fn record(&mut self, category: PassengerCategory) {
        self.total += 1;
        match category {
            PassengerCategory::General => self.general += 1,
            PassengerCategory::LoyaltyMember => self.loyalty_members += 1,
            PassengerCategory::AirlineEmployee => self.airline_employees += 1,
            PassengerCategory::Discounted => self.discounted += 1,
        }
    }

    pub fn get(&self, category: PassengerCategory) -> usize {
        match category {
            PassengerCategory::General => self.general,
            PassengerCategory::LoyaltyMember => self.loyalty_members,
            PassengerCategory::AirlineEmployee => self.airline_employees,
            PassengerCategory::Discounted => self.discounted,
        }
    }
}

/// Everything one pass over the roster produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlightTotals {
    pub seats_taken: usize,
    pub counts: PassengerCounts,
    pub total_expected_baggage: u32,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub loyalty_points_accrued: i64,
    pub loyalty_points_redeemed: i64,
}

impl FlightTotals {
    pub fn profit_surplus(&self) -> f64 {
        self.total_revenue - self.total_cost
    }
}

/// Walks the roster once and totals revenue, cost, baggage and loyalty points.
///
/// Read-only: redeeming members are counted in `loyalty_points_redeemed` but
/// their balances are left alone. Charging them is [`Flight::apply_redemptions`].
///
/// [`Flight::apply_redemptions`]: crate::domain::model::Flight::apply_redemptions
pub fn aggregate(route: &Route, passengers: &[Passenger]) -> FlightTotals {
    let mut totals = FlightTotals::default();

    for passenger in passengers {
        match &passenger.fare {
            Fare::General => {
                totals.total_revenue += route.base_price();
                totals.total_expected_baggage += 1;
            }
            Fare::LoyaltyMember(account) => {
                if account.is_using_points() {
                    totals.loyalty_points_redeemed = totals
                        .loyalty_points_redeemed
                        .saturating_add(route.redemption_cost());
                } else {
                    totals.loyalty_points_accrued = totals
                        .loyalty_points_accrued
                        .saturating_add(i64::from(route.loyalty_points_gained()));
                    totals.total_revenue += route.base_price();
                }
                totals.total_expected_baggage += 2;
            }
            Fare::AirlineEmployee => {
                totals.total_expected_baggage += 1;
            }
            Fare::Discounted => {
                totals.total_revenue += route.base_price() / 2.0;
            }
        }

        totals.total_cost += route.base_cost();
        totals.seats_taken += 1;
        totals.counts.record(passenger.category());
    }

    tracing::debug!(
        "Aggregated {} passengers: revenue {}, cost {}, baggage {}",
        totals.seats_taken,
        totals.total_revenue,
        totals.total_cost,
        totals.total_expected_baggage
    );

    totals
}
