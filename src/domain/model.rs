use crate::utils::error::{FlightError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative, validate_positive_number, validate_range,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Pricing and policy constants for an origin-destination pair.
///
/// Constructed through [`Route::new`], which rejects negative money values and
/// load factors outside `[0, 1]`. Immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    origin: String,
    destination: String,
    base_cost: f64,
    base_price: f64,
    loyalty_points_gained: u32,
    minimum_take_off_percentage: f64,
}

impl Route {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        base_cost: f64,
        base_price: f64,
        loyalty_points_gained: u32,
        minimum_take_off_percentage: f64,
    ) -> Result<Self> {
        let origin = origin.into();
        let destination = destination.into();

        validate_non_empty_string("route.origin", &origin)?;
        validate_non_empty_string("route.destination", &destination)?;
        validate_non_negative("route.base_cost", base_cost)?;
        validate_non_negative("route.base_price", base_price)?;
        if base_price.ceil() >= i64::MAX as f64 {
            return Err(FlightError::InvalidConfiguration {
                field: "route.base_price".to_string(),
                value: base_price.to_string(),
                reason: "Value is too large to be redeemed with loyalty points".to_string(),
            });
        }
        validate_range(
            "route.minimum_take_off_percentage",
            minimum_take_off_percentage,
            0.0,
            1.0,
        )?;

        Ok(Self {
            origin,
            destination,
            base_cost,
            base_price,
            loyalty_points_gained,
            minimum_take_off_percentage,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Cost of carrying one seated passenger.
    pub fn base_cost(&self) -> f64 {
        self.base_cost
    }

    /// Fare for a full-price seat.
    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Points credited to each loyalty member paying cash.
    pub fn loyalty_points_gained(&self) -> u32 {
        self.loyalty_points_gained
    }

    pub fn minimum_take_off_percentage(&self) -> f64 {
        self.minimum_take_off_percentage
    }

    /// Points a loyalty member spends for one seat: the base price rounded up.
    pub fn redemption_cost(&self) -> i64 {
        self.base_price.ceil() as i64
    }

    pub fn title(&self) -> String {
        format!("{} to {}", self.origin, self.destination)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aircraft {
    id: u32,
    name: String,
    number_of_seats: u32,
}

impl Aircraft {
    pub fn new(id: u32, name: impl Into<String>, number_of_seats: u32) -> Result<Self> {
        let name = name.into();
        validate_non_empty_string("aircraft.name", &name)?;
        validate_positive_number("aircraft.number_of_seats", number_of_seats, 1)?;

        Ok(Self {
            id,
            name,
            number_of_seats,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number_of_seats(&self) -> u32 {
        self.number_of_seats
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (id {}, {} seats)",
            self.name, self.id, self.number_of_seats
        )
    }
}

/// Ordered set of aircraft available to an airline, unique by id.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    aircraft: Vec<Arc<Aircraft>>,
}

impl Fleet {
    pub fn new(aircraft: Vec<Aircraft>) -> Result<Self> {
        let mut fleet = Self::default();
        for plane in aircraft {
            fleet.add(plane)?;
        }
        Ok(fleet)
    }

    pub fn add(&mut self, aircraft: Aircraft) -> Result<Arc<Aircraft>> {
        if self.find(aircraft.id()).is_some() {
            return Err(FlightError::InvalidConfiguration {
                field: "fleet.id".to_string(),
                value: aircraft.id().to_string(),
                reason: "Aircraft ids must be unique within a fleet".to_string(),
            });
        }
        let aircraft = Arc::new(aircraft);
        self.aircraft.push(Arc::clone(&aircraft));
        Ok(aircraft)
    }

    pub fn find(&self, id: u32) -> Option<&Arc<Aircraft>> {
        self.aircraft.iter().find(|a| a.id() == id)
    }

    pub fn get(&self, id: u32) -> Result<Arc<Aircraft>> {
        self.find(id)
            .cloned()
            .ok_or(FlightError::UnknownAircraft { id })
    }

    pub fn aircraft(&self) -> &[Arc<Aircraft>] {
        &self.aircraft
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }
}

/// Closed set of fare categories. Raw input is mapped through [`FromStr`],
/// which rejects anything outside the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassengerCategory {
    General,
    LoyaltyMember,
    AirlineEmployee,
    Discounted,
}

impl PassengerCategory {
    pub fn default_allowed_bags(self) -> u32 {
        match self {
            PassengerCategory::General => 1,
            PassengerCategory::LoyaltyMember => 2,
            PassengerCategory::AirlineEmployee => 1,
            PassengerCategory::Discounted => 0,
        }
    }
}

impl FromStr for PassengerCategory {
    type Err = FlightError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "general" => Ok(PassengerCategory::General),
            "loyalty" | "loyalty_member" | "loyaltymember" => Ok(PassengerCategory::LoyaltyMember),
            "airline" | "employee" | "airline_employee" | "airlineemployee" => {
                Ok(PassengerCategory::AirlineEmployee)
            }
            "discounted" => Ok(PassengerCategory::Discounted),
            _ => Err(FlightError::UnrecognizedCategory {
                index: None,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PassengerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PassengerCategory::General => "general",
            PassengerCategory::LoyaltyMember => "loyalty member",
            PassengerCategory::AirlineEmployee => "airline employee",
            PassengerCategory::Discounted => "discounted",
        };
        f.write_str(label)
    }
}

/// Point balance of a loyalty member.
///
/// `redeemed` records whether this booking has already been paid with points,
/// so the balance is charged at most once however often the flight is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyAccount {
    points: i64,
    using_points: bool,
    redeemed: bool,
}

impl LoyaltyAccount {
    pub fn new(points: i64, using_points: bool) -> Self {
        Self {
            points,
            using_points,
            redeemed: false,
        }
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn is_using_points(&self) -> bool {
        self.using_points
    }

    pub fn is_redeemed(&self) -> bool {
        self.redeemed
    }

    /// Deducts `cost` points once. Returns `false` when the member pays cash or
    /// the seat was already paid for.
    pub fn redeem(&mut self, cost: i64) -> bool {
        if !self.using_points || self.redeemed {
            return false;
        }
        self.points = self.points.saturating_sub(cost);
        self.redeemed = true;
        true
    }
}

/// How a passenger pays for their seat. Loyalty state exists only on the
/// loyalty variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fare {
    General,
    LoyaltyMember(LoyaltyAccount),
    AirlineEmployee,
    Discounted,
}

impl Fare {
    pub fn category(&self) -> PassengerCategory {
        match self {
            Fare::General => PassengerCategory::General,
            Fare::LoyaltyMember(_) => PassengerCategory::LoyaltyMember,
            Fare::AirlineEmployee => PassengerCategory::AirlineEmployee,
            Fare::Discounted => PassengerCategory::Discounted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    pub name: String,
    pub age: u32,
    pub fare: Fare,
    pub allowed_bags: u32,
}

impl Passenger {
    pub fn new(name: impl Into<String>, age: u32, fare: Fare) -> Self {
        let allowed_bags = fare.category().default_allowed_bags();
        Self {
            name: name.into(),
            age,
            fare,
            allowed_bags,
        }
    }

    pub fn general(name: impl Into<String>, age: u32) -> Self {
        Self::new(name, age, Fare::General)
    }

    pub fn loyalty_member(
        name: impl Into<String>,
        age: u32,
        loyalty_points: i64,
        using_loyalty_points: bool,
    ) -> Self {
        Self::new(
            name,
            age,
            Fare::LoyaltyMember(LoyaltyAccount::new(loyalty_points, using_loyalty_points)),
        )
    }

    pub fn airline_employee(name: impl Into<String>, age: u32) -> Self {
        Self::new(name, age, Fare::AirlineEmployee)
    }

    pub fn discounted(name: impl Into<String>, age: u32) -> Self {
        Self::new(name, age, Fare::Discounted)
    }

    pub fn with_allowed_bags(mut self, allowed_bags: u32) -> Self {
        self.allowed_bags = allowed_bags;
        self
    }

    /// Builds a passenger from loosely typed intake fields.
    ///
    /// Loyalty fields are ignored for every category except
    /// [`PassengerCategory::LoyaltyMember`], where a negative balance is rejected.
    pub fn from_parts(
        category: PassengerCategory,
        name: impl Into<String>,
        age: u32,
        loyalty_points: Option<i64>,
        using_loyalty_points: Option<bool>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FlightError::InvalidPassenger {
                index: None,
                reason: "name cannot be empty".to_string(),
            });
        }

        let fare = match category {
            PassengerCategory::General => Fare::General,
            PassengerCategory::LoyaltyMember => {
                let points = loyalty_points.unwrap_or(0);
                if points < 0 {
                    return Err(FlightError::InvalidPassenger {
                        index: None,
                        reason: format!("{} has a negative loyalty balance ({})", name, points),
                    });
                }
                Fare::LoyaltyMember(LoyaltyAccount::new(
                    points,
                    using_loyalty_points.unwrap_or(false),
                ))
            }
            PassengerCategory::AirlineEmployee => Fare::AirlineEmployee,
            PassengerCategory::Discounted => Fare::Discounted,
        };

        Ok(Self::new(name, age, fare))
    }

    pub fn category(&self) -> PassengerCategory {
        self.fare.category()
    }

    pub fn loyalty_account(&self) -> Option<&LoyaltyAccount> {
        match &self.fare {
            Fare::LoyaltyMember(account) => Some(account),
            _ => None,
        }
    }

    /// Current point balance; `None` for non-members.
    pub fn loyalty_points(&self) -> Option<i64> {
        self.loyalty_account().map(LoyaltyAccount::points)
    }

    pub fn is_using_loyalty_points(&self) -> bool {
        self.loyalty_account()
            .is_some_and(LoyaltyAccount::is_using_points)
    }
}

/// A single scheduled flight: a route, at most one assigned aircraft and an
/// append-only roster kept in booking order.
///
/// There is no capacity check on [`Flight::add_passenger`]; overbooking is
/// reported when the flight is evaluated.
#[derive(Debug, Clone)]
pub struct Flight {
    route: Arc<Route>,
    aircraft: Option<Arc<Aircraft>>,
    passengers: Vec<Passenger>,
}

impl Flight {
    pub fn new(route: Arc<Route>) -> Self {
        Self {
            route,
            aircraft: None,
            passengers: Vec::new(),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn aircraft(&self) -> Option<&Arc<Aircraft>> {
        self.aircraft.as_ref()
    }

    /// Assigns the airframe. Re-assigning the same aircraft is a no-op; a
    /// different one is rejected.
    pub fn set_aircraft(&mut self, aircraft: Arc<Aircraft>) -> Result<()> {
        match &self.aircraft {
            Some(current) if current.id() == aircraft.id() => Ok(()),
            Some(current) => Err(FlightError::AircraftAlreadyAssigned {
                route: self.route.title(),
                assigned_id: current.id(),
            }),
            None => {
                tracing::debug!("Assigned {} to {}", aircraft, self.route.title());
                self.aircraft = Some(aircraft);
                Ok(())
            }
        }
    }

    pub fn require_aircraft(&self) -> Result<&Arc<Aircraft>> {
        self.aircraft
            .as_ref()
            .ok_or_else(|| FlightError::MissingAircraft {
                route: self.route.title(),
            })
    }

    pub fn add_passenger(&mut self, passenger: Passenger) {
        tracing::debug!(
            "Booked {} ({}) on {}",
            passenger.name,
            passenger.category(),
            self.route.title()
        );
        self.passengers.push(passenger);
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    pub fn count_category(&self, category: PassengerCategory) -> usize {
        self.passengers
            .iter()
            .filter(|p| p.category() == category)
            .count()
    }

    /// Charges every redeeming loyalty member that has not paid yet.
    /// Returns how many balances changed.
    pub fn apply_redemptions(&mut self) -> usize {
        let cost = self.route.redemption_cost();
        let mut charged = 0;
        for passenger in &mut self.passengers {
            if let Fare::LoyaltyMember(account) = &mut passenger.fare {
                if account.redeem(cost) {
                    if account.points() < 0 {
                        tracing::warn!(
                            "{} redeemed {} points and is now at {}",
                            passenger.name,
                            cost,
                            account.points()
                        );
                    }
                    charged += 1;
                }
            }
        }
        charged
    }
}
