use crate::app::render::ReportFormat;
use crate::config::manifest::PassengerRecord;
use crate::domain::model::{Aircraft, Fleet, Flight, Route};
use crate::utils::error::{FlightError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightConfig {
    pub route: RouteConfig,
    pub aircraft: AssignmentConfig,
    pub fleet: Vec<AircraftConfig>,
    pub passengers: Option<Vec<PassengerRecord>>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub origin: String,
    pub destination: String,
    pub base_cost: f64,
    pub base_price: f64,
    pub loyalty_points_gained: u32,
    pub minimum_take_off_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentConfig {
    /// Id of the fleet aircraft flying this route.
    pub assigned: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftConfig {
    pub id: u32,
    pub name: String,
    pub number_of_seats: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub format: Option<ReportFormat>,
}

impl Default for FlightConfig {
    /// London to Paris on the Antonov AN-2, with the four-aircraft demo fleet.
    fn default() -> Self {
        let fleet = [
            (123, "Antonov AN-2", 12),
            (124, "Vader DV-9", 10),
            (125, "HanSolo HS-3", 15),
            (126, "Leia LE-1", 13),
        ]
        .into_iter()
        .map(|(id, name, number_of_seats)| AircraftConfig {
            id,
            name: name.to_string(),
            number_of_seats,
        })
        .collect();

        Self {
            route: RouteConfig {
                origin: "London".to_string(),
                destination: "Paris".to_string(),
                base_cost: 50.0,
                base_price: 100.0,
                loyalty_points_gained: 5,
                minimum_take_off_percentage: 0.7,
            },
            aircraft: AssignmentConfig { assigned: 123 },
            fleet,
            passengers: None,
            report: None,
        }
    }
}

impl FlightConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| FlightError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left
    /// in place so the parse or validation error shows the placeholder.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FlightError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn build_route(&self) -> Result<Arc<Route>> {
        let route = &self.route;
        Route::new(
            route.origin.clone(),
            route.destination.clone(),
            route.base_cost,
            route.base_price,
            route.loyalty_points_gained,
            route.minimum_take_off_percentage,
        )
        .map(Arc::new)
    }

    pub fn build_fleet(&self) -> Result<Fleet> {
        let aircraft = self
            .fleet
            .iter()
            .map(|a| Aircraft::new(a.id, a.name.clone(), a.number_of_seats))
            .collect::<Result<Vec<_>>>()?;
        Fleet::new(aircraft)
    }

    /// Builds the configured flight with its aircraft assigned and any
    /// `[[passengers]]` already booked, plus the fleet it may draw on.
    pub fn build_flight(&self) -> Result<(Flight, Fleet)> {
        let route = self.build_route()?;
        let fleet = self.build_fleet()?;

        let mut flight = Flight::new(route);
        flight.set_aircraft(fleet.get(self.aircraft.assigned)?)?;

        for (position, record) in self.passengers.iter().flatten().enumerate() {
            flight.add_passenger(record.clone().into_passenger(position + 1)?);
        }

        tracing::debug!(
            "Built {} with {} fleet aircraft and {} configured passengers",
            flight.route().title(),
            fleet.len(),
            flight.passenger_count()
        );

        Ok((flight, fleet))
    }

    pub fn report_format(&self) -> Option<ReportFormat> {
        self.report.as_ref().and_then(|r| r.format)
    }

    pub fn validate_config(&self) -> Result<()> {
        self.build_route()?;
        let fleet = self.build_fleet()?;
        if fleet.is_empty() {
            return Err(FlightError::ConfigError {
                message: "At least one [[fleet]] aircraft is required".to_string(),
            });
        }
        fleet.get(self.aircraft.assigned)?;

        for (position, record) in self.passengers.iter().flatten().enumerate() {
            record.validate_at(position + 1)?;
        }

        Ok(())
    }
}

impl Validate for FlightConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
