pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::render::{renderer_for, JsonRenderer, ReportFormat, TextRenderer};
pub use crate::app::session::Session;
pub use crate::config::{load_manifest, read_manifest, FlightConfig};
pub use crate::core::engine::{evaluate, FlightEvaluator};
pub use crate::core::report::FlightReport;
pub use crate::domain::model::{
    Aircraft, Fare, Fleet, Flight, Passenger, PassengerCategory, Route,
};
pub use crate::domain::ports::{FleetProvider, NoFleet, ReportRenderer};
pub use crate::utils::error::{FlightError, Result};
