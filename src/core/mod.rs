pub mod aggregate;
pub mod engine;
pub mod report;
pub mod rules;

pub use crate::domain::model::{Aircraft, Fare, Flight, Passenger, PassengerCategory, Route};
pub use crate::domain::ports::{FleetProvider, NoFleet, ReportRenderer};
pub use crate::utils::error::Result;
