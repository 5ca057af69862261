use crate::core::report::FlightReport;
use crate::domain::model::{Aircraft, Fleet};
use crate::utils::error::Result;
use std::sync::Arc;

/// Supplies the aircraft an evaluation may suggest when a flight is overbooked.
pub trait FleetProvider {
    fn available_aircraft(&self) -> &[Arc<Aircraft>];
}

impl FleetProvider for [Arc<Aircraft>] {
    fn available_aircraft(&self) -> &[Arc<Aircraft>] {
        self
    }
}

impl FleetProvider for Vec<Arc<Aircraft>> {
    fn available_aircraft(&self) -> &[Arc<Aircraft>] {
        self
    }
}

impl FleetProvider for Fleet {
    fn available_aircraft(&self) -> &[Arc<Aircraft>] {
        self.aircraft()
    }
}

impl<T: FleetProvider + ?Sized> FleetProvider for &T {
    fn available_aircraft(&self) -> &[Arc<Aircraft>] {
        (**self).available_aircraft()
    }
}

/// Used when the caller has no alternate aircraft to offer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFleet;

impl FleetProvider for NoFleet {
    fn available_aircraft(&self) -> &[Arc<Aircraft>] {
        &[]
    }
}

pub trait ReportRenderer {
    fn render(&self, report: &FlightReport) -> Result<String>;
}
