use crate::domain::model::{Passenger, PassengerCategory};
use crate::utils::error::{FlightError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// One booking as it arrives from a manifest row or a `[[passengers]]` table.
/// Loyalty fields are only read for loyalty members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerRecord {
    pub category: String,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub loyalty_points: Option<i64>,
    #[serde(default)]
    pub using_loyalty_points: Option<bool>,
    #[serde(default)]
    pub allowed_bags: Option<u32>,
}

impl PassengerRecord {
    /// `position` is the 1-based row number used in error messages.
    pub fn into_passenger(self, position: usize) -> Result<Passenger> {
        let category: PassengerCategory = self
            .category
            .parse()
            .map_err(|e: FlightError| e.at_passenger(position))?;

        let passenger = Passenger::from_parts(
            category,
            self.name,
            self.age,
            self.loyalty_points,
            self.using_loyalty_points,
        )
        .map_err(|e| e.at_passenger(position))?;

        Ok(match self.allowed_bags {
            Some(bags) => passenger.with_allowed_bags(bags),
            None => passenger,
        })
    }

    pub fn validate_at(&self, position: usize) -> Result<()> {
        self.clone().into_passenger(position).map(|_| ())
    }
}

/// Reads a CSV manifest with the header
/// `category,name,age,loyalty_points,using_loyalty_points,allowed_bags`.
/// The last three columns may be left empty.
pub fn read_manifest<R: Read>(reader: R) -> Result<Vec<Passenger>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut passengers = Vec::new();
    for (row, record) in csv_reader.deserialize::<PassengerRecord>().enumerate() {
        passengers.push(record?.into_passenger(row + 1)?);
    }

    tracing::debug!("Read {} passengers from manifest", passengers.len());
    Ok(passengers)
}

pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<Passenger>> {
    let file = std::fs::File::open(&path)?;
    tracing::info!("📋 Loading passenger manifest from {}", path.as_ref().display());
    read_manifest(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_manifest() {
        let data = "\
category,name,age,loyalty_points,using_loyalty_points,allowed_bags
general,John,32,,,
loyalty,Mike,26,1500,true,
loyalty,Pan,56,500,false,2
airline,Natalie,30,,,
discounted,Chris,38,,,
";
        let passengers = read_manifest(data.as_bytes()).unwrap();
        assert_eq!(passengers.len(), 5);
        assert_eq!(passengers[0].category(), PassengerCategory::General);
        assert_eq!(passengers[1].loyalty_points(), Some(1500));
        assert!(passengers[1].is_using_loyalty_points());
        assert!(!passengers[2].is_using_loyalty_points());
        assert_eq!(passengers[3].category(), PassengerCategory::AirlineEmployee);
        assert_eq!(passengers[4].allowed_bags, 0);
    }

    #[test]
    fn test_allowed_bags_override() {
        let data = "\
category,name,age,loyalty_points,using_loyalty_points,allowed_bags
general,John,32,,,3
";
        let passengers = read_manifest(data.as_bytes()).unwrap();
        assert_eq!(passengers[0].allowed_bags, 3);
    }

    #[test]
    fn test_unknown_category_reports_row() {
        let data = "\
category,name,age,loyalty_points,using_loyalty_points,allowed_bags
general,John,32,,,
pilot,Han,35,,,
";
        match read_manifest(data.as_bytes()) {
            Err(FlightError::UnrecognizedCategory { index, value }) => {
                assert_eq!(index, Some(2));
                assert_eq!(value, "pilot");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_negative_balance_reports_row() {
        let data = "\
category,name,age,loyalty_points,using_loyalty_points,allowed_bags
loyalty,Mike,26,-10,true,
";
        assert!(matches!(
            read_manifest(data.as_bytes()),
            Err(FlightError::InvalidPassenger { index: Some(1), .. })
        ));
    }

    #[test]
    fn test_malformed_row() {
        let data = "\
category,name,age,loyalty_points,using_loyalty_points,allowed_bags
general,John,not-a-number,,,
";
        assert!(matches!(
            read_manifest(data.as_bytes()),
            Err(FlightError::CsvError(_))
        ));
    }
}
