use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlightError {
    #[error("No aircraft assigned to flight {route}")]
    MissingAircraft { route: String },

    #[error("Aircraft {assigned_id} is already assigned to flight {route}")]
    AircraftAlreadyAssigned { route: String, assigned_id: u32 },

    #[error("Unknown aircraft id {id}")]
    UnknownAircraft { id: u32 },

    #[error("Unrecognized passenger category '{value}'{}", passenger_position(.index))]
    UnrecognizedCategory { index: Option<usize>, value: String },

    #[error("Invalid configuration for {field} = '{value}': {reason}")]
    InvalidConfiguration {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid passenger{}: {reason}", passenger_position(.index))]
    InvalidPassenger { index: Option<usize>, reason: String },

    #[error("Invalid command '{input}': {reason}")]
    InvalidCommand { input: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Manifest error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Report formatting error: {0}")]
    RenderError(#[from] std::fmt::Error),
}

fn passenger_position(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at passenger #{}", i),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Evaluation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FlightError {
    /// Attaches the roster position to passenger errors that lack one.
    pub fn at_passenger(self, position: usize) -> Self {
        match self {
            FlightError::UnrecognizedCategory { index: None, value } => {
                FlightError::UnrecognizedCategory {
                    index: Some(position),
                    value,
                }
            }
            FlightError::InvalidPassenger {
                index: None,
                reason,
            } => FlightError::InvalidPassenger {
                index: Some(position),
                reason,
            },
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FlightError::InvalidConfiguration { .. }
            | FlightError::ConfigError { .. }
            | FlightError::TomlError(_)
            | FlightError::UnknownAircraft { .. }
            | FlightError::AircraftAlreadyAssigned { .. } => ErrorCategory::Configuration,
            FlightError::UnrecognizedCategory { .. }
            | FlightError::InvalidPassenger { .. }
            | FlightError::InvalidCommand { .. }
            | FlightError::CsvError(_) => ErrorCategory::Input,
            FlightError::MissingAircraft { .. } => ErrorCategory::Evaluation,
            FlightError::IoError(_)
            | FlightError::SerializationError(_)
            | FlightError::RenderError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FlightError::InvalidCommand { .. } => ErrorSeverity::Low,
            FlightError::UnrecognizedCategory { .. }
            | FlightError::InvalidPassenger { .. }
            | FlightError::AircraftAlreadyAssigned { .. } => ErrorSeverity::Medium,
            FlightError::MissingAircraft { .. }
            | FlightError::InvalidConfiguration { .. }
            | FlightError::ConfigError { .. }
            | FlightError::UnknownAircraft { .. }
            | FlightError::TomlError(_)
            | FlightError::CsvError(_) => ErrorSeverity::High,
            FlightError::IoError(_)
            | FlightError::SerializationError(_)
            | FlightError::RenderError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FlightError::MissingAircraft { .. } => {
                "Assign an aircraft to the flight before evaluating it".to_string()
            }
            FlightError::AircraftAlreadyAssigned { .. } => {
                "Create a new flight to fly this route with a different aircraft".to_string()
            }
            FlightError::UnknownAircraft { id } => {
                format!("Add aircraft {} to the [[fleet]] table or pick an existing id", id)
            }
            FlightError::UnrecognizedCategory { .. } => {
                "Use one of: general, loyalty, airline, discounted".to_string()
            }
            FlightError::InvalidConfiguration { field, .. } => {
                format!("Check the value of '{}' in the configuration", field)
            }
            FlightError::InvalidPassenger { .. } => {
                "Check the passenger's age, loyalty points and bag allowance".to_string()
            }
            FlightError::InvalidCommand { .. } => {
                "Try 'add general <name> <age>', 'print summary' or 'exit'".to_string()
            }
            FlightError::ConfigError { .. } | FlightError::TomlError(_) => {
                "Make sure the file exists and is valid TOML format".to_string()
            }
            FlightError::CsvError(_) => {
                "Check the manifest header and that every row has the same columns".to_string()
            }
            FlightError::IoError(_) => "Check file paths and permissions".to_string(),
            FlightError::SerializationError(_) | FlightError::RenderError(_) => {
                "Report this as a bug".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Input problem: {}", self),
            ErrorCategory::Evaluation => format!("Cannot evaluate flight: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlightError>;
