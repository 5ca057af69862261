#[cfg(feature = "cli")]
pub mod cli;
pub mod manifest;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use manifest::{load_manifest, read_manifest, PassengerRecord};
pub use toml_config::FlightConfig;
