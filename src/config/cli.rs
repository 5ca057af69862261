use crate::app::render::ReportFormat;
use crate::config::toml_config::FlightConfig;
use crate::utils::error::{FlightError, Result};
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "flight-booking")]
#[command(about = "Book passengers on a scheduled flight and check whether it may depart")]
pub struct CliConfig {
    /// Path to a TOML flight configuration (defaults to the built-in London to Paris flight)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// CSV passenger manifest to book before starting
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Report format; overrides [report] in the configuration
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Print one summary for the configured passengers and exit
    #[arg(long)]
    pub summary_only: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn load_flight_config(&self) -> Result<FlightConfig> {
        match &self.config {
            Some(path) => FlightConfig::from_file(path),
            None => Ok(FlightConfig::default()),
        }
    }

    pub fn report_format(&self, config: &FlightConfig) -> ReportFormat {
        self.format
            .or_else(|| config.report_format())
            .unwrap_or_default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        for (flag, path) in [("--config", &self.config), ("--manifest", &self.manifest)] {
            if let Some(path) = path {
                if !path.is_file() {
                    return Err(FlightError::ConfigError {
                        message: format!("{} {} does not exist", flag, path.display()),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = CliConfig::parse_from(["flight-booking"]);
        assert!(cli.config.is_none());
        assert!(!cli.summary_only);
        assert!(cli.validate().is_ok());

        let config = cli.load_flight_config().unwrap();
        assert_eq!(config.route.origin, "London");
        assert_eq!(cli.report_format(&config), ReportFormat::Text);
    }

    #[test]
    fn test_format_flag_overrides_config() {
        let cli = CliConfig::parse_from(["flight-booking", "--format", "json", "--summary-only"]);
        let config = FlightConfig::default();
        assert_eq!(cli.report_format(&config), ReportFormat::Json);
        assert!(cli.summary_only);
    }

    #[test]
    fn test_missing_manifest_fails_validation() {
        let cli =
            CliConfig::parse_from(["flight-booking", "--manifest", "/nonexistent/roster.csv"]);
        assert!(cli.validate().is_err());
    }
}
