use clap::Parser;
use flight_booking::utils::error::{ErrorSeverity, FlightError};
use flight_booking::utils::{logger, validation::Validate};
use flight_booking::{load_manifest, renderer_for, CliConfig, Session};

fn run(config: &CliConfig) -> Result<(), FlightError> {
    let flight_config = config.load_flight_config()?;
    flight_config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let (mut flight, fleet) = flight_config.build_flight()?;
    if let Some(manifest) = &config.manifest {
        for passenger in load_manifest(manifest)? {
            flight.add_passenger(passenger);
        }
    }

    tracing::info!(
        "✈️  {} on {} with {} passengers booked",
        flight.route().title(),
        flight.require_aircraft()?.name(),
        flight.passenger_count()
    );

    let renderer = renderer_for(config.report_format(&flight_config));
    let mut session = Session::new(flight, fleet, renderer);

    if config.summary_only {
        println!("{}", session.summary()?);
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session.run(stdin.lock(), &mut stdout)
}

fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting flight-booking");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ flight-booking failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}
