use crate::app::commands::{parse_command, Command, USAGE};
use crate::core::engine::FlightEvaluator;
use crate::domain::model::{Fleet, Flight};
use crate::domain::ports::ReportRenderer;
use crate::utils::error::{ErrorSeverity, Result};
use std::io::{BufRead, Write};

/// Interactive booking console around one flight.
pub struct Session {
    flight: Flight,
    evaluator: FlightEvaluator<Fleet>,
    renderer: Box<dyn ReportRenderer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

impl Session {
    pub fn new(flight: Flight, fleet: Fleet, renderer: Box<dyn ReportRenderer>) -> Self {
        Self {
            flight,
            evaluator: FlightEvaluator::new(fleet),
            renderer,
        }
    }

    pub fn flight(&self) -> &Flight {
        &self.flight
    }

    /// Evaluates the flight and renders the report.
    pub fn summary(&mut self) -> Result<String> {
        let report = self.evaluator.evaluate(&mut self.flight)?;
        self.renderer.render(&report)
    }

    pub fn handle<W: Write>(&mut self, line: &str, output: &mut W) -> Result<Outcome> {
        match parse_command(line)? {
            Command::AddPassenger(passenger) => {
                tracing::info!("➕ Added {} ({})", passenger.name, passenger.category());
                self.flight.add_passenger(passenger);
            }
            Command::PrintSummary => {
                let summary = self.summary()?;
                writeln!(output)?;
                writeln!(output, "{}", summary)?;
            }
            Command::Help => writeln!(output, "{}", USAGE)?,
            Command::Exit => return Ok(Outcome::Exit),
        }
        Ok(Outcome::Continue)
    }

    /// Reads commands until `exit` or end of input. Input mistakes are
    /// reported to `output` and the loop carries on; anything more severe
    /// ends the session.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        writeln!(output, "Please enter command.")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match self.handle(&line, output) {
                Ok(Outcome::Exit) => break,
                Ok(Outcome::Continue) => {}
                Err(e) if e.severity() <= ErrorSeverity::Medium => {
                    tracing::debug!("Rejected input '{}': {}", line, e);
                    writeln!(output, "UNKNOWN INPUT: {}", e)?;
                }
                Err(e) => return Err(e),
            }

            writeln!(output, "Please enter command.")?;
            output.flush()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::render::{JsonRenderer, TextRenderer};
    use crate::config::toml_config::FlightConfig;
    use std::io::Cursor;

    fn session() -> Session {
        let (flight, fleet) = FlightConfig::default().build_flight().unwrap();
        Session::new(flight, fleet, Box::new(TextRenderer))
    }

    #[test]
    fn test_run_books_and_prints() {
        let mut session = session();
        let input = Cursor::new(
            "add general John 32\n\
             add loyalty Mike 26 1500 true\n\
             add pilot Han 35\n\
             print summary\n\
             exit\n\
             add general Late 20\n",
        );
        let mut output = Vec::new();

        session.run(input, &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert_eq!(session.flight().passenger_count(), 2);
        assert!(output.contains("UNKNOWN INPUT"));
        assert!(output.contains("Flight summary for London to Paris"));
        assert!(output.contains("Total passengers: 2"));
        assert!(output.contains("FLIGHT MAY NOT PROCEED"));
    }

    #[test]
    fn test_repeated_summary_charges_points_once() {
        let mut session = session();
        let mut sink = Vec::new();
        session
            .handle("add loyalty Mike 26 1500 true", &mut sink)
            .unwrap();

        let first = session.summary().unwrap();
        let second = session.summary().unwrap();

        assert!(first.contains("Total loyalty points redeemed: 100"));
        assert!(second.contains("Total loyalty points redeemed: 100"));
        assert_eq!(session.flight().passengers()[0].loyalty_points(), Some(1400));
    }

    #[test]
    fn test_json_session() {
        let (flight, fleet) = FlightConfig::default().build_flight().unwrap();
        let mut session = Session::new(flight, fleet, Box::new(JsonRenderer));
        let summary = session.summary().unwrap();
        let value: serde_json::Value = serde_json::from_str(&summary).unwrap();
        assert_eq!(value["passengers"]["total"], 0);
    }
}
