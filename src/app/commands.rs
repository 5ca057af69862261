//! Maps console lines onto typed commands. Keeps text handling out of the
//! domain: everything past this module works with [`Passenger`] values.

use crate::domain::model::{Passenger, PassengerCategory};
use crate::utils::error::{FlightError, Result};

pub const USAGE: &str = "\
Commands:
    add general <name> <age>
    add loyalty <name> <age> <points> <true|false>
    add airline <name> <age>
    add discounted <name> <age>
    print summary
    help
    exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddPassenger(Passenger),
    PrintSummary,
    Help,
    Exit,
}

fn invalid(input: &str, reason: impl Into<String>) -> FlightError {
    FlightError::InvalidCommand {
        input: input.to_string(),
        reason: reason.into(),
    }
}

fn parse_number<T: std::str::FromStr>(input: &str, field: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| invalid(input, format!("{} must be a whole number, got '{}'", field, raw)))
}

fn parse_bool(input: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" => Ok(true),
        "false" | "no" | "n" => Ok(false),
        _ => Err(invalid(
            input,
            format!("expected true or false for loyalty redemption, got '{}'", raw),
        )),
    }
}

pub fn parse_command(line: &str) -> Result<Command> {
    let input = line.trim();
    let segments: Vec<&str> = input.split_whitespace().collect();
    let keyword = |i: usize| segments.get(i).map(|s| s.to_ascii_lowercase());

    match keyword(0).as_deref() {
        Some("exit") | Some("quit") => Ok(Command::Exit),
        Some("help") => Ok(Command::Help),
        Some("print") if keyword(1).as_deref() == Some("summary") => Ok(Command::PrintSummary),
        Some("add") => parse_add(input, &segments),
        Some(_) => Err(invalid(input, "unknown command")),
        None => Err(invalid(input, "empty command")),
    }
}

fn parse_add(input: &str, segments: &[&str]) -> Result<Command> {
    let category: PassengerCategory = segments
        .get(1)
        .ok_or_else(|| invalid(input, "missing passenger category"))?
        .parse()?;

    let expected = match category {
        PassengerCategory::LoyaltyMember => 6,
        _ => 4,
    };
    if segments.len() != expected {
        return Err(invalid(
            input,
            format!(
                "a {} booking takes {} arguments, got {}",
                category,
                expected - 2,
                segments.len().saturating_sub(2)
            ),
        ));
    }

    let name = segments[2];
    let age: u32 = parse_number(input, "age", segments[3])?;

    let (points, using_points) = if category == PassengerCategory::LoyaltyMember {
        (
            Some(parse_number::<i64>(input, "loyalty points", segments[4])?),
            Some(parse_bool(input, segments[5])?),
        )
    } else {
        (None, None)
    };

    Passenger::from_parts(category, name, age, points, using_points).map(Command::AddPassenger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_general() {
        let command = parse_command("add general John 32").unwrap();
        assert_eq!(command, Command::AddPassenger(Passenger::general("John", 32)));
    }

    #[test]
    fn test_parse_loyalty() {
        let command = parse_command("Add Loyalty Mike 26 1500 True").unwrap();
        assert_eq!(
            command,
            Command::AddPassenger(Passenger::loyalty_member("Mike", 26, 1500, true))
        );
    }

    #[test]
    fn test_parse_airline_and_discounted() {
        assert_eq!(
            parse_command("add airline Natalie 30").unwrap(),
            Command::AddPassenger(Passenger::airline_employee("Natalie", 30))
        );
        assert_eq!(
            parse_command("add discounted Chris 38").unwrap(),
            Command::AddPassenger(Passenger::discounted("Chris", 38))
        );
    }

    #[test]
    fn test_parse_control_commands() {
        assert_eq!(parse_command("print summary").unwrap(), Command::PrintSummary);
        assert_eq!(parse_command("  EXIT ").unwrap(), Command::Exit);
        assert_eq!(parse_command("help").unwrap(), Command::Help);
    }

    #[test]
    fn test_unknown_category() {
        assert!(matches!(
            parse_command("add pilot Han 35"),
            Err(FlightError::UnrecognizedCategory { .. })
        ));
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(parse_command(""), Err(FlightError::InvalidCommand { .. })));
        assert!(matches!(parse_command("fly"), Err(FlightError::InvalidCommand { .. })));
        assert!(matches!(
            parse_command("add general John"),
            Err(FlightError::InvalidCommand { .. })
        ));
        assert!(matches!(
            parse_command("add general John -4"),
            Err(FlightError::InvalidCommand { .. })
        ));
        assert!(matches!(
            parse_command("add loyalty Mike 26 1500 maybe"),
            Err(FlightError::InvalidCommand { .. })
        ));
        assert!(matches!(
            parse_command("add loyalty Mike 26 -10 true"),
            Err(FlightError::InvalidPassenger { .. })
        ));
    }
}
