//! Line commands typed into the staff dashboard.

use std::str::FromStr;

use common::TicketAction;

pub const STAFF_HELP: &str =
    "Commands: call <ticket> | serve <ticket> | cancel <ticket> | refresh | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaffInput {
    /// `<action> <ticket number or id>`
    Command {
        action: TicketAction,
        reference: String,
    },
    Refresh,
    Help,
    Quit,
    Blank,
}

impl FromStr for StaffInput {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(StaffInput::Blank);
        };

        match verb.to_ascii_lowercase().as_str() {
            "refresh" | "r" => return Ok(StaffInput::Refresh),
            "help" | "?" => return Ok(StaffInput::Help),
            "quit" | "exit" | "q" => return Ok(StaffInput::Quit),
            _ => {}
        }

        let action = TicketAction::from_str(verb).map_err(|_| format!("Unknown command '{verb}'"))?;
        match (words.next(), words.next()) {
            (Some(reference), None) => Ok(StaffInput::Command {
                action,
                reference: reference.to_string(),
            }),
            _ => Err(format!("Usage: {action} <ticket>")),
        }
    }
}
