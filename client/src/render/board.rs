use std::fmt;

use common::{Ticket, TicketStatus};

use super::{LOADING, NO_ONE_WAITING, NOBODY_SERVING, SERVING_FAILED, TICKETS_FAILED};
use crate::session::Panel;

/// The highlighted "now serving" slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServingLine {
    Ticket(String),
    Nobody,
    Loading,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitingList {
    /// Ticket numbers, in the order the backend returned them.
    Tickets(Vec<String>),
    Empty,
    Loading,
    Failed,
}

/// Public display: one serving ticket and the waiting line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub serving: ServingLine,
    pub waiting: WaitingList,
}

/// The ticket to highlight: the serving ticket when there is exactly one.
///
/// With several tickets marked serving none is highlighted, since the board
/// cannot tell which one the customer should walk to.
pub fn serving_ticket(tickets: &[Ticket]) -> Option<&Ticket> {
    let mut serving = tickets.iter().filter(|t| t.status == TicketStatus::Serving);
    match (serving.next(), serving.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}

pub fn board(tickets: &Panel<Vec<Ticket>>) -> BoardView {
    match tickets {
        Panel::Loading => BoardView {
            serving: ServingLine::Loading,
            waiting: WaitingList::Loading,
        },
        Panel::Failed => BoardView {
            serving: ServingLine::Failed,
            waiting: WaitingList::Failed,
        },
        Panel::Ready(tickets) => {
            let serving = match serving_ticket(tickets) {
                Some(t) => ServingLine::Ticket(t.ticket_number.clone()),
                None => ServingLine::Nobody,
            };
            let waiting: Vec<String> = tickets
                .iter()
                .filter(|t| t.status == TicketStatus::Waiting)
                .map(|t| t.ticket_number.clone())
                .collect();
            let waiting = if waiting.is_empty() {
                WaitingList::Empty
            } else {
                WaitingList::Tickets(waiting)
            };
            BoardView { serving, waiting }
        }
    }
}

impl fmt::Display for ServingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServingLine::Ticket(number) => f.write_str(number),
            ServingLine::Nobody => f.write_str(NOBODY_SERVING),
            ServingLine::Loading => f.write_str(LOADING),
            ServingLine::Failed => f.write_str(SERVING_FAILED),
        }
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NOW SERVING: {}", self.serving)?;
        writeln!(f)?;
        writeln!(f, "WAITING")?;
        match &self.waiting {
            WaitingList::Tickets(numbers) => {
                for number in numbers {
                    writeln!(f, "  {number}")?;
                }
                Ok(())
            }
            WaitingList::Empty => writeln!(f, "  {NO_ONE_WAITING}"),
            WaitingList::Loading => writeln!(f, "  {LOADING}"),
            WaitingList::Failed => writeln!(f, "  {TICKETS_FAILED}"),
        }
    }
}
