use std::fmt;

use common::{Ticket, TicketAction, TicketStatus};
use uuid::Uuid;

use super::{LOADING, NO_TICKETS, QUEUE_FAILED, TICKETS_FAILED};
use crate::session::{Panel, ViewState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueHeader {
    Details { name: String, id: Uuid },
    Loading,
    Failed,
}

/// One ticket as staff see it, with the commands offered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRow {
    pub id: Uuid,
    pub number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub status: TicketStatus,
    pub actions: Vec<TicketAction>,
}

impl From<&Ticket> for TicketRow {
    fn from(t: &Ticket) -> Self {
        Self {
            id: t.id,
            number: t.ticket_number.clone(),
            customer_name: t.customer_name.clone(),
            customer_phone: t.customer_phone.clone(),
            status: t.status,
            actions: t.offered_actions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketRows {
    Rows(Vec<TicketRow>),
    Empty,
    Loading,
    Failed,
}

/// Staff dashboard: queue details and every ticket the backend returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub queue: QueueHeader,
    pub tickets: TicketRows,
}

pub fn dashboard(state: &ViewState) -> DashboardView {
    let queue = match &state.queue {
        Panel::Ready(q) => QueueHeader::Details {
            name: q.name.clone(),
            id: q.id,
        },
        Panel::Loading => QueueHeader::Loading,
        Panel::Failed => QueueHeader::Failed,
    };
    let tickets = match &state.tickets {
        Panel::Ready(list) if list.is_empty() => TicketRows::Empty,
        Panel::Ready(list) => TicketRows::Rows(list.iter().map(TicketRow::from).collect()),
        Panel::Loading => TicketRows::Loading,
        Panel::Failed => TicketRows::Failed,
    };
    DashboardView { queue, tickets }
}

impl fmt::Display for TicketRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.status == TicketStatus::Serving { '>' } else { ' ' };
        write!(
            f,
            "{marker} {:<8} {} ({})  status: {}",
            self.number, self.customer_name, self.customer_phone, self.status
        )?;
        if !self.actions.is_empty() {
            let actions: Vec<String> = self.actions.iter().map(|a| a.to_string()).collect();
            write!(f, "  [{}]", actions.join(" | "))?;
        }
        Ok(())
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.queue {
            QueueHeader::Details { name, id } => {
                writeln!(f, "Queue Name: {name}")?;
                writeln!(f, "Queue ID: {id}")?;
            }
            QueueHeader::Loading => writeln!(f, "{LOADING}")?,
            QueueHeader::Failed => writeln!(f, "{QUEUE_FAILED}")?,
        }
        writeln!(f)?;
        match &self.tickets {
            TicketRows::Rows(rows) => {
                for row in rows {
                    writeln!(f, "{row}")?;
                }
                Ok(())
            }
            TicketRows::Empty => writeln!(f, "{NO_TICKETS}"),
            TicketRows::Loading => writeln!(f, "{LOADING}"),
            TicketRows::Failed => writeln!(f, "{TICKETS_FAILED}"),
        }
    }
}
