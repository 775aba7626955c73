use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// A customer's place in a queue, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    #[serde(default)]
    pub queue_id: Option<Uuid>,
    pub ticket_number: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Actions the dashboard offers for this ticket.
    ///
    /// This only drives what is shown; the backend owns the transition rules
    /// and the client never checks them before issuing a command.
    pub fn offered_actions(&self) -> Vec<TicketAction> {
        TicketAction::ALL
            .into_iter()
            .filter(|action| action.is_offered_for(&self.status))
            .collect()
    }

    /// Matches a staff-typed reference: the ticket number (case-insensitive)
    /// or the full UUID.
    pub fn matches_reference(&self, reference: &str) -> bool {
        let reference = reference.trim();
        self.ticket_number.eq_ignore_ascii_case(reference)
            || Uuid::parse_str(reference).is_ok_and(|id| id == self.id)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TicketStatus {
    Waiting,
    Serving,
    Served,
    Cancelled,
}

/// Imperative command staff can issue against a single ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TicketAction {
    /// waiting → serving
    Call,
    /// serving → served
    Serve,
    /// waiting | serving → cancelled
    Cancel,
}

impl TicketAction {
    pub const ALL: [TicketAction; 3] = [TicketAction::Call, TicketAction::Serve, TicketAction::Cancel];

    /// Last path segment of `POST /tickets/{id}/{action}`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            TicketAction::Call => "call",
            TicketAction::Serve => "serve",
            TicketAction::Cancel => "cancel",
        }
    }

    pub fn is_offered_for(&self, status: &TicketStatus) -> bool {
        matches!(
            (self, status),
            (TicketAction::Call, TicketStatus::Waiting)
                | (TicketAction::Serve, TicketStatus::Serving)
                | (TicketAction::Cancel, TicketStatus::Waiting | TicketStatus::Serving)
        )
    }
}

/// Body of `POST /queues/{id}/tickets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTicket {
    pub customer_name: String,
    pub customer_phone: String,
    pub priority: i32,
}
