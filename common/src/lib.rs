//! Shared domain types for the SmartQ display client.
//!
//! Everything here mirrors the JSON the queue backend serves. Values are
//! transient copies of server state: they are created by a fetch and replaced
//! wholesale by the next one.

pub mod models;

pub use models::event::ChangeEvent;
pub use models::queue::{NewQueue, Queue};
pub use models::ticket::{NewTicket, Ticket, TicketAction, TicketStatus};
