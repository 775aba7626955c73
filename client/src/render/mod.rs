//! Pure snapshot → view functions.
//!
//! Every call builds the whole view from one [`ViewState`]; nothing from a
//! previous render survives. Views implement `Display` for terminal output.

pub mod board;
pub mod dashboard;

pub use board::{BoardView, ServingLine, WaitingList, board};
pub use dashboard::{DashboardView, QueueHeader, TicketRow, TicketRows, dashboard};

use crate::session::{ViewKind, ViewState};

pub const LOADING: &str = "Loading...";
pub const NOBODY_SERVING: &str = "---";
pub const NO_ONE_WAITING: &str = "No one waiting.";
pub const NO_TICKETS: &str = "No tickets in queue.";
pub const SERVING_FAILED: &str = "Failed to load.";
pub const TICKETS_FAILED: &str = "Failed to load tickets.";
pub const QUEUE_FAILED: &str = "Failed to load queue details.";

/// Renders the full frame for `view`.
pub fn frame(view: ViewKind, state: &ViewState) -> String {
    match view {
        ViewKind::Board => board(&state.tickets).to_string(),
        ViewKind::Dashboard => dashboard(state).to_string(),
    }
}

/// What a view shows when no queue has been chosen.
pub fn queue_not_selected(view: ViewKind) -> &'static str {
    match view {
        ViewKind::Board => "Queue not selected.",
        ViewKind::Dashboard => "Please select a queue.",
    }
}
