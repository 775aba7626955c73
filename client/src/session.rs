//! A running view: the single snapshot, the fetches that replace it, and the
//! handler the notifier drives.

use std::sync::Arc;

use common::{ChangeEvent, Queue, Ticket, TicketAction, TicketStatus};
use tokio::sync::watch;
use uuid::Uuid;

use crate::api::QueueApi;
use crate::notifier::{ChangeHandler, Notifier};

/// Which surface is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Public display: current ticket plus the waiting list.
    Board,
    /// Staff dashboard: queue details, every ticket, and commands.
    Dashboard,
}

impl ViewKind {
    /// Whether the view shows queue metadata and therefore re-fetches it.
    pub fn shows_queue_details(self) -> bool {
        matches!(self, ViewKind::Dashboard)
    }
}

/// Session-scoped values every component receives at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewContext {
    pub queue_id: Uuid,
    pub view: ViewKind,
}

impl ViewContext {
    pub fn new(queue_id: Uuid, view: ViewKind) -> Self {
        Self { queue_id, view }
    }
}

/// One independently fetched part of the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    Loading,
    Ready(T),
    Failed,
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Panel::Loading
    }
}

impl<T> Panel<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(v) => Some(v),
            _ => None,
        }
    }
}

/// The latest fetched snapshot. Each panel is only ever replaced whole.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub queue: Panel<Queue>,
    pub tickets: Panel<Vec<Ticket>>,
}

/// Why a staff-typed reference did not resolve to a single ticket.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketLookupError {
    #[error("No ticket '{0}' in the current list.")]
    NotFound(String),

    #[error("Cannot {action} ticket {number} while it is {status}.")]
    NotOffered {
        action: TicketAction,
        number: String,
        status: TicketStatus,
    },

    #[error("{count} tickets numbered '{reference}' accept {action}; use the ticket id.")]
    Ambiguous {
        reference: String,
        action: TicketAction,
        count: usize,
    },
}

impl ViewState {
    /// Resolves a staff-typed reference for `action` against the current snapshot.
    ///
    /// Ticket numbers restart every day while older tickets stay in the list,
    /// so a number can match several tickets. Only matches whose status offers
    /// `action` are candidates.
    pub fn resolve_ticket(
        &self,
        reference: &str,
        action: TicketAction,
    ) -> Result<&Ticket, TicketLookupError> {
        let reference = reference.trim();
        let matches: Vec<&Ticket> = self
            .tickets
            .ready()
            .map(|tickets| {
                tickets
                    .iter()
                    .filter(|t| t.matches_reference(reference))
                    .collect()
            })
            .unwrap_or_default();

        let offered: Vec<&Ticket> = matches
            .iter()
            .copied()
            .filter(|t| action.is_offered_for(&t.status))
            .collect();

        match (offered.as_slice(), matches.last()) {
            ([only], _) => Ok(*only),
            ([], None) => Err(TicketLookupError::NotFound(reference.to_string())),
            // The list is in position order, so the last match is the newest.
            ([], Some(newest)) => Err(TicketLookupError::NotOffered {
                action,
                number: newest.ticket_number.clone(),
                status: newest.status,
            }),
            (several, _) => Err(TicketLookupError::Ambiguous {
                reference: reference.to_string(),
                action,
                count: several.len(),
            }),
        }
    }
}

/// Owns the snapshot of one view and keeps it fresh.
///
/// Renderers subscribe to the snapshot; the notifier drives the session
/// through [`ChangeHandler`].
pub struct Session<A: QueueApi> {
    ctx: ViewContext,
    api: Arc<A>,
    state: watch::Sender<ViewState>,
}

impl<A: QueueApi> Session<A> {
    pub fn new(ctx: ViewContext, api: Arc<A>) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self { ctx, api, state }
    }

    pub fn context(&self) -> ViewContext {
        self.ctx
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Receives every replaced snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Fetches the ticket list and replaces the ticket panel.
    pub async fn refresh_tickets(&self) {
        let panel = match self.api.tickets(self.ctx.queue_id).await {
            Ok(tickets) => {
                tracing::debug!(count = tickets.len(), "Fetched tickets for queue {}", self.ctx.queue_id);
                Panel::Ready(tickets)
            }
            Err(err) => {
                tracing::error!("Error fetching queue tickets: {err}");
                Panel::Failed
            }
        };
        self.state.send_modify(|s| s.tickets = panel);
    }

    /// Fetches queue metadata and replaces the queue panel.
    pub async fn refresh_queue(&self) {
        let panel = match self.api.queue(self.ctx.queue_id).await {
            Ok(queue) => Panel::Ready(queue),
            Err(err) => {
                tracing::error!("Error fetching queue details: {err}");
                Panel::Failed
            }
        };
        self.state.send_modify(|s| s.queue = panel);
    }

    /// Refreshes everything the view displays.
    pub async fn refresh_all(&self) {
        if self.ctx.view.shows_queue_details() {
            self.refresh_queue().await;
        }
        self.refresh_tickets().await;
    }

    /// Initial fetch, then follow `notifier` until the future is dropped.
    pub async fn run<N: Notifier>(&self, notifier: &N) {
        self.refresh_all().await;
        notifier.run(self).await;
    }
}

impl<A: QueueApi> ChangeHandler for Session<A> {
    async fn on_tick(&self) {
        self.refresh_all().await;
    }

    async fn on_event(&self, event: ChangeEvent) {
        match event {
            ChangeEvent::TicketUpdate(_) => self.refresh_tickets().await,
            ChangeEvent::QueueUpdate(data) => {
                if self.ctx.view.shows_queue_details() {
                    self.refresh_queue().await;
                } else {
                    tracing::info!("Queue update received: {data}");
                }
            }
            ChangeEvent::Unknown { kind } => {
                tracing::debug!("Ignoring change event of unknown type '{kind}'");
            }
        }
    }
}
