//! Staff commands against single tickets.

use std::sync::Arc;

use common::TicketAction;
use uuid::Uuid;

use crate::api::QueueApi;
use crate::error::ClientError;

/// A command the backend did not accept.
#[derive(Debug, thiserror::Error)]
#[error("{action} ticket {ticket_id} failed: {source}")]
pub struct CommandFailure {
    pub ticket_id: Uuid,
    pub action: TicketAction,
    #[source]
    pub source: ClientError,
}

impl CommandFailure {
    /// Short message for the person who issued the command.
    pub fn alert(&self) -> String {
        format!("Failed to {} ticket.", self.action)
    }
}

/// Sends `call`/`serve`/`cancel` and nothing else.
///
/// It has no access to any snapshot: a successful command shows up on screen
/// only once the notifier reports the change and the session re-fetches.
pub struct CommandIssuer<A: QueueApi> {
    api: Arc<A>,
}

impl<A: QueueApi> Clone for CommandIssuer<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<A: QueueApi> CommandIssuer<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn issue(&self, ticket_id: Uuid, action: TicketAction) -> Result<(), CommandFailure> {
        match self.api.ticket_action(ticket_id, action).await {
            Ok(()) => {
                tracing::info!("Issued {action} for ticket {ticket_id}");
                Ok(())
            }
            Err(source) => {
                tracing::error!("Error updating ticket status ({action}): {source}");
                Err(CommandFailure {
                    ticket_id,
                    action,
                    source,
                })
            }
        }
    }

    pub async fn call(&self, ticket_id: Uuid) -> Result<(), CommandFailure> {
        self.issue(ticket_id, TicketAction::Call).await
    }

    pub async fn serve(&self, ticket_id: Uuid) -> Result<(), CommandFailure> {
        self.issue(ticket_id, TicketAction::Serve).await
    }

    pub async fn cancel(&self, ticket_id: Uuid) -> Result<(), CommandFailure> {
        self.issue(ticket_id, TicketAction::Cancel).await
    }
}
