//! Read-model client for the SmartQ queue backend.
//!
//! A [`Session`](session::Session) holds the latest snapshot of one queue.
//! A [`Notifier`](notifier::Notifier) tells it when to fetch again, the
//! renderers turn the snapshot into a board or dashboard, and the
//! [`CommandIssuer`](commands::CommandIssuer) sends staff commands without
//! touching local state.

pub mod api;
pub mod commands;
pub mod error;
pub mod notifier;
pub mod render;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use api::{HttpQueueApi, QueueApi};
pub use commands::{CommandFailure, CommandIssuer};
pub use error::{ClientError, ClientResult};
pub use notifier::{Notifier, NotifierStrategy, PollingNotifier, PushNotifier, WsConnector};
pub use session::{Panel, Session, TicketLookupError, ViewContext, ViewKind, ViewState};
