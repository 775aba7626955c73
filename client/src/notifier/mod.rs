//! Change notification: the signal that a view's snapshot is stale.
//!
//! Two strategies sit behind [`Notifier`]:
//! - [`PollingNotifier`] ticks on a fixed period.
//! - [`PushNotifier`] listens on a WebSocket and reconnects after a fixed delay.
//!
//! Neither carries state to the handler; they only say "fetch again".

pub mod handler;
pub mod polling;
pub mod push;

pub use handler::ChangeHandler;
pub use polling::PollingNotifier;
pub use push::{ConnectionState, Connector, EventStream, PushNotifier, WsConnector};

use std::future::Future;

/// Drives a [`ChangeHandler`] for as long as the returned future is polled.
///
/// The future never completes on its own; stop it by dropping it or aborting
/// the task it runs in.
pub trait Notifier: Send + Sync {
    fn run<H: ChangeHandler>(&self, handler: &H) -> impl Future<Output = ()> + Send;
}

/// Runtime choice between the two strategies.
pub enum NotifierStrategy<C: Connector = WsConnector> {
    Polling(PollingNotifier),
    Push(PushNotifier<C>),
}

impl<C: Connector> NotifierStrategy<C> {
    pub fn name(&self) -> &'static str {
        match self {
            NotifierStrategy::Polling(_) => "polling",
            NotifierStrategy::Push(_) => "push",
        }
    }
}

impl<C: Connector> Notifier for NotifierStrategy<C> {
    async fn run<H: ChangeHandler>(&self, handler: &H) {
        match self {
            NotifierStrategy::Polling(p) => p.run(handler).await,
            NotifierStrategy::Push(p) => p.run(handler).await,
        }
    }
}
