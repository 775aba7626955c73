use common::ChangeEvent;
use std::future::Future;

/// Receives the signals a [`Notifier`](super::Notifier) produces.
///
/// Calls are made one at a time, in arrival order: the notifier awaits each
/// call before it reads the next signal.
pub trait ChangeHandler: Send + Sync {
    /// Called each time the push channel completes a handshake.
    fn on_open(&self) -> impl Future<Output = ()> + Send {
        async {}
    }

    /// Called on every polling interval.
    fn on_tick(&self) -> impl Future<Output = ()> + Send;

    /// Called for every decoded push event, unknown types included.
    fn on_event(&self, event: ChangeEvent) -> impl Future<Output = ()> + Send;

    /// Called when an open push channel drops.
    fn on_close(&self) -> impl Future<Output = ()> + Send {
        async {}
    }
}
