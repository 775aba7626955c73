use std::future::Future;
use std::time::Duration;

use common::ChangeEvent;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use tokio::sync::watch;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use super::{ChangeHandler, Notifier};
use crate::error::{ClientError, ClientResult};

/// Text frames of one push-channel connection. The stream ends when the
/// connection closes; an `Err` item means it broke.
pub type EventStream = BoxStream<'static, ClientResult<String>>;

/// Opens push-channel connections.
///
/// The notifier only ever sees this seam, so it can be driven by a scripted
/// connector in tests instead of a real socket.
pub trait Connector: Send + Sync {
    /// Performs the handshake and returns the connection's inbound frames.
    fn connect(&self) -> impl Future<Output = ClientResult<EventStream>> + Send;

    /// Human-readable target, for logs.
    fn endpoint(&self) -> &str;
}

/// WebSocket [`Connector`] (tokio-tungstenite).
#[derive(Debug, Clone)]
pub struct WsConnector {
    url: String,
}

impl WsConnector {
    pub fn new(url: impl Into<String>) -> ClientResult<Self> {
        let url = url.into();
        Url::parse(&url)?;
        Ok(Self { url })
    }
}

impl Connector for WsConnector {
    async fn connect(&self) -> ClientResult<EventStream> {
        let (socket, _) = connect_async(self.url.as_str()).await?;
        let frames = socket.filter_map(|msg| async move {
            match msg {
                Ok(Message::Text(text)) => Some(Ok(text.as_str().to_owned())),
                Ok(Message::Close(frame)) => {
                    tracing::debug!("Server closed push channel: {frame:?}");
                    None
                }
                // Ping/pong are answered by tungstenite; binary frames carry nothing for us.
                Ok(_) => None,
                Err(err) => Some(Err(ClientError::from(err))),
            }
        });
        Ok(frames.boxed())
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

/// Lifecycle of the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

/// Push-channel notifier.
///
/// connecting → open on handshake, open → closed on any disconnect or error,
/// closed → connecting after `reconnect_delay`. Retries are unbounded and the
/// delay never grows.
pub struct PushNotifier<C: Connector = WsConnector> {
    connector: C,
    reconnect_delay: Duration,
    state: watch::Sender<ConnectionState>,
}

impl<C: Connector> PushNotifier<C> {
    /// The state starts at `Connecting`: the first attempt begins as soon as
    /// `run` is polled.
    pub fn new(connector: C, reconnect_delay: Duration) -> Self {
        let (state, _) = watch::channel(ConnectionState::Connecting);
        Self {
            connector,
            reconnect_delay,
            state,
        }
    }

    pub fn reconnect_delay(&self) -> Duration {
        self.reconnect_delay
    }

    /// Watches connection state transitions.
    pub fn state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    fn set_state(&self, next: ConnectionState) {
        self.state.send_replace(next);
    }
}

impl<C: Connector> Notifier for PushNotifier<C> {
    async fn run<H: ChangeHandler>(&self, handler: &H) {
        let endpoint = self.connector.endpoint();
        loop {
            self.set_state(ConnectionState::Connecting);
            match self.connector.connect().await {
                Ok(mut frames) => {
                    self.set_state(ConnectionState::Open);
                    tracing::info!("Push channel connected to {endpoint}");
                    handler.on_open().await;

                    while let Some(frame) = frames.next().await {
                        match frame {
                            Ok(text) => match ChangeEvent::parse(&text) {
                                Ok(event) => {
                                    tracing::debug!(kind = event.kind(), "Change event received");
                                    handler.on_event(event).await;
                                }
                                Err(err) => {
                                    tracing::warn!("Ignoring malformed push frame: {err}");
                                }
                            },
                            Err(err) => {
                                tracing::warn!("Push channel error: {err}");
                                break;
                            }
                        }
                    }

                    self.set_state(ConnectionState::Closed);
                    tracing::info!("Push channel to {endpoint} disconnected");
                    handler.on_close().await;
                }
                Err(err) => {
                    self.set_state(ConnectionState::Closed);
                    tracing::warn!("Push channel connect to {endpoint} failed: {err}");
                }
            }

            tracing::debug!("Reconnecting in {:?}", self.reconnect_delay);
            tokio::time::sleep(self.reconnect_delay).await;
        }
    }
}
