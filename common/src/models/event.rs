use serde::Deserialize;
use serde_json::Value;

/// Wire shape of a push-channel message: `{ "type": ..., "data": ... }`.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

/// A change notification from the backend.
///
/// The payload is carried for logging only. Receivers treat every event as a
/// freshness signal and re-fetch; nothing in `data` is merged into local state.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    TicketUpdate(Value),
    QueueUpdate(Value),
    /// Any other `type`; ignored by consumers.
    Unknown { kind: String },
}

impl ChangeEvent {
    pub const TICKET_UPDATE: &'static str = "ticket_update";
    pub const QUEUE_UPDATE: &'static str = "queue_update";

    /// Decodes a text frame. Fails only when the frame is not an envelope.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let env: Envelope = serde_json::from_str(text)?;
        Ok(match env.kind.as_str() {
            Self::TICKET_UPDATE => ChangeEvent::TicketUpdate(env.data),
            Self::QUEUE_UPDATE => ChangeEvent::QueueUpdate(env.data),
            _ => ChangeEvent::Unknown { kind: env.kind },
        })
    }

    pub fn kind(&self) -> &str {
        match self {
            ChangeEvent::TicketUpdate(_) => Self::TICKET_UPDATE,
            ChangeEvent::QueueUpdate(_) => Self::QUEUE_UPDATE,
            ChangeEvent::Unknown { kind } => kind,
        }
    }
}
