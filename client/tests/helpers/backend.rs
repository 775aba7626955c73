//! In-process queue backend: the REST routes and the `/ws` broadcast channel
//! the client talks to, with knobs for failures and disconnects.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use common::{ChangeEvent, NewQueue, NewTicket, Queue, Ticket, TicketStatus};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use uuid::Uuid;

#[derive(Clone)]
pub struct Backend {
    inner: Arc<Inner>,
}

struct Inner {
    queues: Mutex<Vec<Queue>>,
    tickets: Mutex<Vec<Ticket>>,
    next_number: AtomicUsize,
    fail_reads: AtomicBool,
    ticket_fetches: AtomicUsize,
    ws_connections: AtomicUsize,
    events: broadcast::Sender<String>,
    kick: broadcast::Sender<()>,
}

impl Backend {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        let (kick, _) = broadcast::channel(4);
        Self {
            inner: Arc::new(Inner {
                queues: Mutex::new(Vec::new()),
                tickets: Mutex::new(Vec::new()),
                next_number: AtomicUsize::new(1),
                fail_reads: AtomicBool::new(false),
                ticket_fetches: AtomicUsize::new(0),
                ws_connections: AtomicUsize::new(0),
                events,
                kick,
            }),
        }
    }

    pub fn add_queue(&self, name: &str) -> Queue {
        let queue = Queue {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Some(Utc::now()),
        };
        self.inner.queues.lock().unwrap().push(queue.clone());
        queue
    }

    /// Adds a ticket numbered "1", "2", ... in creation order.
    pub fn add_ticket(&self, queue_id: Uuid, status: TicketStatus) -> Ticket {
        let number = self.inner.next_number.fetch_add(1, Ordering::SeqCst);
        let ticket = Ticket {
            id: Uuid::new_v4(),
            queue_id: Some(queue_id),
            ticket_number: number.to_string(),
            customer_name: format!("Customer {number}"),
            customer_phone: format!("555-01{number:02}"),
            status,
            position: Some(number as i32),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        self.inner.tickets.lock().unwrap().push(ticket.clone());
        ticket
    }

    /// Changes a ticket without announcing it; only polling can see this.
    pub fn set_status_silently(&self, ticket_id: Uuid, status: TicketStatus) {
        let mut tickets = self.inner.tickets.lock().unwrap();
        if let Some(t) = tickets.iter_mut().find(|t| t.id == ticket_id) {
            t.status = status;
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn ticket_fetches(&self) -> usize {
        self.inner.ticket_fetches.load(Ordering::SeqCst)
    }

    pub fn ws_connections(&self) -> usize {
        self.inner.ws_connections.load(Ordering::SeqCst)
    }

    /// Sends `event` to every connected client in the `{ "type", "data" }` envelope.
    pub fn broadcast(&self, event: &ChangeEvent) {
        let data = match event {
            ChangeEvent::TicketUpdate(data) | ChangeEvent::QueueUpdate(data) => data.clone(),
            ChangeEvent::Unknown { .. } => Value::Null,
        };
        let text = json!({ "type": event.kind(), "data": data }).to_string();
        let _ = self.inner.events.send(text);
    }

    pub fn broadcast_raw(&self, text: &str) {
        let _ = self.inner.events.send(text.to_string());
    }

    /// Drops every open WebSocket connection.
    pub fn disconnect_all(&self) {
        let _ = self.inner.kick.send(());
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/v1/queues", get(list_queues).post(create_queue))
            .route("/api/v1/queues/{queue_id}", get(get_queue))
            .route(
                "/api/v1/queues/{queue_id}/tickets",
                get(get_tickets).post(create_ticket),
            )
            .route("/api/v1/tickets/{ticket_id}/{action}", post(ticket_action))
            .route("/ws", get(ws_upgrade))
            .with_state(self.clone())
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn list_queues(State(b): State<Backend>) -> Response {
    let queues = b.inner.queues.lock().unwrap().clone();
    if queues.is_empty() {
        return Json(Value::Null).into_response();
    }
    Json(queues).into_response()
}

async fn create_queue(State(b): State<Backend>, Json(body): Json<NewQueue>) -> Response {
    if body.name.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "name is required");
    }
    let queue = b.add_queue(&body.name);
    b.broadcast(&ChangeEvent::QueueUpdate(json!(queue)));
    (StatusCode::CREATED, Json(queue)).into_response()
}

async fn get_queue(State(b): State<Backend>, Path(queue_id): Path<Uuid>) -> Response {
    if b.inner.fail_reads.load(Ordering::SeqCst) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve queue");
    }
    let queues = b.inner.queues.lock().unwrap();
    match queues.iter().find(|q| q.id == queue_id) {
        Some(q) => Json(q.clone()).into_response(),
        None => error(
            StatusCode::NOT_FOUND,
            &format!("queue with ID {queue_id} not found"),
        ),
    }
}

async fn get_tickets(State(b): State<Backend>, Path(queue_id): Path<Uuid>) -> Response {
    b.inner.ticket_fetches.fetch_add(1, Ordering::SeqCst);
    if b.inner.fail_reads.load(Ordering::SeqCst) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve tickets");
    }
    let tickets: Vec<Ticket> = b
        .inner
        .tickets
        .lock()
        .unwrap()
        .iter()
        .filter(|t| t.queue_id == Some(queue_id))
        .cloned()
        .collect();
    if tickets.is_empty() {
        // Matches the real backend, which encodes an empty result as null.
        return Json(Value::Null).into_response();
    }
    Json(tickets).into_response()
}

async fn create_ticket(
    State(b): State<Backend>,
    Path(queue_id): Path<Uuid>,
    Json(body): Json<NewTicket>,
) -> Response {
    let mut ticket = b.add_ticket(queue_id, TicketStatus::Waiting);
    ticket.customer_name = body.customer_name;
    ticket.customer_phone = body.customer_phone;
    {
        let mut tickets = b.inner.tickets.lock().unwrap();
        if let Some(stored) = tickets.iter_mut().find(|t| t.id == ticket.id) {
            *stored = ticket.clone();
        }
    }
    b.broadcast(&ChangeEvent::TicketUpdate(json!(ticket)));
    (StatusCode::CREATED, Json(ticket)).into_response()
}

async fn ticket_action(
    State(b): State<Backend>,
    Path((ticket_id, action)): Path<(Uuid, String)>,
) -> Response {
    let updated = {
        let mut tickets = b.inner.tickets.lock().unwrap();
        let Some(t) = tickets.iter_mut().find(|t| t.id == ticket_id) else {
            return error(StatusCode::NOT_FOUND, "ticket not found");
        };
        let next = match (action.as_str(), t.status) {
            ("call", TicketStatus::Waiting) => TicketStatus::Serving,
            ("serve", TicketStatus::Serving) => TicketStatus::Served,
            ("cancel", TicketStatus::Waiting | TicketStatus::Serving) => TicketStatus::Cancelled,
            ("call" | "serve" | "cancel", _) => {
                return error(StatusCode::BAD_REQUEST, "invalid status transition");
            }
            _ => return error(StatusCode::NOT_FOUND, "unknown action"),
        };
        t.status = next;
        t.clone()
    };
    b.broadcast(&ChangeEvent::TicketUpdate(json!(updated)));
    Json(updated).into_response()
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(b): State<Backend>) -> Response {
    ws.on_upgrade(move |socket| serve_socket(socket, b))
}

async fn serve_socket(mut socket: WebSocket, b: Backend) {
    let mut events = b.inner.events.subscribe();
    let mut kick = b.inner.kick.subscribe();
    b.inner.ws_connections.fetch_add(1, Ordering::SeqCst);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(text) => {
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = kick.recv() => break,
            incoming = socket.recv() => match incoming {
                Some(Ok(_)) => {}
                _ => break,
            },
        }
    }
    let _ = socket.send(Message::Close(None)).await;
}

/// Serves `router` on an ephemeral local port.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    addr
}
