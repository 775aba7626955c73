//! In-memory doubles shared by the unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use common::{NewTicket, Queue, Ticket, TicketAction, TicketStatus};
use reqwest::StatusCode;
use uuid::Uuid;

use crate::api::QueueApi;
use crate::error::{ClientError, ClientResult};

/// Builds a ticket whose number is `number`.
pub fn ticket(number: &str, status: TicketStatus) -> Ticket {
    Ticket {
        id: Uuid::new_v4(),
        queue_id: None,
        ticket_number: number.to_string(),
        customer_name: format!("Customer {number}"),
        customer_phone: "555-0100".into(),
        status,
        position: None,
        created_at: None,
        updated_at: None,
    }
}

fn rejected(method: &'static str, url: &str) -> ClientError {
    ClientError::Status {
        method,
        url: url.to_string(),
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Counts every call and answers from fixed data. Nothing it returns
/// changes unless a test changes it.
pub struct FakeApi {
    queue: Queue,
    tickets: Mutex<Vec<Ticket>>,
    fail_reads: AtomicBool,
    fail_actions: AtomicBool,
    queue_fetches: AtomicUsize,
    ticket_fetches: AtomicUsize,
    actions: Mutex<Vec<(Uuid, TicketAction)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            queue: Queue {
                id: Uuid::new_v4(),
                name: "Front desk".into(),
                created_at: None,
            },
            tickets: Mutex::new(Vec::new()),
            fail_reads: AtomicBool::new(false),
            fail_actions: AtomicBool::new(false),
            queue_fetches: AtomicUsize::new(0),
            ticket_fetches: AtomicUsize::new(0),
            actions: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_id(&self) -> Uuid {
        self.queue.id
    }

    pub fn set_tickets(&self, tickets: Vec<Ticket>) {
        *self.tickets.lock().unwrap() = tickets;
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_actions(&self, fail: bool) {
        self.fail_actions.store(fail, Ordering::SeqCst);
    }

    pub fn queue_fetches(&self) -> usize {
        self.queue_fetches.load(Ordering::SeqCst)
    }

    pub fn ticket_fetches(&self) -> usize {
        self.ticket_fetches.load(Ordering::SeqCst)
    }

    pub fn actions(&self) -> Vec<(Uuid, TicketAction)> {
        self.actions.lock().unwrap().clone()
    }
}

impl QueueApi for FakeApi {
    async fn queue(&self, _queue_id: Uuid) -> ClientResult<Queue> {
        self.queue_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(rejected("GET", "/queues/{id}"));
        }
        Ok(self.queue.clone())
    }

    async fn tickets(&self, _queue_id: Uuid) -> ClientResult<Vec<Ticket>> {
        self.ticket_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(rejected("GET", "/queues/{id}/tickets"));
        }
        Ok(self.tickets.lock().unwrap().clone())
    }

    async fn ticket_action(&self, ticket_id: Uuid, action: TicketAction) -> ClientResult<()> {
        self.actions.lock().unwrap().push((ticket_id, action));
        if self.fail_actions.load(Ordering::SeqCst) {
            return Err(rejected("POST", "/tickets/{id}/{action}"));
        }
        Ok(())
    }

    async fn list_queues(&self) -> ClientResult<Vec<Queue>> {
        Ok(vec![self.queue.clone()])
    }

    async fn create_queue(&self, name: &str) -> ClientResult<Queue> {
        Ok(Queue {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: None,
        })
    }

    async fn create_ticket(&self, queue_id: Uuid, new: &NewTicket) -> ClientResult<Ticket> {
        let mut t = ticket("N1", TicketStatus::Waiting);
        t.queue_id = Some(queue_id);
        t.customer_name = new.customer_name.clone();
        t.customer_phone = new.customer_phone.clone();
        Ok(t)
    }
}
