//! State fetcher: the REST surface of the queue backend.
//!
//! Every read returns a complete value or an error. There is no partial
//! result and no retry; the next notifier signal is the retry.

use std::future::Future;
use std::time::Duration;

use common::{NewQueue, NewTicket, Queue, Ticket, TicketAction};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};

/// Operations the client needs from the backend.
///
/// `HttpQueueApi` is the production implementation; tests substitute
/// in-memory fakes to observe exactly which fetches a notifier triggers.
pub trait QueueApi: Send + Sync + 'static {
    /// `GET /queues/{id}`
    fn queue(&self, queue_id: Uuid) -> impl Future<Output = ClientResult<Queue>> + Send;

    /// `GET /queues/{id}/tickets`, in server order.
    fn tickets(&self, queue_id: Uuid) -> impl Future<Output = ClientResult<Vec<Ticket>>> + Send;

    /// `POST /tickets/{id}/{action}`. The response body is ignored.
    fn ticket_action(
        &self,
        ticket_id: Uuid,
        action: TicketAction,
    ) -> impl Future<Output = ClientResult<()>> + Send;

    /// `GET /queues`
    fn list_queues(&self) -> impl Future<Output = ClientResult<Vec<Queue>>> + Send;

    /// `POST /queues`
    fn create_queue(&self, name: &str) -> impl Future<Output = ClientResult<Queue>> + Send;

    /// `POST /queues/{id}/tickets`
    fn create_ticket(
        &self,
        queue_id: Uuid,
        ticket: &NewTicket,
    ) -> impl Future<Output = ClientResult<Ticket>> + Send;
}

/// reqwest-backed [`QueueApi`] rooted at a base URL such as
/// `http://localhost:8080/api/v1`.
#[derive(Debug, Clone)]
pub struct HttpQueueApi {
    client: Client,
    base_url: String,
}

impl HttpQueueApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!("GET {url}");
        let resp = self.client.get(&url).send().await?;
        let resp = ensure_success(resp, "GET", &url)?;
        Ok(resp.json::<T>().await?)
    }
}

fn ensure_success(resp: Response, method: &'static str, url: &str) -> ClientResult<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(ClientError::Status {
            method,
            url: url.to_string(),
            status,
        })
    }
}

impl QueueApi for HttpQueueApi {
    async fn queue(&self, queue_id: Uuid) -> ClientResult<Queue> {
        self.get_json(&format!("/queues/{queue_id}")).await
    }

    async fn tickets(&self, queue_id: Uuid) -> ClientResult<Vec<Ticket>> {
        // An empty queue is serialized as `null` by the backend.
        let tickets: Option<Vec<Ticket>> = self
            .get_json(&format!("/queues/{queue_id}/tickets"))
            .await?;
        Ok(tickets.unwrap_or_default())
    }

    async fn ticket_action(&self, ticket_id: Uuid, action: TicketAction) -> ClientResult<()> {
        let url = self.url(&format!("/tickets/{ticket_id}/{}", action.path_segment()));
        tracing::debug!("POST {url}");
        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        ensure_success(resp, "POST", &url)?;
        Ok(())
    }

    async fn list_queues(&self) -> ClientResult<Vec<Queue>> {
        let queues: Option<Vec<Queue>> = self.get_json("/queues").await?;
        Ok(queues.unwrap_or_default())
    }

    async fn create_queue(&self, name: &str) -> ClientResult<Queue> {
        let url = self.url("/queues");
        tracing::debug!("POST {url}");
        let body = NewQueue { name: name.into() };
        let resp = self.client.post(&url).json(&body).send().await?;
        let resp = ensure_success(resp, "POST", &url)?;
        Ok(resp.json::<Queue>().await?)
    }

    async fn create_ticket(&self, queue_id: Uuid, ticket: &NewTicket) -> ClientResult<Ticket> {
        let url = self.url(&format!("/queues/{queue_id}/tickets"));
        tracing::debug!("POST {url}");
        let resp = self.client.post(&url).json(ticket).send().await?;
        let resp = ensure_success(resp, "POST", &url)?;
        Ok(resp.json::<Ticket>().await?)
    }
}
