//! One-shot queue and ticket commands.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use client::{CommandIssuer, HttpQueueApi, QueueApi};
use common::{NewTicket, TicketAction};
use util::config::AppConfig;

use crate::cli::{QueueCommand, TicketCommand};

fn api(cfg: &AppConfig) -> Result<HttpQueueApi> {
    Ok(HttpQueueApi::new(
        cfg.api_base_url.clone(),
        Duration::from_secs(cfg.request_timeout_secs),
    )?)
}

pub async fn queue(cmd: QueueCommand, cfg: &AppConfig) -> Result<()> {
    let api = api(cfg)?;
    match cmd {
        QueueCommand::Create { name } => {
            let queue = api.create_queue(&name).await?;
            println!("{}\t{}", queue.id, queue.name);
        }
        QueueCommand::List => {
            let queues = api.list_queues().await?;
            if queues.is_empty() {
                println!("No queues.");
            }
            for queue in queues {
                println!("{}\t{}", queue.id, queue.name);
            }
        }
    }
    Ok(())
}

pub async fn ticket(cmd: TicketCommand, cfg: &AppConfig) -> Result<()> {
    let api = Arc::new(api(cfg)?);
    let (ticket_id, action) = match cmd {
        TicketCommand::Create {
            queue_id,
            customer_name,
            customer_phone,
            priority,
        } => {
            let body = NewTicket {
                customer_name,
                customer_phone,
                priority,
            };
            let ticket = api.create_ticket(queue_id, &body).await?;
            println!("{}\t{}\t{}", ticket.id, ticket.ticket_number, ticket.status);
            return Ok(());
        }
        TicketCommand::Call { ticket_id } => (ticket_id, TicketAction::Call),
        TicketCommand::Serve { ticket_id } => (ticket_id, TicketAction::Serve),
        TicketCommand::Cancel { ticket_id } => (ticket_id, TicketAction::Cancel),
    };

    CommandIssuer::new(api)
        .issue(ticket_id, action)
        .await
        .map_err(|failure| {
            eprintln!("{}", failure.alert());
            anyhow!(failure)
        })
}
