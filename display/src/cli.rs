use clap::{Parser, Subcommand, ValueEnum};
use util::config::{AppConfig, NotifierMode};
use uuid::Uuid;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Re-fetch on a fixed interval
    Poll,
    /// Re-fetch when the WebSocket reports a change
    Push,
}

impl From<ModeArg> for NotifierMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Poll => NotifierMode::Poll,
            ModeArg::Push => NotifierMode::Push,
        }
    }
}

/// Queue board and staff dashboard for the SmartQ backend.
#[derive(Parser, Debug)]
#[command(name = "display", version, about)]
pub struct Cli {
    /// Queue to show (overrides QUEUE_ID)
    #[arg(long, global = true)]
    pub queue: Option<String>,

    /// Change notification strategy (overrides NOTIFIER_MODE)
    #[arg(long, global = true, value_enum)]
    pub mode: Option<ModeArg>,

    /// REST base URL (overrides API_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Push channel URL (overrides WS_URL)
    #[arg(long, global = true)]
    pub ws_url: Option<String>,

    /// Polling period in milliseconds (overrides POLL_INTERVAL_MS)
    #[arg(long, global = true)]
    pub interval_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Public board: the ticket being served and the waiting line
    Board,
    /// Staff dashboard; reads `call|serve|cancel <ticket>` from stdin
    Staff,
    /// Queue administration
    #[command(subcommand)]
    Queue(QueueCommand),
    /// One-shot ticket commands
    #[command(subcommand)]
    Ticket(TicketCommand),
}

#[derive(Subcommand, Debug)]
pub enum QueueCommand {
    /// Create a queue and print its ID
    Create { name: String },
    /// List every queue
    List,
}

#[derive(Subcommand, Debug)]
pub enum TicketCommand {
    /// Put a customer in a queue
    Create {
        queue_id: Uuid,
        customer_name: String,
        customer_phone: String,
        #[arg(long, default_value_t = 0)]
        priority: i32,
    },
    /// waiting -> serving
    Call { ticket_id: Uuid },
    /// serving -> served
    Serve { ticket_id: Uuid },
    /// waiting or serving -> cancelled
    Cancel { ticket_id: Uuid },
}

impl Cli {
    /// Pushes command-line overrides into the global config.
    pub fn apply_overrides(&self) {
        if let Some(queue) = &self.queue {
            AppConfig::set_queue_id(queue.clone());
        }
        if let Some(mode) = self.mode {
            AppConfig::set_notifier_mode(mode.into());
        }
        if let Some(url) = &self.api_url {
            AppConfig::set_api_base_url(url.clone());
        }
        if let Some(url) = &self.ws_url {
            AppConfig::set_ws_url(url.clone());
        }
        if let Some(ms) = self.interval_ms {
            AppConfig::set_poll_interval_ms(ms);
        }
    }
}
