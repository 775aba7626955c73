//! Long-running views: the public board and the staff dashboard.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use client::render;
use client::{
    CommandIssuer, HttpQueueApi, NotifierStrategy, PollingNotifier, PushNotifier, QueueApi,
    Session, ViewContext, ViewKind, ViewState, WsConnector,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use util::config::{AppConfig, NotifierMode};
use uuid::Uuid;

use crate::staff_input::{STAFF_HELP, StaffInput};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Builds the configured notifier.
pub fn build_notifier(cfg: &AppConfig) -> Result<NotifierStrategy> {
    Ok(match cfg.notifier_mode {
        NotifierMode::Poll => {
            if cfg.poll_interval_ms == 0 {
                bail!("POLL_INTERVAL_MS must be greater than zero");
            }
            NotifierStrategy::Polling(PollingNotifier::new(Duration::from_millis(
                cfg.poll_interval_ms,
            )))
        }
        NotifierMode::Push => {
            let connector = WsConnector::new(cfg.ws_url.clone())
                .with_context(|| format!("invalid WS_URL '{}'", cfg.ws_url))?;
            NotifierStrategy::Push(PushNotifier::new(
                connector,
                Duration::from_millis(cfg.reconnect_delay_ms),
            ))
        }
    })
}

/// The queue this process shows, or `None` when none is configured.
pub fn queue_id(cfg: &AppConfig) -> Result<Option<Uuid>> {
    cfg.queue_id
        .as_deref()
        .map(|raw| {
            Uuid::parse_str(raw.trim()).with_context(|| format!("invalid queue id '{raw}'"))
        })
        .transpose()
}

pub async fn run(view: ViewKind, cfg: &AppConfig) -> Result<()> {
    let Some(queue_id) = queue_id(cfg)? else {
        println!("{}", render::queue_not_selected(view));
        bail!("no queue selected; pass --queue or set QUEUE_ID");
    };

    let api = Arc::new(HttpQueueApi::new(
        cfg.api_base_url.clone(),
        Duration::from_secs(cfg.request_timeout_secs),
    )?);
    let notifier = build_notifier(cfg)?;
    tracing::info!(
        queue = %queue_id,
        notifier = notifier.name(),
        "Starting {view:?} view against {}",
        api.base_url()
    );

    let session = Arc::new(Session::new(ViewContext::new(queue_id, view), api.clone()));
    let painter = tokio::spawn(paint(view, session.subscribe()));
    let runner = {
        let session = session.clone();
        tokio::spawn(async move { session.run(&notifier).await })
    };

    let result = match view {
        ViewKind::Board => tokio::signal::ctrl_c().await.map_err(Into::into),
        ViewKind::Dashboard => staff_loop(&*session, &CommandIssuer::new(api)).await,
    };

    runner.abort();
    painter.abort();
    tracing::info!("{view:?} view stopped");
    result
}

/// Repaints the whole frame on every snapshot replacement.
async fn paint(view: ViewKind, mut rx: watch::Receiver<ViewState>) {
    loop {
        let frame = render::frame(view, &rx.borrow_and_update());
        {
            let mut out = std::io::stdout().lock();
            let _ = write!(out, "{CLEAR_SCREEN}{frame}");
            if view == ViewKind::Dashboard {
                let _ = write!(out, "\n{STAFF_HELP}\n> ");
            }
            let _ = out.flush();
        }

        if rx.changed().await.is_err() {
            break;
        }
    }
}

async fn staff_loop<A: QueueApi>(session: &Session<A>, issuer: &CommandIssuer<A>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => return Ok(()),
        };
        let Some(line) = line else {
            return Ok(());
        };

        match line.parse::<StaffInput>() {
            Ok(StaffInput::Blank) => {}
            Ok(StaffInput::Quit) => return Ok(()),
            Ok(StaffInput::Help) => eprintln!("{STAFF_HELP}"),
            Ok(StaffInput::Refresh) => session.refresh_all().await,
            Ok(StaffInput::Command { action, reference }) => {
                let snapshot = session.snapshot();
                let ticket = match snapshot.resolve_ticket(&reference, action) {
                    Ok(ticket) => ticket,
                    Err(err) => {
                        eprintln!("{err}");
                        continue;
                    }
                };
                if let Err(failure) = issuer.issue(ticket.id, action).await {
                    eprintln!("{}", failure.alert());
                }
            }
            Err(msg) => eprintln!("{msg}"),
        }
    }
}
