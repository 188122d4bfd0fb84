//! Console front end: every stdin line is a chat message from the configured
//! console user, every reply goes to stdout.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use sammelbestellung::adapters::{ConsoleGateway, FileDocumentStore, HttpLedger};
use sammelbestellung::application::{
    load_catalog, Dispatch, EventDispatcher, InboundMessage, LedgerLinkService,
    OrderCommandHandler, OrderService, SettlementEngine,
};
use sammelbestellung::config::{AppConfig, LoggingConfig};
use sammelbestellung::ports::Ledger;

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    config.validate()?;
    init_tracing(&config.logging);

    let store = Arc::new(FileDocumentStore::new(
        &config.storage.cached_path,
        &config.storage.persistent_path,
    ));
    let catalog = Arc::new(load_catalog(store.as_ref()).await?);
    let ledger: Arc<dyn Ledger> = Arc::new(HttpLedger::new(config.ledger.timeout())?);

    let handler = OrderCommandHandler::new(
        &config.bot.router_config(),
        OrderService::new(store.clone(), catalog),
        LedgerLinkService::new(store.clone(), ledger.clone(), config.ledger.base_url.clone()),
        SettlementEngine::new(ledger, config.ledger.skip_self_payment),
    );
    let dispatcher = EventDispatcher::new(
        config.bot.bot_user_id()?,
        Arc::new(ConsoleGateway::stdout()),
    )
    .with_handler(Arc::new(handler));

    let sender = config.bot.console_user_id()?;
    info!(
        user = %sender,
        room = %config.bot.console_room,
        "reading commands from stdin"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(body) = line else {
            break;
        };
        if body.trim().is_empty() {
            continue;
        }

        let message = InboundMessage {
            event_id: format!("${}", Uuid::new_v4()),
            room: config.bot.console_room.clone(),
            sender: sender.clone(),
            body,
        };
        if dispatcher.dispatch(&message).await == Dispatch::Ignored {
            warn!(event = %message.event_id, "no handler for message");
        }
    }

    if config.storage.clear_cache_on_exit {
        store.clear_cache().await?;
        info!("cached documents removed");
    }
    Ok(())
}
