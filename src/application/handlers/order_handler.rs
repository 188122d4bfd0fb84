//! OrderCommandHandler - the `bestellung` chat command.
//!
//! Routes `!bestellung <sub-command> [args...]` to the order, ledger-link and
//! settlement services and renders their results for the room.

use async_trait::async_trait;
use tracing::info;

use crate::application::dispatcher::{InboundMessage, MessageHandler, Reply};
use crate::application::ledger_link_service::LedgerLinkService;
use crate::application::order_service::{AddLineRequest, OrderService};
use crate::application::render;
use crate::application::router::{
    BoundArgs, CommandRouter, CommandSpec, RouterConfig, Routing, SubCommand,
};
use crate::application::settlement_engine::SettlementEngine;
use crate::domain::foundation::{DomainError, ErrorCode, User, UserId};
use crate::domain::order::call_text;
use crate::domain::settlement::allocate;

/// Top-level command word.
pub const ORDER_COMMAND: &str = "bestellung";

const HANDLER_NAME: &str = "BestellungHandler";

/// Sub-commands of `!bestellung`, in help order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderCommand {
    New,
    Add,
    Show,
    CallText,
    PrintPayment,
    GetTotal,
    Remove,
    Close,
    AddLedgerLink,
    RemoveLedgerLink,
    ProcessLedger,
    Menu,
    Article,
    Restaurants,
}

impl SubCommand for OrderCommand {
    fn all() -> &'static [Self] {
        use OrderCommand::*;
        &[
            New,
            Add,
            Show,
            CallText,
            PrintPayment,
            GetTotal,
            Remove,
            Close,
            AddLedgerLink,
            RemoveLedgerLink,
            ProcessLedger,
            Menu,
            Article,
            Restaurants,
        ]
    }

    fn spec(&self) -> CommandSpec {
        let (word, description, usage, required, optional) = match self {
            OrderCommand::New => ("new", "Erstellt eine Neue Bestellung.", "new $Lieferdienst", 1, 0),
            OrderCommand::Add => (
                "add",
                "Hinzufügen eines Items zur Bestellung",
                "add $Bestellung $Artikel [$Version $Extras $Kommentar $Anzahl]",
                2,
                4,
            ),
            OrderCommand::Show => ("show", "Anzeigen einer Bestellung", "show $Bestellung", 1, 0),
            OrderCommand::CallText => (
                "call-text",
                "Ausgabe einen Textes zum Anrufen",
                "call-text $Bestellung",
                1,
                0,
            ),
            OrderCommand::PrintPayment => (
                "print-payment",
                "Ausgabe der Informationen wer was bezahlen muss",
                "print-payment $Bestellung [$Gezahlt]",
                1,
                1,
            ),
            OrderCommand::GetTotal => (
                "get-total",
                "Ausgabe wie viel die Bestellung kostet plus Trinkgeld Vorschläge",
                "get-total $Bestellung",
                1,
                0,
            ),
            OrderCommand::Remove => (
                "remove",
                "Löscht Position aus der Bestellung",
                "remove $Bestellung $Position",
                2,
                0,
            ),
            OrderCommand::Close => (
                "close",
                "Schließt Bestellung und Löscht diese",
                "close $Bestellung",
                1,
                0,
            ),
            OrderCommand::AddLedgerLink => (
                "add-strichliste",
                "Verknüpft den schreibenden Matrix account mit einem Strichlisten Benutzer",
                "add-strichliste $Benutzername",
                1,
                0,
            ),
            OrderCommand::RemoveLedgerLink => (
                "remove-strichliste",
                "Löscht Matrix account zu Strichlisten account verknüpfung",
                "remove-strichliste",
                0,
                0,
            ),
            OrderCommand::ProcessLedger => (
                "process-strichliste",
                "Versucht Bestellung via Strichliste abzurechnen",
                "process-strichliste $Bestellung [$Bezahlendes-Wesen]",
                1,
                1,
            ),
            OrderCommand::Menu => ("menu", "Zeigt Menü eines Lieferdienstes", "menu $Lieferdienst", 1, 0),
            OrderCommand::Article => (
                "article",
                "Zeigt Artikelinformationen",
                "article $Lieferdienst $Artikel",
                2,
                0,
            ),
            OrderCommand::Restaurants => ("restaurants", "Zeigt alle Lieferdienste", "restaurants", 0, 0),
        };
        CommandSpec {
            word,
            description,
            usage,
            required,
            optional,
        }
    }
}

/// Handler for the `bestellung` command.
pub struct OrderCommandHandler {
    router: CommandRouter<OrderCommand>,
    orders: OrderService,
    links: LedgerLinkService,
    settlement: SettlementEngine,
}

impl OrderCommandHandler {
    pub fn new(
        router_config: &RouterConfig,
        orders: OrderService,
        links: LedgerLinkService,
        settlement: SettlementEngine,
    ) -> Self {
        Self {
            router: CommandRouter::new(router_config, ORDER_COMMAND),
            orders,
            links,
            settlement,
        }
    }

    async fn execute(
        &self,
        command: OrderCommand,
        args: &BoundArgs,
        sender: User,
    ) -> Result<Reply, DomainError> {
        match command {
            OrderCommand::New => {
                let (slug, _) = self.orders.create(args.required(0), sender).await?;
                Ok(Reply::Text(format!(
                    "Neue Bestellung mit dem Name: {} erstellt",
                    slug
                )))
            }
            OrderCommand::Add => {
                let request = AddLineRequest {
                    article: args.required(1),
                    variant: args.optional(2),
                    extras: args.optional(3),
                    comment: args.optional(4),
                    quantity: args.optional(5),
                };
                self.orders.add_line(args.required(0), request, sender).await?;
                Ok(Reply::Text("Artikel hinzugefügt".to_string()))
            }
            OrderCommand::Show => {
                let (_, order) = self.orders.load(args.required(0)).await?;
                Ok(Reply::Html(render::order_table(&order)))
            }
            OrderCommand::CallText => {
                let (_, order) = self.orders.load(args.required(0)).await?;
                Ok(Reply::Text(call_text(&order)))
            }
            OrderCommand::PrintPayment => {
                let (_, order) = self
                    .orders
                    .record_payment(args.required(0), args.optional(1))
                    .await?;
                let allocation = allocate(&order)?;
                Ok(Reply::Html(render::payment_table(&order, &allocation)))
            }
            OrderCommand::GetTotal => {
                let (_, order) = self.orders.load(args.required(0)).await?;
                Ok(Reply::Html(render::total_table(&order)))
            }
            OrderCommand::Remove => {
                self.orders
                    .remove_line(args.required(0), args.required(1), &sender.id)
                    .await?;
                Ok(Reply::Text("Artikel entfernt".to_string()))
            }
            OrderCommand::Close => {
                self.orders.close(args.required(0), &sender.id).await?;
                Ok(Reply::Text("Bestellung geschlossen".to_string()))
            }
            OrderCommand::AddLedgerLink => {
                self.links.link(&sender.id, args.required(0)).await?;
                Ok(Reply::Text("Link hinzugefügt".to_string()))
            }
            OrderCommand::RemoveLedgerLink => {
                self.links.unlink(&sender.id).await?;
                Ok(Reply::Text("Link entfernt".to_string()))
            }
            OrderCommand::ProcessLedger => self.process_ledger(args, &sender).await,
            OrderCommand::Menu => {
                let service = self.orders.catalog().find_service(args.required(0))?;
                Ok(Reply::Html(render::menu_table(service)))
            }
            OrderCommand::Article => {
                let service = self.orders.catalog().find_service(args.required(0))?;
                let article = service.find_article(args.required(1))?;
                Ok(Reply::Html(render::article_table(article)))
            }
            OrderCommand::Restaurants => {
                Ok(Reply::Html(render::restaurants_table(self.orders.catalog())))
            }
        }
    }

    async fn process_ledger(&self, args: &BoundArgs, sender: &User) -> Result<Reply, DomainError> {
        let (slug, order) = self.orders.load(args.required(0)).await?;
        order.authorize_creator(&sender.id)?;
        let allocation = allocate(&order)?;
        let link = self.links.load().await?;

        let payer = match args.optional(1) {
            Some(payer) => UserId::new(payer).map_err(|e| {
                DomainError::new(ErrorCode::InvalidArgument, e.to_string())
            })?,
            None => order.creator.id.clone(),
        };
        let payer_account = link.account_for(&payer).ok_or_else(|| {
            DomainError::new(
                ErrorCode::PayerNotLinked,
                "Zahlender hat keine Strichliste verlinkt",
            )
            .with_detail("payer", payer.as_str())
        })?;

        info!(order = %slug, payer = %payer, payees = allocation.payments.len(), "settling via ledger");
        let report = self
            .settlement
            .settle(&order, payer_account, &allocation, &link)
            .await;
        Ok(Reply::Html(render::settlement_table(&order, &report)))
    }

    /// Points not-found errors at the matching listing sub-command.
    fn with_listing_hint(&self, err: DomainError) -> DomainError {
        let listing = match err.code {
            ErrorCode::ServiceNotFound => "restaurants",
            ErrorCode::ArticleNotFound => "menu $Lieferdienst",
            ErrorCode::VariantNotFound | ErrorCode::ExtraNotFound => {
                "article $Lieferdienst $Artikel"
            }
            _ => return err,
        };
        let hint = self.router.listing_hint(listing);
        err.with_hint(hint)
    }
}

#[async_trait]
impl MessageHandler for OrderCommandHandler {
    fn name(&self) -> &'static str {
        HANDLER_NAME
    }

    fn claims(&self, message: &InboundMessage) -> bool {
        self.router.is_addressed(&message.body)
    }

    async fn handle(&self, message: &InboundMessage) -> Result<Reply, DomainError> {
        let routing = match self.router.route(&message.body) {
            Some(routing) => routing?,
            None => return Err(self.router.unknown_command()),
        };

        match routing {
            Routing::Help(text) => Ok(Reply::Text(text)),
            Routing::Invoke { command, args } => {
                info!(
                    handler = HANDLER_NAME,
                    command = command.spec().word,
                    sender = %message.sender,
                    "running command"
                );
                let sender = User::from_identity(message.sender.clone());
                self.execute(command, &args, sender)
                    .await
                    .map_err(|e| self.with_listing_hint(e))
            }
        }
    }
}
