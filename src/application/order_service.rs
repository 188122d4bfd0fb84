//! OrderService - load, mutate and persist order documents.
//!
//! Every mutation is a full read-modify-write of the order document in the
//! cached tier. Catalog resolution happens here so the chat handler only deals
//! with raw argument tokens.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::catalog::Catalog;
use crate::domain::foundation::{DomainError, ErrorCode, OrderSlug, Timestamp, User, UserId};
use crate::domain::order::{generate_slug, LineItem, Order, OrderError};
use crate::ports::{load_document, save_document, DocumentFormat, DocumentKey, DocumentStore};

/// Storage namespace shared by orders, catalog and ledger links.
pub const HANDLER_NAMESPACE: &str = "BestellungHandler";

/// Catalog document in the persistent tier.
pub const CATALOG_FILENAME: &str = "lieferdienste.toml";

const SLUG_ATTEMPTS: usize = 8;

/// Upper bound for one line's quantity.
pub const MAX_QUANTITY: u32 = 1000;

/// Upper bound for a recorded payment, in currency units.
pub const MAX_PAYMENT: i64 = 1_000_000;

/// Raw tokens of an `add` invocation after the order name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddLineRequest<'a> {
    pub article: &'a str,
    pub variant: Option<&'a str>,
    pub extras: Option<&'a str>,
    pub comment: Option<&'a str>,
    pub quantity: Option<&'a str>,
}

/// Order lifecycle operations over the document store.
pub struct OrderService {
    store: Arc<dyn DocumentStore>,
    catalog: Arc<Catalog>,
}

impl OrderService {
    pub fn new(store: Arc<dyn DocumentStore>, catalog: Arc<Catalog>) -> Self {
        Self { store, catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn order_key(slug: &OrderSlug) -> DocumentKey {
        DocumentKey::cached(HANDLER_NAMESPACE, slug.filename())
    }

    /// Opens a new order for `service_name` and persists it under a fresh slug.
    pub async fn create(
        &self,
        service_name: &str,
        creator: User,
    ) -> Result<(OrderSlug, Order), DomainError> {
        let service = self.catalog.find_service(service_name)?;
        let slug = self.fresh_slug().await?;
        let order = Order::open(creator, service, Timestamp::now());

        self.save(&slug, &order).await?;
        info!(order = %slug, service = %order.delivery_service, "order created");
        Ok((slug, order))
    }

    async fn fresh_slug(&self) -> Result<OrderSlug, DomainError> {
        for _ in 0..SLUG_ATTEMPTS {
            let slug = {
                let mut rng = rand::rng();
                generate_slug(&mut rng)
            }
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

            if !self.store.exists(&Self::order_key(&slug)).await? {
                return Ok(slug);
            }
            debug!(order = %slug, "slug already taken, drawing again");
        }
        Err(DomainError::new(
            ErrorCode::StorageError,
            "Kein freier Name für die Bestellung gefunden",
        ))
    }

    /// Loads an order. Malformed names and missing documents are both
    /// "not found".
    pub async fn load(&self, name: &str) -> Result<(OrderSlug, Order), DomainError> {
        let slug = OrderSlug::from_str(name).map_err(|_| OrderError::invalid_slug(name))?;
        let order: Order = load_document(&*self.store, &Self::order_key(&slug), DocumentFormat::Toml)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    DomainError::from(OrderError::not_found(slug.as_str()))
                } else {
                    DomainError::new(
                        ErrorCode::StorageError,
                        format!("Fehler beim Laden der Bestellung: {}", e),
                    )
                    .with_detail("order", slug.as_str())
                }
            })?;
        Ok((slug, order))
    }

    pub async fn save(&self, slug: &OrderSlug, order: &Order) -> Result<(), DomainError> {
        save_document(&*self.store, &Self::order_key(slug), DocumentFormat::Toml, order)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::StorageError,
                    format!("Fehler beim Speichern der Bestellung: {}", e),
                )
                .with_detail("order", slug.as_str())
            })
    }

    /// Resolves the article against the order's delivery service and appends
    /// a line ordered by `orderer`.
    pub async fn add_line(
        &self,
        name: &str,
        request: AddLineRequest<'_>,
        orderer: User,
    ) -> Result<LineItem, DomainError> {
        let (slug, mut order) = self.load(name).await?;

        let service = self.catalog.find_service(&order.delivery_service)?;
        let article = service.find_article(request.article)?;
        let variant = article.resolve_variant(request.variant)?;
        let extras_text = request.extras.unwrap_or_default();
        let extras = article.resolve_extras(extras_text)?;
        let quantity = parse_quantity(request.quantity)?;

        let item = LineItem::new(
            article,
            variant,
            &extras,
            extras_text,
            quantity,
            request.comment.unwrap_or_default(),
            orderer,
        )?;
        order.add_line(item.clone());

        self.save(&slug, &order).await?;
        debug!(order = %slug, article = %item.article_name, total = %order.total, "line added");
        Ok(item)
    }

    /// Removes the line at `position` on behalf of `requester`.
    pub async fn remove_line(
        &self,
        name: &str,
        position: &str,
        requester: &UserId,
    ) -> Result<LineItem, DomainError> {
        let index: i64 = position.trim().parse().map_err(|e| {
            DomainError::new(
                ErrorCode::InvalidNumber,
                format!("Position konnte nicht konvertiert werden: {}", e),
            )
        })?;

        let (slug, mut order) = self.load(name).await?;
        let removed = order.remove_line(index, requester)?;

        self.save(&slug, &order).await?;
        debug!(order = %slug, index, total = %order.total, "line removed");
        Ok(removed)
    }

    /// Deletes the order. Creator only.
    pub async fn close(&self, name: &str, requester: &UserId) -> Result<Order, DomainError> {
        let (slug, order) = self.load(name).await?;
        order.authorize_creator(requester)?;

        self.store.delete(&Self::order_key(&slug)).await.map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Fehler beim Löschen der Bestellung: {}", e),
            )
            .with_detail("order", slug.as_str())
        })?;
        info!(order = %slug, "order closed");
        Ok(order)
    }

    /// Stores the amount paid to the delivery service. A missing or zero
    /// amount records the order total.
    pub async fn record_payment(
        &self,
        name: &str,
        amount: Option<&str>,
    ) -> Result<(OrderSlug, Order), DomainError> {
        let amount = amount.map(parse_amount).transpose()?;
        let (slug, mut order) = self.load(name).await?;
        let paid = order.record_payment(amount);

        self.save(&slug, &order).await?;
        debug!(order = %slug, paid = %paid, total = %order.total, "payment recorded");
        Ok((slug, order))
    }
}

fn parse_quantity(token: Option<&str>) -> Result<u32, OrderError> {
    let Some(token) = token else {
        return Ok(1);
    };
    let value: i64 = token
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| OrderError::invalid_quantity(e.to_string()))?;
    let quantity = u32::try_from(value)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or_else(|| OrderError::invalid_quantity("Menge muss mindestens 1 sein"))?;
    if quantity > MAX_QUANTITY {
        return Err(OrderError::invalid_quantity(format!(
            "Menge darf höchstens {} sein",
            MAX_QUANTITY
        )));
    }
    Ok(quantity)
}

/// Accepts `19.30` as well as `19,30`, between zero and [`MAX_PAYMENT`].
fn parse_amount(token: &str) -> Result<Decimal, OrderError> {
    let amount = Decimal::from_str(&token.trim().replace(',', "."))
        .map_err(|e| OrderError::invalid_amount(e.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(OrderError::invalid_amount("Betrag darf nicht negativ sein"));
    }
    if amount > Decimal::from(MAX_PAYMENT) {
        return Err(OrderError::invalid_amount(format!(
            "Betrag darf höchstens {} sein",
            MAX_PAYMENT
        )));
    }
    Ok(amount.round_dp(2))
}

/// Reads the catalog from the persistent tier. A missing document yields an
/// empty catalog.
pub async fn load_catalog(store: &dyn DocumentStore) -> Result<Catalog, DomainError> {
    let key = DocumentKey::persistent(HANDLER_NAMESPACE, CATALOG_FILENAME);
    match load_document::<Catalog>(store, &key, DocumentFormat::Toml).await {
        Ok(catalog) => {
            info!(services = catalog.delivery_services.len(), "catalog loaded");
            Ok(catalog)
        }
        Err(e) if e.is_not_found() => {
            warn!(key = %key, "no catalog document found, starting with an empty catalog");
            Ok(Catalog::default())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDocumentStore;
    use crate::domain::catalog::{Article, DeliveryService, PriceOption};
    use crate::domain::foundation::ErrorCategory;
    use crate::ports::Tier;

    fn money(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn user(id: &str) -> User {
        User::from_identity(UserId::new(id).unwrap())
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![DeliveryService {
            name: "Pizzeria Roma".to_string(),
            phone_number: "0911 123".to_string(),
            articles: vec![Article {
                number: "12".to_string(),
                name: "Margherita".to_string(),
                variants: vec![
                    PriceOption::new("Klein", money(750)),
                    PriceOption::new("Groß", money(950)),
                ],
                extras: vec![PriceOption::new("mit Käse", money(100))],
            }],
        }])
    }

    fn service() -> (Arc<InMemoryDocumentStore>, OrderService) {
        let store = Arc::new(InMemoryDocumentStore::new());
        let service = OrderService::new(store.clone(), Arc::new(catalog()));
        (store, service)
    }

    fn pizza(quantity: Option<&str>) -> AddLineRequest<'_> {
        AddLineRequest {
            article: "12",
            variant: Some("groß"),
            extras: Some("käse"),
            comment: None,
            quantity,
        }
    }

    #[tokio::test]
    async fn create_persists_one_document() {
        let (store, service) = service();

        let (slug, order) = service.create("pizzeria roma", user("@c:x")).await.unwrap();

        assert_eq!(slug.as_str().split('-').count(), 3);
        assert_eq!(order.delivery_service, "Pizzeria Roma");
        assert_eq!(store.count(HANDLER_NAMESPACE, Tier::Cached).await, 1);
    }

    #[tokio::test]
    async fn create_for_unknown_service_writes_nothing() {
        let (store, service) = service();

        let err = service.create("pizzaexpress", user("@c:x")).await.unwrap_err();

        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(store.count(HANDLER_NAMESPACE, Tier::Cached).await, 0);
    }

    #[tokio::test]
    async fn load_unknown_or_malformed_name_is_not_found() {
        let (_, service) = service();
        let missing = service.load("elf-wilde-otter").await.unwrap_err();
        let malformed = service.load("../etc").await.unwrap_err();
        assert_eq!(missing.code, ErrorCode::OrderNotFound);
        assert_eq!(malformed.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn add_line_resolves_catalog_and_updates_total() {
        let (_, service) = service();
        let (slug, _) = service.create("pizzeria roma", user("@c:x")).await.unwrap();

        let item = service
            .add_line(slug.as_str(), pizza(Some("2")), user("@a:x"))
            .await
            .unwrap();

        assert_eq!(item.variant, "Groß");
        assert_eq!(item.unit_price, money(1050));
        let (_, order) = service.load(slug.as_str()).await.unwrap();
        assert_eq!(order.total, money(2100));
    }

    #[tokio::test]
    async fn missing_quantity_defaults_to_one() {
        let (_, service) = service();
        let (slug, _) = service.create("pizzeria roma", user("@c:x")).await.unwrap();
        let item = service.add_line(slug.as_str(), pizza(None), user("@a:x")).await.unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[tokio::test]
    async fn unparsable_quantity_is_reported() {
        let (_, service) = service();
        let (slug, _) = service.create("pizzeria roma", user("@c:x")).await.unwrap();

        let err = service
            .add_line(slug.as_str(), pizza(Some("zwei")), user("@a:x"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidNumber);
        assert!(err.message.starts_with("Menge konnte nicht konvertiert werden"));
    }

    #[tokio::test]
    async fn quantity_above_limit_is_rejected() {
        let (_, service) = service();
        let (slug, _) = service.create("pizzeria roma", user("@c:x")).await.unwrap();

        let at_limit = service
            .add_line(slug.as_str(), pizza(Some("1000")), user("@a:x"))
            .await
            .unwrap();
        assert_eq!(at_limit.quantity, MAX_QUANTITY);

        let err = service
            .add_line(slug.as_str(), pizza(Some("4294967295")), user("@a:x"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidNumber);
        assert_eq!(
            err.message,
            "Menge konnte nicht konvertiert werden: Menge darf höchstens 1000 sein"
        );
        let (_, order) = service.load(slug.as_str()).await.unwrap();
        assert_eq!(order.line_items.len(), 1);
    }

    #[tokio::test]
    async fn unknown_extra_adds_nothing() {
        let (_, service) = service();
        let (slug, _) = service.create("pizzeria roma", user("@c:x")).await.unwrap();
        let request = AddLineRequest {
            extras: Some("käse,ananas"),
            ..pizza(None)
        };

        let err = service.add_line(slug.as_str(), request, user("@a:x")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ExtraNotFound);
        let (_, order) = service.load(slug.as_str()).await.unwrap();
        assert!(order.line_items.is_empty());
    }

    #[tokio::test]
    async fn remove_out_of_range_leaves_order_unchanged() {
        let (_, service) = service();
        let (slug, _) = service.create("pizzeria roma", user("@c:x")).await.unwrap();
        service.add_line(slug.as_str(), pizza(None), user("@a:x")).await.unwrap();
        service.add_line(slug.as_str(), pizza(None), user("@b:x")).await.unwrap();

        let err = service
            .remove_line(slug.as_str(), "5", &UserId::new("@c:x").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::PositionNotFound);
        let (_, order) = service.load(slug.as_str()).await.unwrap();
        assert_eq!(order.line_items.len(), 2);
        assert_eq!(order.total, money(2100));
    }

    #[tokio::test]
    async fn unparsable_position_is_argument_error() {
        let (_, service) = service();
        let (slug, _) = service.create("pizzeria roma", user("@c:x")).await.unwrap();
        let err = service
            .remove_line(slug.as_str(), "eins", &UserId::new("@c:x").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Argument);
        assert!(err.message.starts_with("Position konnte nicht konvertiert werden"));
    }

    #[tokio::test]
    async fn only_creator_can_close() {
        let (store, service) = service();
        let (slug, _) = service.create("pizzeria roma", user("@c:x")).await.unwrap();

        let err = service
            .close(slug.as_str(), &UserId::new("@a:x").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Authorization);

        service.close(slug.as_str(), &UserId::new("@c:x").unwrap()).await.unwrap();
        assert_eq!(store.count(HANDLER_NAMESPACE, Tier::Cached).await, 0);
    }

    #[tokio::test]
    async fn payment_defaults_to_total_and_accepts_comma() {
        let (_, service) = service();
        let (slug, _) = service.create("pizzeria roma", user("@c:x")).await.unwrap();
        service.add_line(slug.as_str(), pizza(Some("2")), user("@a:x")).await.unwrap();

        let (_, order) = service.record_payment(slug.as_str(), None).await.unwrap();
        assert_eq!(order.amount_paid, money(2100));

        let (_, order) = service.record_payment(slug.as_str(), Some("20,50")).await.unwrap();
        assert_eq!(order.amount_paid, money(2050));

        let err = service.record_payment(slug.as_str(), Some("viel")).await.unwrap_err();
        assert!(err.message.starts_with("Zahlung konnte nicht konvertiert werden"));
    }

    #[tokio::test]
    async fn payment_outside_range_is_not_recorded() {
        let (_, service) = service();
        let (slug, _) = service.create("pizzeria roma", user("@c:x")).await.unwrap();
        service.add_line(slug.as_str(), pizza(None), user("@a:x")).await.unwrap();

        let negative = service.record_payment(slug.as_str(), Some("-10")).await.unwrap_err();
        assert_eq!(negative.code, ErrorCode::InvalidNumber);
        assert!(negative.message.ends_with("Betrag darf nicht negativ sein"));

        let huge = service
            .record_payment(slug.as_str(), Some("79228162514264337593543950335"))
            .await
            .unwrap_err();
        assert_eq!(huge.code, ErrorCode::InvalidNumber);
        assert!(huge.message.ends_with("Betrag darf höchstens 1000000 sein"));

        let (_, order) = service.load(slug.as_str()).await.unwrap();
        assert!(!order.is_paid());

        let (_, order) = service.record_payment(slug.as_str(), Some("1000000")).await.unwrap();
        assert_eq!(order.amount_paid, Decimal::from(MAX_PAYMENT));
    }

    #[tokio::test]
    async fn missing_catalog_is_empty() {
        let store = InMemoryDocumentStore::new();
        let catalog = load_catalog(&store).await.unwrap();
        assert!(catalog.delivery_services.is_empty());
    }

    #[tokio::test]
    async fn catalog_is_read_from_persistent_tier() {
        let store = InMemoryDocumentStore::new();
        let key = DocumentKey::persistent(HANDLER_NAMESPACE, CATALOG_FILENAME);
        save_document(&store, &key, DocumentFormat::Toml, &catalog()).await.unwrap();

        let loaded = load_catalog(&store).await.unwrap();

        assert_eq!(loaded, catalog());
    }
}
