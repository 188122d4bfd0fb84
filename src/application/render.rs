//! HTML table views for chat replies.

use rust_decimal::Decimal;

use crate::domain::catalog::{Article, Catalog, DeliveryService};
use crate::domain::order::{Order, TipSuggestions};
use crate::domain::settlement::{Allocation, SettlementReport};

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Two decimal places, e.g. `19.30`.
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Minimal table builder producing a `<table>` with caption, head and body.
#[derive(Debug, Clone, Default)]
pub struct HtmlTable {
    title: String,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl HtmlTable {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn header<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = cells.into_iter().map(Into::into).collect();
        self
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn render(&self) -> String {
        let mut html = String::from("<table>\n");
        if !self.title.is_empty() {
            html.push_str(&format!("<caption>{}</caption>\n", html_escape(&self.title)));
        }
        if !self.header.is_empty() {
            html.push_str("<thead>\n<tr>");
            for cell in &self.header {
                html.push_str(&format!("<th>{}</th>", html_escape(cell)));
            }
            html.push_str("</tr>\n</thead>\n");
        }
        html.push_str("<tbody>\n");
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", html_escape(cell)));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>");
        html
    }
}

/// `show`: every line with its index.
pub fn order_table(order: &Order) -> String {
    let mut table = HtmlTable::new(format!("Bestellung bei {}", order.delivery_service)).header([
        "#",
        "Nummer",
        "Name",
        "Version",
        "Anzahl",
        "Extras",
        "Kommentar",
        "Besteller",
    ]);
    for (i, item) in order.line_items.iter().enumerate() {
        table.row([
            i.to_string(),
            item.article_number.clone(),
            item.article_name.clone(),
            item.variant.clone(),
            item.quantity.to_string(),
            item.extras.clone(),
            item.comment.clone(),
            item.ordered_by.display_name.clone(),
        ]);
    }
    table.render()
}

/// `get-total`: total and tip suggestions.
pub fn total_table(order: &Order) -> String {
    let tips = TipSuggestions::for_total(order.total);
    let mut table = HtmlTable::new(format!("Bestellung bei {} zu Zahlen", order.delivery_service));
    table.row(["Total".to_string(), format_money(tips.total)]);
    table.row(["Aufgerundet".to_string(), format_money(tips.rounded_up)]);
    table.row(["5% Trinkgeld".to_string(), format_money(tips.five_percent)]);
    table.row(["10% Trinkgeld".to_string(), format_money(tips.ten_percent)]);
    table.row(["20% Trinkgeld".to_string(), format_money(tips.twenty_percent)]);
    table.render()
}

/// `print-payment`: paid/total ratio and per-payee debts.
pub fn payment_table(order: &Order, allocation: &Allocation) -> String {
    let mut table = HtmlTable::new(format!(
        "Bestellung bei {} Besteller Schulden",
        order.delivery_service
    ))
    .header(["Name", "Schulden"]);
    table.row([
        "Rabatt".to_string(),
        format!("{:.4}", allocation.factor.round_dp(4)),
    ]);
    for payment in &allocation.payments {
        table.row([payment.payee.display_name.clone(), format_money(payment.owed)]);
    }
    table.render()
}

/// `process-strichliste`: one row per payee, sorted by identity.
pub fn settlement_table(order: &Order, report: &SettlementReport) -> String {
    let mut table = HtmlTable::new(format!(
        "Bestellung bei {} Strichlisten Abrechnung",
        order.delivery_service
    ))
    .header(["Name", "Ergebnis"]);
    for (payee, outcome) in report.entries() {
        table.row([payee.id.to_string(), outcome.to_string()]);
    }
    table.render()
}

/// `menu`: the articles of one service.
pub fn menu_table(service: &DeliveryService) -> String {
    let mut table = HtmlTable::new(format!("Menü von {}", service.name)).header([
        "#",
        "Artikel Nummer",
        "Artikel Name",
    ]);
    for (i, article) in service.articles.iter().enumerate() {
        table.row([i.to_string(), article.number.clone(), article.name.clone()]);
    }
    table.render()
}

/// `article`: variants and extras with prices.
pub fn article_table(article: &Article) -> String {
    let mut table = HtmlTable::new(format!("Versionen und Extras von {}", article.name)).header([
        "#",
        "Version/Extra",
        "Preis",
    ]);
    table.row(["", "Versionen", ""]);
    for (i, variant) in article.variants.iter().enumerate() {
        table.row([i.to_string(), variant.name.clone(), format_money(variant.price)]);
    }
    table.row(["", "Extras", ""]);
    for (i, extra) in article.extras.iter().enumerate() {
        table.row([i.to_string(), extra.name.clone(), format_money(extra.price)]);
    }
    table.render()
}

/// `restaurants`: every known delivery service.
pub fn restaurants_table(catalog: &Catalog) -> String {
    let mut table = HtmlTable::new("Lieferdienste").header(["#", "Name", "Telefonnummer"]);
    for (i, service) in catalog.delivery_services.iter().enumerate() {
        table.row([i.to_string(), service.name.clone(), service.phone_number.clone()]);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::PriceOption;
    use crate::domain::foundation::{Timestamp, User, UserId};
    use crate::domain::order::LineItem;
    use crate::domain::settlement::{allocate, SettlementOutcome};

    fn user(id: &str) -> User {
        User::from_identity(UserId::new(id).unwrap())
    }

    fn order() -> Order {
        let pizza = Article {
            number: "12".to_string(),
            name: "Pizza <Spezial>".to_string(),
            variants: vec![PriceOption::new("Groß", Decimal::new(965, 2))],
            extras: vec![],
        };
        let service = DeliveryService {
            name: "Roma".to_string(),
            phone_number: "0911".to_string(),
            articles: vec![pizza.clone()],
        };
        let mut order = Order::open(user("@c:x"), &service, Timestamp::now());
        order.add_line(
            LineItem::new(&pizza, &pizza.variants[0], &[], "", 2, "", user("@a:x")).unwrap(),
        );
        order
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(Decimal::new(193, 1)), "19.30");
        assert_eq!(format_money(Decimal::from(20)), "20.00");
        assert_eq!(format_money(Decimal::new(33333, 4)), "3.33");
    }

    #[test]
    fn cells_are_escaped() {
        let html = order_table(&order());
        assert!(html.contains("<td>Pizza &lt;Spezial&gt;</td>"));
        assert!(html.contains("<caption>Bestellung bei Roma</caption>"));
        assert!(html.contains("<th>Besteller</th>"));
    }

    #[test]
    fn total_table_lists_tips() {
        let html = total_table(&order());
        assert!(html.contains("<td>Total</td><td>19.30</td>"));
        assert!(html.contains("<td>Aufgerundet</td><td>20.00</td>"));
        assert!(html.contains("<td>20% Trinkgeld</td><td>23.00</td>"));
    }

    #[test]
    fn payment_table_shows_factor_and_debts() {
        let mut order = order();
        order.record_payment(None);
        let allocation = allocate(&order).unwrap();

        let html = payment_table(&order, &allocation);

        assert!(html.contains("<td>Rabatt</td><td>1.0000</td>"));
        assert!(html.contains("<td>a</td><td>19.30</td>"));
    }

    #[test]
    fn settlement_table_uses_identity_and_outcome_text() {
        let report = SettlementReport::new(vec![(user("@a:x"), SettlementOutcome::NoLinkedAccount)]);
        let html = settlement_table(&order(), &report);
        assert!(html.contains("<td>@a:x</td><td>Keinen Strichlisten Benutzer gefunden</td>"));
    }

    #[test]
    fn article_table_lists_variants_then_extras() {
        let article = Article {
            number: String::new(),
            name: "Salat".to_string(),
            variants: vec![PriceOption::new("Klein", Decimal::new(450, 2))],
            extras: vec![PriceOption::new("Feta", Decimal::new(100, 2))],
        };
        let html = article_table(&article);
        let variants = html.find("Versionen").unwrap();
        let extras = html.find("Extras").unwrap();
        assert!(variants < extras);
        assert!(html.contains("<td>Feta</td><td>1.00</td>"));
    }
}
