//! Presentation-side pricing: tip suggestions and the phone call script.

use rust_decimal::Decimal;

use super::{LineItem, Order};

/// Rounded totals to suggest when paying the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TipSuggestions {
    pub total: Decimal,
    pub rounded_up: Decimal,
    pub five_percent: Decimal,
    pub ten_percent: Decimal,
    pub twenty_percent: Decimal,
}

impl TipSuggestions {
    pub fn for_total(total: Decimal) -> Self {
        Self {
            total,
            rounded_up: total.ceil(),
            five_percent: round_half_up(total * Decimal::new(105, 2)),
            ten_percent: round_half_up(total * Decimal::new(110, 2)),
            twenty_percent: round_half_up(total * Decimal::new(120, 2)),
        }
    }
}

/// `floor(value + 0.5)` at whole currency units.
fn round_half_up(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}

/// Merges equivalent lines, summing quantities and concatenating orderers.
///
/// The first occurrence keeps its position and its orderer of record.
pub fn merge_equivalent(items: &[LineItem]) -> Vec<LineItem> {
    let mut merged: Vec<LineItem> = Vec::new();
    for item in items {
        match merged.iter_mut().find(|m| m.is_equivalent(item)) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                existing.additional_orderers.extend(item.orderers().cloned());
            }
            None => merged.push(item.clone()),
        }
    }
    merged
}

fn call_sentence(item: &LineItem) -> String {
    let mut sentence = if item.article_number.is_empty() {
        format!("{} mal {}", item.quantity, item.article_name)
    } else {
        format!(
            "{} mal die Nummer {} {}",
            item.quantity, item.article_number, item.article_name
        )
    };
    sentence.push_str(&format!(" in {}", item.variant));
    if !item.extras.is_empty() {
        sentence.push_str(&format!(" mit {}", item.extras));
    }
    if !item.comment.is_empty() {
        sentence.push_str(&format!(" ({})", item.comment));
    }
    sentence
}

/// Text to read out on the phone when placing the order.
pub fn call_text(order: &Order) -> String {
    let mut text = format!(
        "Lieferdienst: {}\nTelefonnummer: {}\n\nHallo, ich würde gerne bestellen und zwar:\n",
        order.delivery_service, order.phone_number
    );
    for item in merge_equivalent(&order.line_items) {
        text.push_str(&call_sentence(&item));
        text.push('\n');
    }
    text
}
