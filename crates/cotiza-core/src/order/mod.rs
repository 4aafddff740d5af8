//! Purchase-order assembly from an extracted quotation.
//!
//! The purchase order is a presentation model: every value is a display
//! string ready for a renderer. Prices are reformatted in the Chilean
//! convention, totals are copied from the quotation as printed.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OrderError;
use crate::format::{clean_price, format_thousands, format_thousands_with_decimals};
use crate::models::config::{BuyerProfile, OrderConfig, PartyProfile};
use crate::models::quotation::{display_field, LineItem, QuotationRecord, NOT_FOUND};

/// A purchase order ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Document title, e.g. "ORDEN DE COMPRA 4500123".
    pub title: String,
    pub order_number: String,
    /// Issue date formatted with the configured format.
    pub issue_date: String,
    /// Purchasing entity.
    pub buyer: BuyerProfile,
    /// Buyer address and commune, uppercased.
    pub buyer_address_line: String,
    /// Supplier identity block.
    pub supplier: PartyProfile,
    /// Quotation the order was built from.
    pub quotation_number: String,
    pub client_name: String,
    pub rows: Vec<OrderRow>,
    pub totals: OrderTotals,
}

/// One product row of the purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRow {
    /// Part number (material code).
    pub material_code: String,
    pub description: String,
    pub quantity: String,
    pub unit: String,
    /// Unit price, two decimals.
    pub unit_price: String,
    /// Line total, integer part only.
    pub line_total: String,
}

/// Totals block of the purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// "NETO", the quotation subtotal.
    pub net: String,
    /// "IVA".
    pub tax: String,
    /// "TOTAL".
    pub total: String,
}

impl PurchaseOrder {
    /// Build a purchase order from a quotation record.
    pub fn build(
        record: &QuotationRecord,
        order_number: &str,
        buyer: &BuyerProfile,
        settings: &OrderConfig,
        issue_date: NaiveDate,
    ) -> Result<Self, OrderError> {
        let order_number = order_number.trim();
        if order_number.is_empty() {
            return Err(OrderError::MissingOrderNumber);
        }

        let mut date = String::new();
        write!(date, "{}", issue_date.format(&settings.date_format))
            .map_err(|_| OrderError::InvalidDateFormat(settings.date_format.clone()))?;

        let rows: Vec<OrderRow> = record
            .line_items
            .iter()
            .map(|item| OrderRow::from_item(item, settings))
            .collect();

        let totals = match &record.totals {
            Some(t) => OrderTotals {
                net: t.subtotal.clone(),
                tax: t.tax.clone(),
                total: t.total_final.clone(),
            },
            None => OrderTotals {
                net: NOT_FOUND.to_string(),
                tax: NOT_FOUND.to_string(),
                total: NOT_FOUND.to_string(),
            },
        };

        debug!(
            "Built purchase order {} for {} with {} rows",
            order_number,
            buyer.key,
            rows.len()
        );

        Ok(Self {
            title: format!("ORDEN DE COMPRA {}", order_number),
            order_number: order_number.to_string(),
            issue_date: date,
            buyer: buyer.clone(),
            buyer_address_line: buyer_address_line(buyer),
            supplier: settings.supplier.clone(),
            quotation_number: display_field(&record.quotation_number).to_string(),
            client_name: display_field(&record.client_name).to_string(),
            rows,
            totals,
        })
    }

    /// File name a renderer should use for this order.
    pub fn suggested_file_name(&self) -> String {
        format!("ORDEN_DE_COMPRA_{}.pdf", self.order_number)
    }
}

impl OrderRow {
    fn from_item(item: &LineItem, settings: &OrderConfig) -> Self {
        let unit_price = clean_price(item.price(settings.columns.unit_price));
        let line_total = clean_price(item.price(settings.columns.line_total));

        Self {
            material_code: item.material_code.clone(),
            description: item.description.clone(),
            quantity: item.quantity.clone(),
            unit: item.unit.clone(),
            unit_price: format_thousands_with_decimals(&unit_price),
            line_total: format_thousands(&line_total),
        }
    }
}

fn buyer_address_line(buyer: &BuyerProfile) -> String {
    let mut line = buyer.address.trim().to_string();
    if let Some(commune) = buyer.commune.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(commune);
    }
    line.to_uppercase()
}
