//! Mapping of parsed invoices onto `grocery_items` rows.

use crate::models::invoice::{ParsedInvoice, Retailer};
use crate::models::row::{GroceryItemRow, DEFAULT_UNIT};

/// Destination category for fresh produce.
pub const FRUIT_VEG_CATEGORY: &str = "Fruit/Veg";

/// Map an invoice category onto the destination category set.
pub fn map_category(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.to_lowercase().contains("fruit & vegetables") {
        return Some(FRUIT_VEG_CATEGORY.to_string());
    }
    Some(raw.to_string())
}

/// Converts parsed invoices into destination rows.
#[derive(Debug, Clone)]
pub struct RowMapper {
    source: String,
}

impl RowMapper {
    pub fn new() -> Self {
        Self::for_retailer(Retailer::Woolworths)
    }

    pub fn for_retailer(retailer: Retailer) -> Self {
        Self {
            source: retailer.source_tag().to_string(),
        }
    }

    /// Override the `source` tag written to each row.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// One row per item, in item order.
    pub fn map(&self, invoice: &ParsedInvoice, user_id: &str) -> Vec<GroceryItemRow> {
        let last_purchased = invoice.meta.date.clone();
        let invoice_id = invoice
            .meta
            .invoice_number
            .as_deref()
            .and_then(|n| n.trim().parse::<i64>().ok());

        invoice
            .items
            .iter()
            .map(|item| GroceryItemRow {
                user_id: user_id.to_string(),
                item_name: item.description.clone(),
                category: map_category(item.category.as_deref()),
                last_purchased: last_purchased.clone(),
                frequency: None,
                woolworths_product_id: None,
                coles_product_id: None,
                price: item.unit_price,
                quantity: item.supplied_qty,
                unit: DEFAULT_UNIT.to_string(),
                source: self.source.clone(),
                image_url: None,
                expiration_date: None,
                used: false,
                category_id: None,
                invoice_id,
            })
            .collect()
    }
}

impl Default for RowMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a parsed invoice with the default Woolworths source tag.
pub fn map_rows(invoice: &ParsedInvoice, user_id: &str) -> Vec<GroceryItemRow> {
    RowMapper::new().map(invoice, user_id)
}
