//! Destination row shape of the `grocery_items` table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit written to every row. The invoice carries no unit information.
pub const DEFAULT_UNIT: &str = "each";

/// A row of the grocery tracking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItemRow {
    pub user_id: String,
    pub item_name: String,
    pub category: Option<String>,
    pub last_purchased: Option<String>,

    /// Never populated from invoices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<i64>,

    pub woolworths_product_id: Option<String>,
    pub coles_product_id: Option<String>,

    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    pub quantity: u32,
    pub unit: String,
    pub source: String,
    pub image_url: Option<String>,
    pub expiration_date: Option<String>,
    pub used: bool,
    pub category_id: Option<i64>,
    pub invoice_id: Option<i64>,
}
