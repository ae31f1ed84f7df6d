//! Bulk insert of grocery rows through the Supabase REST interface.

use reqwest::Client;
use tracing::{debug, error, info};

use crate::error::StoreError;
use crate::models::config::StoreConfig;
use crate::models::row::GroceryItemRow;

/// Supabase table client for `grocery_items` style tables.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    service_role_key: String,
    table: String,
}

impl SupabaseStore {
    pub fn new(
        base_url: impl Into<String>,
        service_role_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_role_key: service_role_key.into(),
            table: table.into(),
        }
    }

    /// Build a store from config; `None` unless URL and key are both set.
    pub fn from_config(config: &StoreConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let url = config.url.as_deref()?;
        let key = config.service_role_key.as_deref()?;
        Some(Self::new(url, key, config.table.as_str()))
    }

    /// Destination table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// REST endpoint rows are posted to.
    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// Insert all rows in one request. An empty slice is a no-op.
    ///
    /// Returns the number of rows sent. Failures are not retried.
    pub async fn insert_rows(&self, rows: &[GroceryItemRow]) -> Result<usize, StoreError> {
        if rows.is_empty() {
            info!("No rows to insert.");
            return Ok(0);
        }

        let url = self.endpoint();
        debug!("Posting {} rows to {}", rows.len(), url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Error inserting grocery rows: {} {}", status, message);
            return Err(StoreError::Rejected {
                table: self.table.clone(),
                status: status.as_u16(),
                message,
            });
        }

        info!("Inserted {} rows into {}", rows.len(), self.table);
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_config_requires_both_settings() {
        let mut config = StoreConfig::default();
        assert!(SupabaseStore::from_config(&config).is_none());

        config.url = Some("https://example.supabase.co/".to_string());
        assert!(SupabaseStore::from_config(&config).is_none());

        config.service_role_key = Some("secret".to_string());
        let store = SupabaseStore::from_config(&config).unwrap();
        assert_eq!(store.table(), "grocery_items");
        assert_eq!(store.endpoint(), "https://example.supabase.co/rest/v1/grocery_items");
    }

    #[tokio::test]
    async fn test_insert_empty_rows_is_noop() {
        // Unroutable address: any request would fail.
        let store = SupabaseStore::new("http://127.0.0.1:9", "secret", "grocery_items");
        assert_eq!(store.insert_rows(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        let store = SupabaseStore::new("http://127.0.0.1:9", "secret", "grocery_items");
        let rows = crate::mapping::map_rows(
            &crate::invoice::parse_woolworths_invoice(
                "Line Description Ordered Supplied Price Amount\n1 Rice 1kg 1 1 $2.00 $2.00",
            ),
            "user-1",
        );
        assert_eq!(rows.len(), 1);
        assert!(matches!(store.insert_rows(&rows).await, Err(StoreError::Http(_))));
    }
}
