//! Configuration structures for the import pipeline.
//!
//! Values are resolved once at the process boundary: a JSON file (optional)
//! is loaded first, then environment variables override it. The resolved
//! config is passed explicitly into the mapper, store and upload handler.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable holding the Supabase project URL.
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
/// Environment variable holding the Supabase service role key.
pub const ENV_SUPABASE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
/// Environment variable overriding the destination table.
pub const ENV_GROCERY_TABLE: &str = "SUPABASE_GROCERY_TABLE";
/// Environment variable holding the user id rows are attributed to.
pub const ENV_DEFAULT_USER_ID: &str = "DEFAULT_USER_ID";

/// Main configuration for the covered pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoveredConfig {
    /// Row store configuration.
    pub store: StoreConfig,

    /// Row mapping configuration.
    pub mapping: MappingConfig,

    /// Upload handler configuration.
    pub upload: UploadConfig,
}

/// Supabase connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: Option<String>,

    /// Service role key used for inserts.
    pub service_role_key: Option<String>,

    /// Destination table name.
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            service_role_key: None,
            table: "grocery_items".to_string(),
        }
    }
}

impl StoreConfig {
    /// Both connection settings are present and non-empty.
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.url) && present(&self.service_role_key)
    }
}

/// Row mapping settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// User id rows are attributed to.
    pub default_user_id: Option<String>,
}

/// Upload handler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// User id used when no default user id is configured.
    pub fallback_user_id: String,

    /// Include the first N characters of extracted text in the response.
    pub text_preview_chars: Option<usize>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            fallback_user_id: "demo-user".to_string(),
            text_preview_chars: None,
        }
    }
}

impl CoveredConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::Invalid(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_SUPABASE_URL) {
            self.store.url = Some(url);
        }
        if let Some(key) = get(ENV_SUPABASE_KEY) {
            self.store.service_role_key = Some(key);
        }
        if let Some(table) = get(ENV_GROCERY_TABLE) {
            self.store.table = table;
        }
        if let Some(user_id) = get(ENV_DEFAULT_USER_ID) {
            self.mapping.default_user_id = Some(user_id);
        }
        self
    }

    /// The configured user id, required before any rows are mapped.
    pub fn require_user_id(&self) -> Result<&str, ConfigError> {
        self.mapping
            .default_user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::Missing(ENV_DEFAULT_USER_ID))
    }

    /// User id for the upload handler, falling back to the demo user.
    pub fn upload_user_id(&self) -> &str {
        self.require_user_id()
            .unwrap_or(self.upload.fallback_user_id.as_str())
    }
}
