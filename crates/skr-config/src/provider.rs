//! OAuth2 provider and target collection configuration.

use serde::{Deserialize, Serialize};

use skr_core::smartsheet::AVATAR_BASE_URL as SMARTSHEET_AVATAR_BASE_URL;

use crate::error::ConfigError;

fn default_name() -> String {
    "smartsheet".to_string()
}

fn default_avatar_base_url() -> String {
    SMARTSHEET_AVATAR_BASE_URL.to_string()
}

fn default_collection_id() -> String {
    "_pb_users_auth_".to_string()
}

fn default_collection_name() -> String {
    "users".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Provider name recorded on external-auth links.
    #[serde(default = "default_name")]
    pub name: String,

    /// Prefix for avatar URLs, without the trailing slash.
    #[serde(default = "default_avatar_base_url")]
    pub avatar_base_url: String,

    /// Id of the auth collection accounts are written to.
    #[serde(default = "default_collection_id")]
    pub collection_id: String,

    /// Name of the auth collection accounts are written to.
    #[serde(default = "default_collection_name")]
    pub collection_name: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            avatar_base_url: default_avatar_base_url(),
            collection_id: default_collection_id(),
            collection_name: default_collection_name(),
        }
    }
}

impl ProviderConfig {
    /// Reject values the sign-in hook cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("provider.name", &self.name),
            ("provider.collection_id", &self.collection_id),
            ("provider.avatar_base_url", &self.avatar_base_url),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if !self.avatar_base_url.starts_with("http://")
            && !self.avatar_base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "provider.avatar_base_url".to_string(),
                reason: format!("'{}' is not an http(s) URL", self.avatar_base_url),
            });
        }
        Ok(())
    }
}
