//! Smartsheet payload → canonical identity.

use skr_core::identity::CanonicalIdentity;
use skr_core::payload::ExternalUser;
use skr_core::smartsheet::{AVATAR_BASE_URL, SmartsheetUser};

use crate::error::SignInError;

/// Translates Smartsheet user payloads.
///
/// Field names are fixed by Smartsheet's API; only the avatar base URL can be
/// changed (e.g. for a regional Smartsheet deployment).
#[derive(Debug, Clone)]
pub struct SmartsheetTranslator {
    avatar_base_url: String,
}

impl Default for SmartsheetTranslator {
    fn default() -> Self {
        Self::new(AVATAR_BASE_URL)
    }
}

impl SmartsheetTranslator {
    #[must_use]
    pub fn new(avatar_base_url: impl Into<String>) -> Self {
        let mut avatar_base_url = avatar_base_url.into();
        while avatar_base_url.ends_with('/') {
            avatar_base_url.pop();
        }
        Self { avatar_base_url }
    }

    #[must_use]
    pub fn avatar_base_url(&self) -> &str {
        &self.avatar_base_url
    }

    /// Translate a framework-supplied OAuth2 user into a canonical identity.
    ///
    /// Tokens, expiry and the raw payload are carried over untouched.
    ///
    /// # Errors
    ///
    /// Returns `SignInError::MalformedPayload` if the payload does not decode
    /// as a Smartsheet user or carries no numeric `id`.
    pub fn translate(&self, user: &ExternalUser) -> Result<CanonicalIdentity, SignInError> {
        let smartsheet: SmartsheetUser = serde_json::from_value(user.raw_user.to_value())
            .map_err(|e| SignInError::MalformedPayload(e.to_string()))?;

        let id = smartsheet
            .id
            .ok_or_else(|| SignInError::MalformedPayload("missing numeric `id`".into()))?;

        let identity = CanonicalIdentity {
            id: id.to_string(),
            name: display_name(
                smartsheet.first_name.as_deref(),
                smartsheet.last_name.as_deref(),
            ),
            email: smartsheet.email.clone(),
            username: smartsheet.email.clone(),
            avatar_url: format!("{}/{}", self.avatar_base_url, smartsheet.image_id()),
            access_token: user.tokens.access_token.clone(),
            refresh_token: user.tokens.refresh_token.clone(),
            expiry: user.tokens.expiry,
            raw_user: user.raw_user.clone(),
        };

        tracing::debug!(id = %identity.id, email = %identity.email, "translated smartsheet user");
        Ok(identity)
    }
}

/// First name, then a space and the last name when there is one.
///
/// The space is written whenever a last name is present, so a user with only
/// a last name gets a leading space.
#[must_use]
pub fn display_name(first: Option<&str>, last: Option<&str>) -> String {
    let mut name = String::from(first.unwrap_or_default());
    if let Some(last) = last {
        name.push(' ');
        name.push_str(last);
    }
    name
}
