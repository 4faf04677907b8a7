//! Smartsheet user model.
//!
//! Mirrors the JSON body of Smartsheet's `GET /users/me`. Every field except
//! `email` is optional on the wire; `id` is optional here too so that a
//! missing id surfaces as a translation error rather than a decode error
//! with a less useful message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Smartsheet serves profile images from this prefix, followed by `/{imageId}`.
pub const AVATAR_BASE_URL: &str = "https://aws.smartsheet.com/storageProxy/image/images";

/// Decode a field so that an explicit `null` yields the type's default, like
/// a missing key does.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A Smartsheet user as returned by the provider's user endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SmartsheetUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<SmartsheetAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub alternate_emails: Vec<AlternateEmail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_welcome_screen_viewed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub licensed_sheet_creator: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    #[serde(default)]
    pub profile_image: Option<ProfileImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_viewer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salesforce_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salesforce_user: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_phone: Option<String>,
}

impl SmartsheetUser {
    /// Image identifier of the profile picture, or `""` when none was set.
    #[must_use]
    pub fn image_id(&self) -> &str {
        self.profile_image
            .as_ref()
            .map_or("", |image| image.image_id.as_str())
    }
}

/// The organization account a user belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SmartsheetAccount {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlternateEmail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confirmed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_full_profile() {
        let user: SmartsheetUser = serde_json::from_value(serde_json::json!({
            "id": 48_569_348_493_401_i64,
            "account": { "id": 8, "name": "Arcturis" },
            "admin": true,
            "alternateEmails": [{ "id": 3, "confirmed": true, "email": "alt@x.com" }],
            "email": "grace@x.com",
            "firstName": "Grace",
            "lastName": "Hopper",
            "groupAdmin": true,
            "lastLogin": "2024-03-01T12:00:00Z",
            "locale": "en_US",
            "profileImage": { "imageId": "u!1!abc", "height": 1050, "width": 1050 },
            "sheetCount": 12,
            "timeZone": "US/Pacific"
        }))
        .unwrap();

        assert_eq!(user.id, Some(48_569_348_493_401));
        assert_eq!(user.account.as_ref().map(|a| a.name.as_str()), Some("Arcturis"));
        assert_eq!(user.alternate_emails.len(), 1);
        assert!(user.group_admin);
        assert_eq!(user.image_id(), "u!1!abc");
        assert_eq!(user.sheet_count, Some(12));
        assert!(user.last_login.is_some());
    }

    #[test]
    fn minimal_profile_uses_defaults() {
        let user: SmartsheetUser =
            serde_json::from_value(serde_json::json!({ "id": 1, "email": "a@b.c" })).unwrap();
        assert!(!user.group_admin);
        assert!(user.first_name.is_none());
        assert_eq!(user.image_id(), "");
    }

    #[test]
    fn null_profile_image_is_accepted() {
        let user: SmartsheetUser = serde_json::from_value(serde_json::json!({
            "id": 1,
            "email": "a@b.c",
            "profileImage": null
        }))
        .unwrap();
        assert_eq!(user.image_id(), "");
    }

    #[test]
    fn explicit_nulls_decode_as_defaults() {
        let user: SmartsheetUser = serde_json::from_value(serde_json::json!({
            "id": 1,
            "email": "a@b.c",
            "account": { "id": null, "name": null },
            "alternateEmails": null,
            "groupAdmin": null,
            "profileImage": { "imageId": null, "height": null, "width": null }
        }))
        .unwrap();
        assert_eq!(user.account, Some(SmartsheetAccount::default()));
        assert!(user.alternate_emails.is_empty());
        assert!(!user.group_admin);
        assert_eq!(user.profile_image, Some(ProfileImage::default()));
        assert_eq!(user.image_id(), "");
    }

    #[test]
    fn null_fields_inside_alternate_emails() {
        let user: SmartsheetUser = serde_json::from_value(serde_json::json!({
            "id": 1,
            "email": "a@b.c",
            "alternateEmails": [{ "id": null, "confirmed": null, "email": "alt@x.com" }]
        }))
        .unwrap();
        assert_eq!(
            user.alternate_emails,
            vec![AlternateEmail {
                id: 0,
                confirmed: false,
                email: "alt@x.com".into(),
            }]
        );
    }

    #[test]
    fn missing_email_is_rejected() {
        let result = serde_json::from_value::<SmartsheetUser>(serde_json::json!({ "id": 1 }));
        assert!(result.is_err());
    }
}
