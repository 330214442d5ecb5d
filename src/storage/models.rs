use serde::{Deserialize, Serialize};

use crate::errors::{ImsakiaError, Result};

/// Cities offered by the admin form. Advisory only: the data layer accepts
/// any string, these just populate the form's dropdown.
pub const CITIES: &[&str] = &["القاهرة", "الإسكندرية", "الرياض", "دبي"];

/// Branding and contact record shown on a resolved page.
///
/// Everything except `name` is optional. Contact numbers are free-form;
/// consumers choose their own formats and nothing here validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClientProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapchat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// The persisted unit of storage: a slug and its serialized profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub slug: String,
    pub payload: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Decode a stored payload into a [`ClientProfile`].
///
/// Payloads written by older clients are sometimes double-encoded: the JSON
/// value is a string that itself contains the profile JSON. Both shapes must
/// decode to the same profile, so the shape is inspected exactly once here
/// instead of at every call site.
pub fn decode_payload(raw: &str) -> Result<ClientProfile> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| ImsakiaError::payload_decode(format!("payload is not valid JSON: {}", e)))?;

    match value {
        serde_json::Value::String(inner) => serde_json::from_str(&inner).map_err(|e| {
            ImsakiaError::payload_decode(format!("string payload is not a profile: {}", e))
        }),
        object @ serde_json::Value::Object(_) => serde_json::from_value(object).map_err(|e| {
            ImsakiaError::payload_decode(format!("object payload is not a profile: {}", e))
        }),
        other => Err(ImsakiaError::payload_decode(format!(
            "unexpected payload shape: {}",
            match other {
                serde_json::Value::Null => "null",
                serde_json::Value::Bool(_) => "bool",
                serde_json::Value::Number(_) => "number",
                serde_json::Value::Array(_) => "array",
                _ => "unknown",
            }
        ))),
    }
}
