//! 配置项相关类型定义

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// All stored settings, keyed by name
pub type SettingsMap = HashMap<String, String>;

/// Well-known setting names
pub mod keys {
    pub const CLIENT_ID: &str = "client_id";
    pub const CLIENT_SECRET: &str = "client_secret";
    pub const APPLICATION_NAME: &str = "application_name";
    pub const SYNC_SECRET: &str = "sync_secret";
    pub const CHECK_GTIN: &str = "check_gtin";
    pub const ATTRIBUTE_COLOR: &str = "attribute_color";
    pub const ATTRIBUTE_SIZE: &str = "attribute_size";
}

/// Settings whose values must not be stored or logged in clear text
pub const SENSITIVE_KEYS: [&str; 2] = [keys::CLIENT_SECRET, keys::SYNC_SECRET];

/// Whether a setting holds a secret
pub fn is_sensitive(key: &str) -> bool {
    SENSITIVE_KEYS.contains(&key)
}

/// Credentials handed to the shopping-ads API client
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfiguration {
    pub client_id: String,
    pub client_secret: String,
    pub application_name: String,
}

impl ApiConfiguration {
    /// Every field is required and must not be blank
    pub fn validate(&self) -> CoreResult<()> {
        for (name, value) in self.entries() {
            if value.trim().is_empty() {
                return Err(CoreError::ValidationError(format!(
                    "{name} must not be blank"
                )));
            }
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub(crate) fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (keys::CLIENT_ID, self.client_id.as_str()),
            (keys::CLIENT_SECRET, self.client_secret.as_str()),
            (keys::APPLICATION_NAME, self.application_name.as_str()),
        ]
    }
}

/// Product attribute mapping options
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MiscConfiguration {
    /// Skip products without a valid GTIN
    pub check_gtin: bool,
    /// Attribute ids that carry the product colour
    pub attribute_color: Vec<i64>,
    /// Attribute ids that carry the product size
    pub attribute_size: Vec<i64>,
}

/// Encode a boolean setting
pub(crate) fn encode_flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Decode a boolean setting; anything unrecognised is false
pub(crate) fn decode_flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "on" | "yes")
}

/// Encode an id list as a comma-joined string
pub(crate) fn encode_id_list(ids: &[i64]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode a comma-joined id list
pub(crate) fn decode_id_list(key: &str, value: &str) -> CoreResult<Vec<i64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>().map_err(|e| {
                CoreError::SerializationError(format!("Invalid id {part:?} in {key}: {e}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_sensitive() {
        assert!(is_sensitive(keys::CLIENT_SECRET));
        assert!(is_sensitive(keys::SYNC_SECRET));
        assert!(!is_sensitive(keys::CLIENT_ID));
        assert!(!is_sensitive(keys::ATTRIBUTE_SIZE));
    }

    #[test]
    fn api_configuration_rejects_blank_field() {
        let config = ApiConfiguration {
            client_id: "id".to_string(),
            client_secret: "  ".to_string(),
            application_name: "shop".to_string(),
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("client_secret"));
        assert!(!config.is_complete());
    }

    #[test]
    fn flags() {
        assert_eq!(encode_flag(true), "1");
        assert_eq!(encode_flag(false), "0");
        assert!(decode_flag("1"));
        assert!(decode_flag("true"));
        assert!(!decode_flag(""));
        assert!(!decode_flag("0"));
    }

    #[test]
    fn id_lists() {
        assert_eq!(encode_id_list(&[3, 7, 12]), "3,7,12");
        assert_eq!(encode_id_list(&[]), "");
        assert_eq!(decode_id_list("k", " 3, 7,,12 ").unwrap(), vec![3, 7, 12]);
        assert!(decode_id_list("k", "").unwrap().is_empty());
        assert!(matches!(
            decode_id_list("k", "3,x"),
            Err(CoreError::SerializationError(_))
        ));
    }
}
