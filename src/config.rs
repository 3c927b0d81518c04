//! Loader configuration.
//!
//! Every field has a default, so a configuration document only needs the
//! keys it changes:
//!
//! ```
//! use amf_typeloader::LoaderConfig;
//!
//! let config = LoaderConfig::from_json(r#"{
//!     "known_types": ["app::User"],
//!     "max_chain_depth": null
//! }"#).unwrap();
//!
//! assert_eq!(config.mappings.len(), 6);
//! assert_eq!(config.max_chain_depth, None);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mapping::{TypeMapping, PLACEHOLDER_TYPE};
use crate::resource::DEFAULT_MAX_CHAIN_DEPTH;

/// Configuration for a [`TypeLoader`](crate::TypeLoader).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Default wire name table, restored by `reset_map`.
    pub mappings: TypeMapping,
    /// Native identifiers the host can construct, in addition to the
    /// natives of `mappings`.
    pub known_types: Vec<String>,
    /// Returned by `load_type` when nothing resolves.
    pub placeholder_type: String,
    /// Maximum resource conversion steps, `None` for unbounded.
    pub max_chain_depth: Option<usize>,
}

impl LoaderConfig {
    /// Parse a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the document is malformed or has
    /// unknown keys.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            mappings: TypeMapping::amf_defaults(),
            known_types: Vec::new(),
            placeholder_type: PLACEHOLDER_TYPE.to_string(),
            max_chain_depth: Some(DEFAULT_MAX_CHAIN_DEPTH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_document_is_default() {
        let config = LoaderConfig::from_json("{}").unwrap();
        assert_eq!(config, LoaderConfig::default());
        assert_eq!(config.max_chain_depth, Some(DEFAULT_MAX_CHAIN_DEPTH));
    }

    #[test]
    fn test_custom_mappings_replace_defaults() {
        let config = LoaderConfig::from_json(
            r#"{
                "mappings": [{ "wire": "com.example.User", "native": "app::User" }],
                "placeholder_type": "app::Dynamic",
                "max_chain_depth": 8
            }"#,
        )
        .unwrap();

        assert_eq!(config.mappings.len(), 1);
        assert_eq!(config.mappings.get("com.example.User"), Some("app::User"));
        assert_eq!(config.placeholder_type, "app::Dynamic");
        assert_eq!(config.max_chain_depth, Some(8));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = LoaderConfig::from_json(r#"{ "max_depth": 3 }"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = LoaderConfig::from_json("{ not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().starts_with("Invalid loader configuration"));
    }
}
