//! Model configuration
//!
//! External configuration consumed by the model context: namespace-to-prefix
//! overrides and per-package explicit type overrides. Loaded from a JSON
//! document.

use crate::error::Result;
use serde::Deserialize;
use std::collections::HashMap;

/// A namespace-to-prefix override
#[derive(Debug, Clone, Deserialize)]
pub struct NamespaceConfig {
    /// Namespace URI
    pub uri: String,
    /// Prefix to use for the namespace
    pub prefix: String,
}

/// Per-package explicit schema-type overrides
#[derive(Debug, Clone, Deserialize)]
pub struct PackageTypesConfig {
    /// Package qualified name
    pub package: String,
    /// Host type qualified name to schema type QName
    pub types: HashMap<String, String>,
}

/// Configuration for one model-construction run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelConfig {
    /// Namespace-to-prefix overrides
    #[serde(default)]
    pub namespaces: Vec<NamespaceConfig>,
    /// Per-package explicit type overrides
    #[serde(default)]
    pub package_types: Vec<PackageTypesConfig>,
}

impl ModelConfig {
    /// An empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a namespace-to-prefix override
    pub fn with_prefix(mut self, uri: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.namespaces.push(NamespaceConfig {
            uri: uri.into(),
            prefix: prefix.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "namespaces": [
                {"uri": "urn:orders", "prefix": "ord"},
                {"uri": "urn:items", "prefix": ""}
            ],
            "package_types": [
                {"package": "com.example", "types": {"com.example.Money": "xs:decimal"}}
            ]
        }"#;

        let config = ModelConfig::from_json(json).unwrap();
        assert_eq!(config.namespaces.len(), 2);
        assert_eq!(config.namespaces[0].uri, "urn:orders");
        assert_eq!(config.namespaces[0].prefix, "ord");
        assert_eq!(config.package_types.len(), 1);
        assert_eq!(
            config.package_types[0].types["com.example.Money"],
            "xs:decimal"
        );
    }

    #[test]
    fn test_defaults() {
        let config = ModelConfig::from_json("{}").unwrap();
        assert!(config.namespaces.is_empty());
        assert!(config.package_types.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(ModelConfig::from_json("{").is_err());
    }
}
