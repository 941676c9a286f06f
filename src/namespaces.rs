//! XML namespace handling
//!
//! This module provides qualified names (QNames) and the namespace-to-prefix
//! registry used by the model. The registry is seeded with well-known
//! WSDL/SOAP/XML-Schema/WADL namespaces, accepts user overrides, and
//! auto-generates unused prefixes on demand.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI (empty string for no namespace)
    pub namespace: NamespaceUri,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: String::new(),
            local_name: local_name.into(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local_name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local_name)
        }
    }
}

// Simplified NCName check, sufficient for prefix validation
static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}][A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\-\.0-9]*$")
        .unwrap()
});

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    !name.is_empty() && !name.contains(':') && NCNAME.is_match(name)
}

/// Registry mapping namespace URIs to shorthand prefixes.
///
/// Prefix resolution is deterministic and stable within one run: lookups
/// hit an insertion-ordered map, and generated prefixes come from a
/// monotonic counter that is never reused.
#[derive(Debug, Clone)]
pub struct PrefixRegistry {
    prefixes: IndexMap<NamespaceUri, Prefix>,
    prefix_index: usize,
}

impl PrefixRegistry {
    /// Create a registry seeded with the well-known namespace prefixes
    pub fn new() -> Self {
        let mut prefixes = IndexMap::new();
        prefixes.insert("http://schemas.xmlsoap.org/wsdl/".to_string(), "wsdl".to_string());
        prefixes.insert("http://schemas.xmlsoap.org/wsdl/http/".to_string(), "http".to_string());
        prefixes.insert("http://schemas.xmlsoap.org/wsdl/mime/".to_string(), "mime".to_string());
        prefixes.insert("http://schemas.xmlsoap.org/wsdl/soap/".to_string(), "soap".to_string());
        prefixes.insert(
            "http://schemas.xmlsoap.org/soap/encoding/".to_string(),
            "soapenc".to_string(),
        );
        prefixes.insert("http://www.w3.org/2001/XMLSchema".to_string(), "xs".to_string());
        prefixes.insert(
            "http://www.w3.org/2001/XMLSchema-instance".to_string(),
            "xsi".to_string(),
        );
        prefixes.insert("http://ws-i.org/profiles/basic/1.1/xsd".to_string(), "wsi".to_string());
        prefixes.insert("http://wadl.dev.java.net/2009/02".to_string(), "wadl".to_string());
        prefixes.insert("http://www.w3.org/XML/1998/namespace".to_string(), "xml".to_string());

        Self {
            prefixes,
            prefix_index: 0,
        }
    }

    /// Apply user-configured overrides on top of the seed table.
    ///
    /// An empty or non-NCName prefix is rejected with a warning and the
    /// namespace keeps its auto-generation eligibility.
    pub fn apply_overrides<I, U, P>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        for (uri, prefix) in overrides {
            let uri = uri.into();
            let prefix = prefix.into();
            if prefix.is_empty() {
                log::warn!("ignored empty prefix configuration for namespace {}", uri);
                continue;
            }
            if !is_valid_ncname(&prefix) {
                log::warn!(
                    "ignored prefix configuration '{}' for namespace {}: not a valid NCName",
                    prefix,
                    uri
                );
                continue;
            }
            self.prefixes.insert(uri, prefix);
        }
    }

    /// Get the prefix for a namespace, if one is already assigned
    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.prefixes.get(namespace).map(|s| s.as_str())
    }

    /// Get the prefix for a namespace, generating one if needed
    pub fn resolve(&mut self, namespace: &str) -> &str {
        if !self.prefixes.contains_key(namespace) {
            let prefix = self.generate_prefix();
            self.prefixes.insert(namespace.to_string(), prefix);
        }
        self.prefixes.get(namespace).unwrap()
    }

    /// Record an explicit namespace-to-prefix assignment
    pub fn assign(&mut self, namespace: impl Into<String>, prefix: impl Into<String>) {
        self.prefixes.insert(namespace.into(), prefix.into());
    }

    /// Generate a fresh `ns{n}` prefix. The counter is monotonic and never
    /// reused, even if a generated prefix is later removed.
    fn generate_prefix(&mut self) -> Prefix {
        loop {
            let prefix = format!("ns{}", self.prefix_index);
            self.prefix_index += 1;
            if !self.prefixes.values().any(|p| p == &prefix) {
                return prefix;
            }
        }
    }

    /// All namespace-to-prefix assignments, in insertion order
    pub fn assignments(&self) -> &IndexMap<NamespaceUri, Prefix> {
        &self.prefixes
    }
}

impl Default for PrefixRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_qname_display() {
        let qname = QName::new("http://example.com", "element");
        assert_eq!(qname.to_string(), "{http://example.com}element");

        let qname_local = QName::local("element");
        assert_eq!(qname_local.to_string(), "element");
    }

    #[test]
    fn test_seeded_prefixes() {
        let registry = PrefixRegistry::new();
        assert_eq!(registry.prefix("http://www.w3.org/2001/XMLSchema"), Some("xs"));
        assert_eq!(registry.prefix("http://schemas.xmlsoap.org/wsdl/"), Some("wsdl"));
        assert_eq!(registry.prefix("http://wadl.dev.java.net/2009/02"), Some("wadl"));
    }

    #[test]
    fn test_generated_prefixes_are_distinct() {
        let mut registry = PrefixRegistry::new();
        let first = registry.resolve("urn:first").to_string();
        let second = registry.resolve("urn:second").to_string();
        assert_eq!(first, "ns0");
        assert_eq!(second, "ns1");
        // resolving again is stable
        assert_eq!(registry.resolve("urn:first"), "ns0");
    }

    #[test]
    fn test_generation_skips_used_prefixes() {
        let mut registry = PrefixRegistry::new();
        registry.assign("urn:configured", "ns0");
        let generated = registry.resolve("urn:fresh").to_string();
        assert_eq!(generated, "ns1");
    }

    #[test]
    fn test_empty_override_ignored() {
        let mut registry = PrefixRegistry::new();
        registry.apply_overrides(vec![("urn:empty", ""), ("urn:ok", "ex")]);
        assert_eq!(registry.prefix("urn:empty"), None);
        assert_eq!(registry.prefix("urn:ok"), Some("ex"));
    }

    #[test]
    fn test_invalid_ncname_override_ignored() {
        let mut registry = PrefixRegistry::new();
        registry.apply_overrides(vec![("urn:bad", "1st"), ("urn:colon", "a:b")]);
        assert_eq!(registry.prefix("urn:bad"), None);
        assert_eq!(registry.prefix("urn:colon"), None);
    }

    #[test]
    fn test_override_before_first_reference_is_honored() {
        let mut registry = PrefixRegistry::new();
        registry.apply_overrides(vec![("urn:mine", "mine")]);
        assert_eq!(registry.resolve("urn:mine"), "mine");
    }
}
