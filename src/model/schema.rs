//! Package schemas and the namespace-partitioned registry
//!
//! A [`Schema`] is the package-level XML binding declaration. A
//! [`SchemaInfo`] aggregates everything contributing to one namespace:
//! packages, registries, type definitions, root and local element
//! declarations, and the implicit element/attribute declarations the
//! closure walker synthesizes.

use crate::declarations::{LocalElementDeclaration, PackageDeclaration, XmlNsForm};
use crate::model::type_definition::TypeDefinition;
use crate::namespaces::QName;
use indexmap::IndexMap;
use std::sync::Arc;

/// The package-level XML binding declaration
#[derive(Debug, Clone)]
pub struct Schema {
    /// Package qualified name
    pub qualified_name: String,
    /// Target namespace
    pub namespace: String,
    /// Element form default
    pub element_form_default: XmlNsForm,
    /// Attribute form default
    pub attribute_form_default: XmlNsForm,
    /// Namespace-to-prefix assignments specified on the package
    pub specified_prefixes: IndexMap<String, String>,
}

impl Schema {
    /// Create a schema with unset form defaults
    pub fn new(qualified_name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            namespace: namespace.into(),
            element_form_default: XmlNsForm::Unset,
            attribute_form_default: XmlNsForm::Unset,
            specified_prefixes: IndexMap::new(),
        }
    }

    /// Build the schema for a package declaration
    pub fn from_package(package: &PackageDeclaration) -> Self {
        Self {
            qualified_name: package.qualified_name.clone(),
            namespace: package.namespace.clone(),
            element_form_default: package.element_form_default,
            attribute_form_default: package.attribute_form_default,
            specified_prefixes: package.specified_prefixes.clone(),
        }
    }
}

/// A root element declaration: an XML element bound to a type, reachable
/// independently of any containing type
#[derive(Debug, Clone)]
pub struct RootElementDeclaration {
    /// Qualified name of the declaring host type (the declaration key)
    pub qualified_name: String,
    /// The element's XML qualified name
    pub name: QName,
    /// The package schema the element belongs to
    pub schema: Schema,
    /// The bound type definition, when the declaration carries one
    pub type_definition: Option<Arc<TypeDefinition>>,
}

impl RootElementDeclaration {
    /// The element's namespace
    pub fn namespace(&self) -> &str {
        &self.name.namespace
    }
}

/// An element declaration, keyed by class qualified name (root) or by a
/// scope-qualified key (local)
#[derive(Debug, Clone)]
pub enum ElementDeclaration {
    /// A root element declaration
    Root(Arc<RootElementDeclaration>),
    /// A local element declaration defined by a registry
    Local(LocalElementDeclaration),
}

impl ElementDeclaration {
    /// The declaration's map key
    pub fn key(&self) -> &str {
        match self {
            ElementDeclaration::Root(root) => &root.qualified_name,
            ElementDeclaration::Local(local) => &local.key,
        }
    }

    /// The declaration's namespace
    pub fn namespace(&self) -> &str {
        match self {
            ElementDeclaration::Root(root) => root.namespace(),
            ElementDeclaration::Local(local) => &local.namespace,
        }
    }
}

/// A synthesized namespace-level element declaration, required because a
/// member's effective namespace diverges from its owning type's namespace
#[derive(Debug, Clone, PartialEq)]
pub struct ImplicitSchemaElement {
    /// Element local name
    pub name: String,
    /// The namespace the element is declared in
    pub namespace: String,
    /// QName of the member's (adapter-resolved) XML type, when resolvable
    pub type_qname: Option<QName>,
    /// QName of the owning type definition, as provenance
    pub container_qname: QName,
    /// Whether the element is a wrapper around a wrapped member
    pub wrapped: bool,
}

/// A synthesized namespace-level attribute declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ImplicitSchemaAttribute {
    /// Attribute local name
    pub name: String,
    /// The namespace the attribute is declared in
    pub namespace: String,
    /// QName of the member's (adapter-resolved) XML type, when resolvable
    pub type_qname: Option<QName>,
    /// QName of the owning type definition, as provenance
    pub container_qname: QName,
}

/// The namespace-scoped aggregate of everything contributing to one schema
#[derive(Debug, Clone)]
pub struct SchemaInfo {
    /// The namespace prefix serving as the schema id
    pub id: String,
    /// The namespace
    pub namespace: String,
    /// Package schemas aggregated under this namespace
    pub packages: Vec<Schema>,
    /// Qualified names of registries contributing to this namespace
    pub registries: Vec<String>,
    /// Type definitions in this namespace
    pub type_definitions: Vec<Arc<TypeDefinition>>,
    /// Root element declarations in this namespace
    pub root_elements: Vec<Arc<RootElementDeclaration>>,
    /// Local element declarations in this namespace
    pub local_element_declarations: Vec<LocalElementDeclaration>,
    /// Implicit element declarations synthesized into this namespace
    pub implicit_schema_elements: Vec<ImplicitSchemaElement>,
    /// Implicit attribute declarations synthesized into this namespace
    pub implicit_schema_attributes: Vec<ImplicitSchemaAttribute>,
}

impl SchemaInfo {
    /// Create an empty aggregate for a namespace
    pub fn new(id: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            namespace: namespace.into(),
            packages: Vec::new(),
            registries: Vec::new(),
            type_definitions: Vec::new(),
            root_elements: Vec::new(),
            local_element_declarations: Vec::new(),
            implicit_schema_elements: Vec::new(),
            implicit_schema_attributes: Vec::new(),
        }
    }

    /// Whether a package schema is already aggregated, by qualified name
    pub fn has_package(&self, qualified_name: &str) -> bool {
        self.packages
            .iter()
            .any(|p| p.qualified_name == qualified_name)
    }

    /// Whether a type definition is already aggregated, by qualified name
    pub fn has_type_definition(&self, qualified_name: &str) -> bool {
        self.type_definitions
            .iter()
            .any(|t| t.qualified_name == qualified_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_from_package() {
        let package = PackageDeclaration::new("com.example")
            .with_namespace("urn:orders")
            .with_element_form_default(XmlNsForm::Qualified)
            .with_prefix("urn:orders", "ord");
        let schema = Schema::from_package(&package);
        assert_eq!(schema.qualified_name, "com.example");
        assert_eq!(schema.namespace, "urn:orders");
        assert_eq!(schema.element_form_default, XmlNsForm::Qualified);
        assert_eq!(schema.specified_prefixes.get("urn:orders").unwrap(), "ord");
    }

    #[test]
    fn test_schema_info_package_membership() {
        let mut info = SchemaInfo::new("ns0", "urn:orders");
        info.packages.push(Schema::new("com.example", "urn:orders"));
        assert!(info.has_package("com.example"));
        assert!(!info.has_package("com.other"));
    }

    #[test]
    fn test_element_declaration_keys() {
        let root = ElementDeclaration::Root(Arc::new(RootElementDeclaration {
            qualified_name: "com.example.Order".to_string(),
            name: QName::new("urn:orders", "order"),
            schema: Schema::new("com.example", "urn:orders"),
            type_definition: None,
        }));
        assert_eq!(root.key(), "com.example.Order");
        assert_eq!(root.namespace(), "urn:orders");

        let local = ElementDeclaration::Local(
            LocalElementDeclaration::new("com.example.Registry#createItem", "item", "urn:items"),
        );
        assert_eq!(local.key(), "com.example.Registry#createItem");
        assert_eq!(local.namespace(), "urn:items");
    }
}
