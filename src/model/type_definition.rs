//! Type definitions
//!
//! A type definition is the schema-level structural description derived
//! from one host type declaration: complex, simple, enum, or QName-enum.
//! Identity is fixed at creation; the closure walker only appends
//! provenance entries before registering a definition.

use crate::declarations::{
    decapitalize, Constructor, MemberKind, TypeDeclaration, TypeRef,
};
use crate::model::accessors::{Attribute, Element, Value};
use crate::model::schema::Schema;
use crate::namespaces::QName;

/// The kind of a type definition
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinitionKind {
    /// A structured type with attributes and elements
    Complex,
    /// A single-value type (complex shape downgraded to a value-only type)
    Simple,
    /// An enumeration
    Enum {
        /// The enumeration constants
        constants: Vec<String>,
    },
    /// An enumeration mapped to QName values
    QNameEnum {
        /// The enumeration constants
        constants: Vec<String>,
    },
}

/// The schema-level description of one host type declaration
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    /// Qualified name of the host declaration
    pub qualified_name: String,
    /// XML local name of the type
    pub name: String,
    /// Owning namespace
    pub namespace: String,
    /// Kind of the definition
    pub kind: TypeDefinitionKind,
    /// Attribute members, in declaration order
    pub attributes: Vec<Attribute>,
    /// Element members, in declaration order
    pub elements: Vec<Element>,
    /// The text-content value member, if any
    pub value: Option<Value>,
    /// QName-enum reference of an anyAttribute member, if any
    pub any_attribute_qname_enum_ref: Option<TypeRef>,
    /// Superclass reference, absent for the universal base type
    pub superclass: Option<TypeRef>,
    /// The package-level schema declaration the type belongs to
    pub schema: Schema,
    /// Whether the declaration is annotated as a root element
    pub root_element: bool,
    /// Explicit root element name, if any
    pub root_element_name: Option<String>,
    /// Explicit root element namespace, if any
    pub root_element_namespace: Option<String>,
    /// "See also" hints
    pub see_also: Vec<String>,
    /// Provenance: display names of the declarations this type was
    /// referenced from, for diagnostics
    pub referenced_from: Vec<String>,
    /// Constructors of the host declaration, for validator passes
    pub constructors: Vec<Constructor>,
    /// Owning package qualified name
    pub package: String,
    /// Marked transient for target-format mapping
    pub transient: bool,
}

impl TypeDefinition {
    /// Build a complex type definition from a class declaration
    pub fn complex(declaration: &TypeDeclaration, schema: Schema) -> Self {
        let namespace = declaration
            .annotations
            .xml_type
            .as_ref()
            .and_then(|t| t.namespace.clone())
            .unwrap_or_else(|| schema.namespace.clone());
        let name = declaration
            .annotations
            .xml_type
            .as_ref()
            .and_then(|t| t.name.clone())
            .unwrap_or_else(|| decapitalize(&declaration.simple_name));

        let mut attributes = Vec::new();
        let mut elements = Vec::new();
        let mut value = None;
        let mut any_attribute_qname_enum_ref = None;

        for member in &declaration.members {
            match &member.kind {
                MemberKind::Attribute => {
                    attributes.push(Attribute::from_member(
                        member,
                        &namespace,
                        schema.attribute_form_default,
                    ));
                }
                MemberKind::Element(_) => {
                    elements.push(Element::from_member(
                        member,
                        &namespace,
                        schema.element_form_default,
                    ));
                }
                MemberKind::Value => {
                    value = Some(Value::from_member(
                        member,
                        &namespace,
                        schema.element_form_default,
                    ));
                }
                MemberKind::AnyAttribute => {
                    any_attribute_qname_enum_ref = member.qname_enum_ref.clone();
                }
            }
        }

        Self {
            qualified_name: declaration.qualified_name.clone(),
            name,
            namespace,
            kind: TypeDefinitionKind::Complex,
            attributes,
            elements,
            value,
            any_attribute_qname_enum_ref,
            superclass: declaration.superclass.clone(),
            schema,
            root_element: declaration.annotations.root_element.is_some(),
            root_element_name: declaration
                .annotations
                .root_element
                .as_ref()
                .and_then(|r| r.name.clone()),
            root_element_namespace: declaration
                .annotations
                .root_element
                .as_ref()
                .and_then(|r| r.namespace.clone()),
            see_also: declaration.annotations.see_also.clone(),
            referenced_from: Vec::new(),
            constructors: declaration.constructors.clone(),
            package: declaration.package.clone(),
            transient: declaration.annotations.transient,
        }
    }

    /// Build an enum type definition from an enum declaration
    pub fn enumeration(declaration: &TypeDeclaration, schema: Schema, qname_enum: bool) -> Self {
        let constants = declaration.enum_constants.clone();
        let mut def = Self::complex(declaration, schema);
        def.kind = if qname_enum {
            TypeDefinitionKind::QNameEnum { constants }
        } else {
            TypeDefinitionKind::Enum { constants }
        };
        def
    }

    /// Downgrade a complex definition to a simple (single-value) one
    pub fn into_simple(mut self) -> Self {
        self.kind = TypeDefinitionKind::Simple;
        self
    }

    /// The XML qualified name of the type
    pub fn qname(&self) -> QName {
        QName::new(self.namespace.clone(), self.name.clone())
    }

    /// Whether the definition is an enumeration (plain or QName)
    pub fn is_enum(&self) -> bool {
        matches!(
            self.kind,
            TypeDefinitionKind::Enum { .. } | TypeDefinitionKind::QNameEnum { .. }
        )
    }

    /// Whether the definition has neither attributes nor elements, looking
    /// only at this declaration (superclass chain is the caller's concern)
    pub fn has_no_local_members(&self) -> bool {
        self.attributes.is_empty() && self.elements.is_empty()
    }

    /// The name of the root element this type declares, if root-annotated
    pub fn root_element_qname(&self) -> Option<QName> {
        if !self.root_element {
            return None;
        }
        let name = self
            .root_element_name
            .clone()
            .unwrap_or_else(|| self.name.clone());
        let namespace = self
            .root_element_namespace
            .clone()
            .unwrap_or_else(|| self.namespace.clone());
        Some(QName::new(namespace, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::{
        MemberDeclaration, RootElementAnnotation, XmlTypeAnnotation,
    };
    use pretty_assertions::assert_eq;

    fn schema(namespace: &str) -> Schema {
        Schema::new("com.example", namespace)
    }

    #[test]
    fn test_default_name_is_decapitalized() {
        let decl = TypeDeclaration::class("com.example.Order");
        let def = TypeDefinition::complex(&decl, schema("urn:orders"));
        assert_eq!(def.name, "order");
        assert_eq!(def.namespace, "urn:orders");
        assert_eq!(def.qname().to_string(), "{urn:orders}order");
    }

    #[test]
    fn test_xml_type_annotation_overrides() {
        let decl = TypeDeclaration::class("com.example.Order").with_xml_type(XmlTypeAnnotation {
            name: Some("purchase-order".to_string()),
            namespace: Some("urn:purchasing".to_string()),
        });
        let def = TypeDefinition::complex(&decl, schema("urn:orders"));
        assert_eq!(def.name, "purchase-order");
        assert_eq!(def.namespace, "urn:purchasing");
    }

    #[test]
    fn test_member_partitioning() {
        let decl = TypeDeclaration::class("com.example.Order")
            .with_member(MemberDeclaration::attribute(
                "id",
                TypeRef::declared("java.lang.String"),
            ))
            .with_member(MemberDeclaration::element(
                "item",
                TypeRef::declared("com.example.Item"),
            ));
        let def = TypeDefinition::complex(&decl, schema("urn:orders"));
        assert_eq!(def.attributes.len(), 1);
        assert_eq!(def.elements.len(), 1);
        assert!(def.value.is_none());
        assert!(!def.has_no_local_members());
    }

    #[test]
    fn test_root_element_qname_defaults() {
        let decl = TypeDeclaration::class("com.example.Order")
            .with_root_element(RootElementAnnotation::default());
        let def = TypeDefinition::complex(&decl, schema("urn:orders"));
        assert_eq!(
            def.root_element_qname().unwrap().to_string(),
            "{urn:orders}order"
        );
    }

    #[test]
    fn test_enum_kinds() {
        let decl = TypeDeclaration::enumeration("com.example.Status")
            .with_enum_constants(vec!["OPEN".to_string(), "CLOSED".to_string()]);
        let def = TypeDefinition::enumeration(&decl, schema("urn:orders"), false);
        assert!(def.is_enum());
        assert!(matches!(def.kind, TypeDefinitionKind::Enum { ref constants } if constants.len() == 2));

        let qdef = TypeDefinition::enumeration(&decl, schema("urn:orders"), true);
        assert!(matches!(qdef.kind, TypeDefinitionKind::QNameEnum { .. }));
    }
}
