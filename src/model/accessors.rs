//! Accessors: the named, typed members of a type definition
//!
//! An accessor is an attribute, an element, or the single text-content
//! value of a complex type. It may be adapted (substituted with a converter
//! target type) or carry an enum-as-QName reference.

use crate::declarations::{
    AdapterType, ChoiceDeclaration, ElementWrapper, MemberDeclaration, MemberKind, TypeRef,
    XmlNsForm,
};

/// The common payload of an attribute, element or value member
#[derive(Debug, Clone)]
pub struct Accessor {
    /// Accessor name
    pub name: String,
    /// The accessor's own namespace
    pub namespace: String,
    /// Effective form of the accessor
    pub form: XmlNsForm,
    /// The accessor's declared type
    pub accessor_type: TypeRef,
    /// Adapter binding, if adapted
    pub adapter: Option<AdapterType>,
    /// Enum-as-QName reference, if any
    pub qname_enum_ref: Option<TypeRef>,
    /// Whether the accessor is implemented as a raw field
    pub field: bool,
    /// Marked transient for target-format mapping
    pub transient: bool,
}

impl Accessor {
    fn from_member(member: &MemberDeclaration, owner_namespace: &str, default_form: XmlNsForm) -> Self {
        let form = if member.form.is_explicit() {
            member.form
        } else {
            default_form
        };
        let namespace = match &member.namespace {
            Some(ns) => ns.clone(),
            // unqualified members live in no namespace
            None if matches!(form, XmlNsForm::Qualified) => owner_namespace.to_string(),
            None => String::new(),
        };
        Self {
            name: member.name.clone(),
            namespace,
            form,
            accessor_type: member.ty.clone(),
            adapter: member.adapter.clone(),
            qname_enum_ref: member.qname_enum_ref.clone(),
            field: member.field,
            transient: member.transient,
        }
    }

    /// Whether the accessor is adapted
    pub fn is_adapted(&self) -> bool {
        self.adapter.is_some()
    }

    /// The type to resolve references through: the adapting type when
    /// adapted, the accessor type otherwise
    pub fn resolved_type(&self) -> &TypeRef {
        match &self.adapter {
            Some(adapter) => &adapter.adapting,
            None => &self.accessor_type,
        }
    }

    /// Whether the accessor type is a homogeneous sequence
    pub fn is_collection(&self) -> bool {
        self.accessor_type.is_collection_like()
            || matches!(self.accessor_type, TypeRef::Array(_))
    }
}

/// An attribute member of a type definition
#[derive(Debug, Clone)]
pub struct Attribute {
    /// Common accessor payload
    pub accessor: Accessor,
}

impl Attribute {
    pub(crate) fn from_member(
        member: &MemberDeclaration,
        owner_namespace: &str,
        default_form: XmlNsForm,
    ) -> Self {
        Self {
            accessor: Accessor::from_member(member, owner_namespace, default_form),
        }
    }
}

/// An element member of a type definition
#[derive(Debug, Clone)]
pub struct Element {
    /// Common accessor payload
    pub accessor: Accessor,
    /// Wrapper element, if the member is wrapped
    pub wrapper: Option<ElementWrapper>,
    /// Whether the member is an element reference
    pub element_ref: bool,
    /// Explicit choices; empty means the member's own type is the single
    /// choice
    pub choices: Vec<ChoiceDeclaration>,
}

impl Element {
    pub(crate) fn from_member(
        member: &MemberDeclaration,
        owner_namespace: &str,
        default_form: XmlNsForm,
    ) -> Self {
        let facets = match &member.kind {
            MemberKind::Element(facets) => facets.clone(),
            _ => Default::default(),
        };
        Self {
            accessor: Accessor::from_member(member, owner_namespace, default_form),
            wrapper: facets.wrapper,
            element_ref: facets.element_ref,
            choices: facets.choices,
        }
    }

    /// Whether the element is wrapped
    pub fn is_wrapped(&self) -> bool {
        self.wrapper.is_some()
    }

    /// The wrapper namespace, falling back to the element's own namespace
    pub fn wrapper_namespace(&self) -> &str {
        match &self.wrapper {
            Some(wrapper) => wrapper
                .namespace
                .as_deref()
                .unwrap_or(&self.accessor.namespace),
            None => &self.accessor.namespace,
        }
    }

    /// The namespace the element effectively lives in: the wrapper
    /// namespace when wrapped, the element's own namespace otherwise
    pub fn effective_namespace(&self) -> &str {
        if self.is_wrapped() {
            self.wrapper_namespace()
        } else {
            &self.accessor.namespace
        }
    }

    /// The per-choice types to resolve, adapter-first. An element with no
    /// explicit choices is its own single choice.
    pub fn choice_types(&self) -> Vec<&TypeRef> {
        if self.choices.is_empty() {
            vec![self.accessor.resolved_type()]
        } else {
            self.choices
                .iter()
                .map(|choice| match &choice.adapter {
                    Some(adapter) => &adapter.adapting,
                    None => &choice.ty,
                })
                .collect()
        }
    }
}

/// The single text-content value member of a simple type definition
#[derive(Debug, Clone)]
pub struct Value {
    /// Common accessor payload
    pub accessor: Accessor,
}

impl Value {
    pub(crate) fn from_member(
        member: &MemberDeclaration,
        owner_namespace: &str,
        default_form: XmlNsForm,
    ) -> Self {
        Self {
            accessor: Accessor::from_member(member, owner_namespace, default_form),
        }
    }
}
