//! Host type declarations and the declaration-inspection interface
//!
//! The model-construction core never binds to a compiler or reflection API.
//! It consumes declarations through the [`DeclarationSource`] capability
//! trait; any front end that can answer `declaration(name)` and
//! `package(name)` queries is substitutable. The in-memory
//! [`DeclarationIndex`] is the implementation used by annotation-processing
//! front ends and by tests.

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Qualified name of the universal base type
pub const OBJECT_TYPE: &str = "java.lang.Object";

/// Qualified name of the opaque wrapper-element container type
pub const ELEMENT_CONTAINER_TYPE: &str = "javax.xml.bind.JAXBElement";

lazy_static::lazy_static! {
    static ref COLLECTION_TYPES: HashSet<&'static str> = {
        let mut s = HashSet::new();
        s.insert("java.util.Collection");
        s.insert("java.util.List");
        s.insert("java.util.Set");
        s.insert("java.util.SortedSet");
        s.insert("java.util.Queue");
        s.insert("java.util.Deque");
        s.insert("java.util.ArrayList");
        s.insert("java.util.LinkedList");
        s.insert("java.util.HashSet");
        s.insert("java.util.LinkedHashSet");
        s.insert("java.util.TreeSet");
        s.insert("java.util.Vector");
        s.insert("java.util.Stack");
        s
    };

    static ref MAP_TYPES: HashSet<&'static str> = {
        let mut s = HashSet::new();
        s.insert("java.util.Map");
        s.insert("java.util.SortedMap");
        s.insert("java.util.NavigableMap");
        s.insert("java.util.HashMap");
        s.insert("java.util.LinkedHashMap");
        s.insert("java.util.TreeMap");
        s.insert("java.util.Hashtable");
        s.insert("java.util.concurrent.ConcurrentHashMap");
        s
    };
}

/// Whether the named host type is a collection container
pub fn is_collection(qualified_name: &str) -> bool {
    COLLECTION_TYPES.contains(qualified_name)
}

/// Whether the named host type is a map container
pub fn is_map(qualified_name: &str) -> bool {
    MAP_TYPES.contains(qualified_name)
}

/// Whether the named host type is the opaque wrapper-element container
pub fn is_element_container(qualified_name: &str) -> bool {
    qualified_name == ELEMENT_CONTAINER_TYPE
}

/// Host primitive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// boolean
    Boolean,
    /// byte
    Byte,
    /// char
    Char,
    /// double
    Double,
    /// float
    Float,
    /// int
    Int,
    /// long
    Long,
    /// short
    Short,
}

impl Primitive {
    /// The host spelling of the primitive
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Double => "double",
            Primitive::Float => "float",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Short => "short",
        }
    }
}

/// A reference to a host type, as it appears in a member signature,
/// superclass clause, or type argument position.
///
/// This is a closed set of shapes; the closure walker matches over it
/// rather than dispatching over open-ended subclasses.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// A host primitive
    Primitive(Primitive),
    /// A declared (class/interface/enum) type with its type arguments
    Declared {
        /// Qualified name of the declaration
        name: String,
        /// Type arguments, possibly empty
        args: Vec<TypeRef>,
    },
    /// An array type
    Array(Box<TypeRef>),
    /// A type variable with its upper bound
    Variable {
        /// The upper bound of the variable
        upper_bound: Box<TypeRef>,
    },
    /// A wildcard with optional bounds
    Wildcard {
        /// The extends-bound, if any
        extends_bound: Option<Box<TypeRef>>,
        /// The super-bound, if any
        super_bound: Option<Box<TypeRef>>,
    },
    /// An adapter substitution link; the walker descends into the
    /// adapting (target) type instead of the adapter itself
    Adapter {
        /// The type the adapter marshals to/from
        adapting: Box<TypeRef>,
    },
}

impl TypeRef {
    /// A declared type without type arguments
    pub fn declared(name: impl Into<String>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A declared type with type arguments
    pub fn declared_with(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            args,
        }
    }

    /// An array of the given component type
    pub fn array(component: TypeRef) -> Self {
        TypeRef::Array(Box::new(component))
    }

    /// The qualified name, for declared types
    pub fn qualified_name(&self) -> Option<&str> {
        match self {
            TypeRef::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Whether this is a declared collection container type
    pub fn is_collection_like(&self) -> bool {
        matches!(self, TypeRef::Declared { name, .. } if is_collection(name))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "{}", p.name()),
            TypeRef::Declared { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeRef::Array(component) => write!(f, "{}[]", component),
            TypeRef::Variable { upper_bound } => write!(f, "? extends {}", upper_bound),
            TypeRef::Wildcard { .. } => write!(f, "?"),
            TypeRef::Adapter { adapting } => write!(f, "{}", adapting),
        }
    }
}

/// An adapter binding: the declaration is substituted by the adapting type
/// for classification and reference resolution
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterType {
    /// Qualified name of the adapter class
    pub adapter: String,
    /// The type the adapter marshals to/from
    pub adapting: TypeRef,
}

impl AdapterType {
    /// Create an adapter binding
    pub fn new(adapter: impl Into<String>, adapting: TypeRef) -> Self {
        Self {
            adapter: adapter.into(),
            adapting,
        }
    }
}

/// Element/attribute form, as declared on a package or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XmlNsForm {
    /// Explicitly qualified
    Qualified,
    /// Explicitly unqualified
    Unqualified,
    /// Not declared
    #[default]
    Unset,
}

impl XmlNsForm {
    /// Whether the form was explicitly declared
    pub fn is_explicit(&self) -> bool {
        !matches!(self, XmlNsForm::Unset)
    }
}

/// The kind of a host type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// A class
    Class,
    /// An interface
    Interface,
    /// An enumeration
    Enum,
}

/// Structural annotations on a type declaration
#[derive(Debug, Clone, Default)]
pub struct TypeAnnotations {
    /// Complex-type annotation with optional name/namespace overrides
    pub xml_type: Option<XmlTypeAnnotation>,
    /// Root-element annotation with optional name/namespace overrides
    pub root_element: Option<RootElementAnnotation>,
    /// "See also" hints: qualified names of related declarations
    pub see_also: Vec<String>,
    /// Adapter binding, if the type is adapted
    pub adapter: Option<AdapterType>,
    /// Marked for enum-as-QName mapping
    pub qname_enum: bool,
    /// Marked transient for target-format mapping
    pub transient: bool,
}

/// Complex-type annotation payload
#[derive(Debug, Clone, Default)]
pub struct XmlTypeAnnotation {
    /// Explicit type name, if any
    pub name: Option<String>,
    /// Explicit namespace, if any
    pub namespace: Option<String>,
}

/// Root-element annotation payload
#[derive(Debug, Clone, Default)]
pub struct RootElementAnnotation {
    /// Explicit element name, if any
    pub name: Option<String>,
    /// Explicit namespace, if any
    pub namespace: Option<String>,
}

/// The accessor kind of a member
#[derive(Debug, Clone)]
pub enum MemberKind {
    /// An XML attribute
    Attribute,
    /// An XML element
    Element(ElementFacets),
    /// The single text-content value
    Value,
    /// An anyAttribute member carrying a QName-enum reference
    AnyAttribute,
}

/// Element-specific member facets
#[derive(Debug, Clone, Default)]
pub struct ElementFacets {
    /// Wrapper element, if the member is wrapped
    pub wrapper: Option<ElementWrapper>,
    /// Whether the member is an element reference
    pub element_ref: bool,
    /// Explicit choice types; when empty the member's own type is the
    /// single choice
    pub choices: Vec<ChoiceDeclaration>,
}

/// A wrapper element around a member
#[derive(Debug, Clone)]
pub struct ElementWrapper {
    /// Wrapper element name
    pub name: String,
    /// Wrapper element namespace, defaulting to the member's
    pub namespace: Option<String>,
}

/// One choice of an element member
#[derive(Debug, Clone)]
pub struct ChoiceDeclaration {
    /// The choice's type
    pub ty: TypeRef,
    /// Adapter binding for the choice, if any
    pub adapter: Option<AdapterType>,
}

/// A named, typed member of a type declaration
#[derive(Debug, Clone)]
pub struct MemberDeclaration {
    /// Member name
    pub name: String,
    /// The member's declared type
    pub ty: TypeRef,
    /// Accessor kind
    pub kind: MemberKind,
    /// Explicit namespace override
    pub namespace: Option<String>,
    /// Explicit form
    pub form: XmlNsForm,
    /// Adapter binding, if the member is adapted
    pub adapter: Option<AdapterType>,
    /// QName-enum reference, if any
    pub qname_enum_ref: Option<TypeRef>,
    /// Whether the accessor is implemented as a raw field
    pub field: bool,
    /// Marked transient for target-format mapping
    pub transient: bool,
}

impl MemberDeclaration {
    fn new(name: impl Into<String>, ty: TypeRef, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            ty,
            kind,
            namespace: None,
            form: XmlNsForm::Unset,
            adapter: None,
            qname_enum_ref: None,
            field: false,
            transient: false,
        }
    }

    /// An attribute member
    pub fn attribute(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, ty, MemberKind::Attribute)
    }

    /// An element member
    pub fn element(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, ty, MemberKind::Element(ElementFacets::default()))
    }

    /// The text-content value member
    pub fn value(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, ty, MemberKind::Value)
    }

    /// An anyAttribute member with a QName-enum reference
    pub fn any_attribute(name: impl Into<String>, qname_enum_ref: TypeRef) -> Self {
        let mut member = Self::new(
            name,
            TypeRef::declared("java.util.Map"),
            MemberKind::AnyAttribute,
        );
        member.qname_enum_ref = Some(qname_enum_ref);
        member
    }

    /// Set the namespace override
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the explicit form
    pub fn with_form(mut self, form: XmlNsForm) -> Self {
        self.form = form;
        self
    }

    /// Set the adapter binding
    pub fn with_adapter(mut self, adapter: AdapterType) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Set a QName-enum reference
    pub fn with_qname_enum_ref(mut self, ty: TypeRef) -> Self {
        self.qname_enum_ref = Some(ty);
        self
    }

    /// Mark the accessor as implemented by a raw field
    pub fn as_field(mut self) -> Self {
        self.field = true;
        self
    }

    /// Mark the member transient for target-format mapping
    pub fn as_transient(mut self) -> Self {
        self.transient = true;
        self
    }

    /// Set a wrapper element (element members only)
    pub fn with_wrapper(mut self, name: impl Into<String>, namespace: Option<String>) -> Self {
        if let MemberKind::Element(ref mut facets) = self.kind {
            facets.wrapper = Some(ElementWrapper {
                name: name.into(),
                namespace,
            });
        }
        self
    }

    /// Mark the member as an element reference
    pub fn as_element_ref(mut self) -> Self {
        if let MemberKind::Element(ref mut facets) = self.kind {
            facets.element_ref = true;
        }
        self
    }

    /// Set explicit element choices
    pub fn with_choices(mut self, choices: Vec<ChoiceDeclaration>) -> Self {
        if let MemberKind::Element(ref mut facets) = self.kind {
            facets.choices = choices;
        }
        self
    }
}

/// A constructor of a host type, as far as the validator layer cares
#[derive(Debug, Clone, Copy)]
pub struct Constructor {
    /// Whether the constructor is public
    pub public: bool,
    /// Number of parameters
    pub arity: usize,
}

/// An instance-factory method of a registry
#[derive(Debug, Clone)]
pub struct FactoryMethod {
    /// Method name
    pub name: String,
    /// Return type
    pub return_type: TypeRef,
}

/// A local element declaration defined by a registry method
#[derive(Debug, Clone)]
pub struct LocalElementDeclaration {
    /// Scope-qualified key, e.g. `com.example.Registry#createItem`
    pub key: String,
    /// Element local name
    pub name: String,
    /// Element namespace
    pub namespace: String,
    /// Qualified name of the scope type, if any
    pub scope: Option<String>,
    /// Qualified name of the element type, if any
    pub element_type: Option<String>,
    /// "See also" hints carried by the declaration
    pub see_also: Vec<String>,
}

impl LocalElementDeclaration {
    /// Create a local element declaration
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            namespace: namespace.into(),
            scope: None,
            element_type: None,
            see_also: Vec::new(),
        }
    }

    /// Set the scope type
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the element type
    pub fn with_element_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }
}

/// The registry payload of a declaration marked as an XML registry
#[derive(Debug, Clone, Default)]
pub struct RegistryDecl {
    /// Instance-factory methods
    pub instance_factory_methods: Vec<FactoryMethod>,
    /// Local element declarations defined by the registry
    pub local_elements: Vec<LocalElementDeclaration>,
}

/// A host type declaration as surfaced by the front end
#[derive(Debug, Clone)]
pub struct TypeDeclaration {
    /// Qualified name
    pub qualified_name: String,
    /// Simple (unqualified) name
    pub simple_name: String,
    /// Owning package
    pub package: String,
    /// Declaration kind
    pub kind: DeclarationKind,
    /// Structural annotations
    pub annotations: TypeAnnotations,
    /// Superclass reference; `None` for the universal base type,
    /// interfaces and enums
    pub superclass: Option<TypeRef>,
    /// Members in declaration order
    pub members: Vec<MemberDeclaration>,
    /// Enum constants, for enum declarations
    pub enum_constants: Vec<String>,
    /// Constructors, for the validator layer
    pub constructors: Vec<Constructor>,
    /// Registry payload, if the declaration is an XML registry
    pub registry: Option<RegistryDecl>,
}

fn split_qualified(qualified_name: &str) -> (String, String) {
    match qualified_name.rsplit_once('.') {
        Some((package, simple)) => (package.to_string(), simple.to_string()),
        None => (String::new(), qualified_name.to_string()),
    }
}

impl TypeDeclaration {
    fn new(qualified_name: impl Into<String>, kind: DeclarationKind) -> Self {
        let qualified_name = qualified_name.into();
        let (package, simple_name) = split_qualified(&qualified_name);
        Self {
            qualified_name,
            simple_name,
            package,
            kind,
            annotations: TypeAnnotations::default(),
            superclass: None,
            members: Vec::new(),
            enum_constants: Vec::new(),
            constructors: Vec::new(),
            registry: None,
        }
    }

    /// A class declaration with the implicit universal-base superclass and
    /// the implicit public no-arg constructor
    pub fn class(qualified_name: impl Into<String>) -> Self {
        let mut decl = Self::new(qualified_name, DeclarationKind::Class);
        decl.superclass = Some(TypeRef::declared(OBJECT_TYPE));
        decl.constructors = vec![Constructor {
            public: true,
            arity: 0,
        }];
        decl
    }

    /// An interface declaration
    pub fn interface(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, DeclarationKind::Interface)
    }

    /// An enum declaration
    pub fn enumeration(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, DeclarationKind::Enum)
    }

    /// Add a member
    pub fn with_member(mut self, member: MemberDeclaration) -> Self {
        self.members.push(member);
        self
    }

    /// Set the complex-type annotation
    pub fn with_xml_type(mut self, annotation: XmlTypeAnnotation) -> Self {
        self.annotations.xml_type = Some(annotation);
        self
    }

    /// Mark as a root element
    pub fn with_root_element(mut self, annotation: RootElementAnnotation) -> Self {
        self.annotations.root_element = Some(annotation);
        self
    }

    /// Add "see also" hints
    pub fn with_see_also(mut self, names: Vec<String>) -> Self {
        self.annotations.see_also = names;
        self
    }

    /// Set the adapter binding
    pub fn with_adapter(mut self, adapter: AdapterType) -> Self {
        self.annotations.adapter = Some(adapter);
        self
    }

    /// Mark for enum-as-QName mapping
    pub fn as_qname_enum(mut self) -> Self {
        self.annotations.qname_enum = true;
        self
    }

    /// Mark transient for target-format mapping
    pub fn as_transient(mut self) -> Self {
        self.annotations.transient = true;
        self
    }

    /// Set the superclass
    pub fn with_superclass(mut self, superclass: TypeRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Set the enum constants
    pub fn with_enum_constants(mut self, constants: Vec<String>) -> Self {
        self.enum_constants = constants;
        self
    }

    /// Replace the constructor list
    pub fn with_constructors(mut self, constructors: Vec<Constructor>) -> Self {
        self.constructors = constructors;
        self
    }

    /// Attach a registry payload
    pub fn with_registry(mut self, registry: RegistryDecl) -> Self {
        self.registry = Some(registry);
        self
    }
}

/// A package declaration: the package-level XML binding directives
#[derive(Debug, Clone)]
pub struct PackageDeclaration {
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
    /// Marked transient for target-format mapping
    pub transient: bool,
}

impl PackageDeclaration {
    /// Create a package declaration with no namespace and unset forms
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            namespace: String::new(),
            element_form_default: XmlNsForm::Unset,
            attribute_form_default: XmlNsForm::Unset,
            specified_prefixes: IndexMap::new(),
            transient: false,
        }
    }

    /// Set the target namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the element form default
    pub fn with_element_form_default(mut self, form: XmlNsForm) -> Self {
        self.element_form_default = form;
        self
    }

    /// Set the attribute form default
    pub fn with_attribute_form_default(mut self, form: XmlNsForm) -> Self {
        self.attribute_form_default = form;
        self
    }

    /// Specify a namespace-to-prefix assignment
    pub fn with_prefix(mut self, namespace: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.specified_prefixes.insert(namespace.into(), prefix.into());
        self
    }

    /// Mark transient for target-format mapping
    pub fn as_transient(mut self) -> Self {
        self.transient = true;
        self
    }
}

/// The capability interface the core depends on for declaration inspection
pub trait DeclarationSource {
    /// Look up a type declaration by qualified name
    fn declaration(&self, qualified_name: &str) -> Option<&TypeDeclaration>;

    /// Look up a package declaration by qualified name
    fn package(&self, qualified_name: &str) -> Option<&PackageDeclaration>;
}

/// In-memory declaration store
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    types: HashMap<String, TypeDeclaration>,
    packages: HashMap<String, PackageDeclaration>,
}

impl DeclarationIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type declaration
    pub fn with_type(mut self, declaration: TypeDeclaration) -> Self {
        self.add_type(declaration);
        self
    }

    /// Add a package declaration
    pub fn with_package(mut self, package: PackageDeclaration) -> Self {
        self.add_package(package);
        self
    }

    /// Insert a type declaration
    pub fn add_type(&mut self, declaration: TypeDeclaration) {
        self.types
            .insert(declaration.qualified_name.clone(), declaration);
    }

    /// Insert a package declaration
    pub fn add_package(&mut self, package: PackageDeclaration) {
        self.packages
            .insert(package.qualified_name.clone(), package);
    }
}

impl DeclarationSource for DeclarationIndex {
    fn declaration(&self, qualified_name: &str) -> Option<&TypeDeclaration> {
        self.types.get(qualified_name)
    }

    fn package(&self, qualified_name: &str) -> Option<&PackageDeclaration> {
        self.packages.get(qualified_name)
    }
}

/// Decapitalize a simple name the way default XML names are derived
pub(crate) fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_qualified() {
        let decl = TypeDeclaration::class("com.example.Order");
        assert_eq!(decl.package, "com.example");
        assert_eq!(decl.simple_name, "Order");

        let unqualified = TypeDeclaration::class("Order");
        assert_eq!(unqualified.package, "");
        assert_eq!(unqualified.simple_name, "Order");
    }

    #[test]
    fn test_class_defaults() {
        let decl = TypeDeclaration::class("com.example.Order");
        assert_eq!(
            decl.superclass,
            Some(TypeRef::declared(OBJECT_TYPE))
        );
        assert!(decl.constructors[0].public);
        assert_eq!(decl.constructors[0].arity, 0);
    }

    #[test]
    fn test_container_predicates() {
        assert!(is_collection("java.util.List"));
        assert!(is_map("java.util.HashMap"));
        assert!(is_element_container(ELEMENT_CONTAINER_TYPE));
        assert!(!is_collection("com.example.Order"));
    }

    #[test]
    fn test_type_ref_display() {
        let list = TypeRef::declared_with(
            "java.util.List",
            vec![TypeRef::declared("com.example.Item")],
        );
        assert_eq!(list.to_string(), "java.util.List<com.example.Item>");
        assert_eq!(
            TypeRef::array(TypeRef::Primitive(Primitive::Byte)).to_string(),
            "byte[]"
        );
    }

    #[test]
    fn test_decapitalize() {
        assert_eq!(decapitalize("Order"), "order");
        assert_eq!(decapitalize("order"), "order");
        assert_eq!(decapitalize(""), "");
    }
}
