//! The model context: classifier, reference-closure walker and registries
//!
//! One build gets one [`ModelContext`]. It owns every registry map (type
//! definitions, element declarations, per-namespace schema aggregates,
//! namespace prefixes) and is the single source of truth for downstream
//! artifact generators. Construction is single-threaded and eager; a fatal
//! classification error aborts the whole build.

use crate::config::ModelConfig;
use crate::declarations::{
    is_collection, is_element_container, is_map, DeclarationKind, DeclarationSource,
    LocalElementDeclaration, Primitive, TypeDeclaration, TypeRef, XmlNsForm, OBJECT_TYPE,
};
use crate::error::{ModelError, Result};
use crate::model::accessors::{Accessor, Attribute, Element, Value};
use crate::model::known_types::{self, KnownXmlType};
use crate::model::schema::{
    ElementDeclaration, ImplicitSchemaAttribute, ImplicitSchemaElement, RootElementDeclaration,
    Schema, SchemaInfo,
};
use crate::model::type_definition::TypeDefinition;
use crate::namespaces::{PrefixRegistry, QName};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Provenance entry pushed on the traversal stack for see-also hints
const SEE_ALSO_MARKER: &str = "javax.xml.bind.annotation.XmlSeeAlso";

/// The transient per-traversal stack used for cycle detection and
/// referenced-from provenance. Frames are guaranteed to unwind on every
/// exit path, including error propagation.
type TraversalStack = Vec<String>;

fn with_frame<T>(
    stack: &mut TraversalStack,
    entry: String,
    f: impl FnOnce(&mut TraversalStack) -> Result<T>,
) -> Result<T> {
    stack.push(entry);
    let result = f(stack);
    stack.pop();
    result
}

/// The model-construction context
pub struct ModelContext {
    source: Arc<dyn DeclarationSource>,
    prefixes: PrefixRegistry,
    type_definitions: IndexMap<String, Arc<TypeDefinition>>,
    element_declarations: IndexMap<String, ElementDeclaration>,
    schemas: IndexMap<String, SchemaInfo>,
    package_specified_types: HashMap<String, HashMap<String, String>>,
}

impl ModelContext {
    /// Create a context over a declaration source with the given
    /// configuration
    pub fn new(source: Arc<dyn DeclarationSource>, config: &ModelConfig) -> Self {
        let mut prefixes = PrefixRegistry::new();
        prefixes.apply_overrides(
            config
                .namespaces
                .iter()
                .map(|n| (n.uri.clone(), n.prefix.clone())),
        );

        let mut package_specified_types = HashMap::new();
        for entry in &config.package_types {
            package_specified_types.insert(entry.package.clone(), entry.types.clone());
        }

        Self {
            source,
            prefixes,
            type_definitions: IndexMap::new(),
            element_declarations: IndexMap::new(),
            schemas: IndexMap::new(),
            package_specified_types,
        }
    }

    // ------------------------------------------------------------------
    // Query API
    // ------------------------------------------------------------------

    /// Look up a registered type definition by qualified name
    pub fn type_definition_for(&self, qualified_name: &str) -> Option<&Arc<TypeDefinition>> {
        self.type_definitions.get(qualified_name)
    }

    /// Look up a registered element declaration by key
    pub fn element_declaration_for(&self, key: &str) -> Option<&ElementDeclaration> {
        self.element_declarations.get(key)
    }

    /// All registered type definitions, in registration order
    pub fn type_definitions(&self) -> &IndexMap<String, Arc<TypeDefinition>> {
        &self.type_definitions
    }

    /// The per-namespace schema aggregates, in registration order
    pub fn schemas(&self) -> &IndexMap<String, SchemaInfo> {
        &self.schemas
    }

    /// The namespace-to-prefix assignments
    pub fn namespace_prefixes(&self) -> &IndexMap<String, String> {
        self.prefixes.assignments()
    }

    /// Look up the schema primitive kind for a known host type
    pub fn known_type(&self, qualified_name: &str) -> Option<KnownXmlType> {
        known_types::known_type(qualified_name)
    }

    /// The explicit schema-type overrides for a package, if configured
    pub fn package_specified_types(&self, package: &str) -> Option<&HashMap<String, String>> {
        self.package_specified_types.get(package)
    }

    /// Set the explicit schema-type overrides for a package
    pub fn set_package_specified_types(
        &mut self,
        package: impl Into<String>,
        types: HashMap<String, String>,
    ) {
        self.package_specified_types.insert(package.into(), types);
    }

    /// Get the prefix for a namespace, generating one if needed
    pub fn add_namespace(&mut self, namespace: &str) -> String {
        self.prefixes.resolve(namespace).to_string()
    }

    /// Whether the named type needs no classification: already registered,
    /// a known built-in, or the opaque wrapper-element container
    pub fn is_known_type_definition(&self, qualified_name: &str) -> bool {
        self.type_definitions.contains_key(qualified_name)
            || known_types::is_known_type(qualified_name)
            || is_element_container(qualified_name)
    }

    // ------------------------------------------------------------------
    // Classifier
    // ------------------------------------------------------------------

    /// Classify a declaration into a type definition.
    ///
    /// Adapter substitution is applied first; enums become enum or
    /// QName-enum definitions; everything else starts complex and is
    /// downgraded to simple when it has a value accessor and neither
    /// attributes nor elements anywhere up its superclass chain.
    pub fn create_type_definition(&self, declaration: &TypeDeclaration) -> Result<TypeDefinition> {
        if declaration.kind == DeclarationKind::Interface
            && declaration.annotations.xml_type.is_some()
        {
            return Err(
                ModelError::interface_as_complex_type(&declaration.qualified_name).into(),
            );
        }

        let declaration = self.narrow_to_adapting_type(declaration)?;

        if declaration.kind == DeclarationKind::Enum {
            let schema = self.schema_for(declaration);
            return Ok(TypeDefinition::enumeration(
                declaration,
                schema,
                declaration.annotations.qname_enum,
            ));
        }

        let schema = self.schema_for(declaration);
        let type_def = TypeDefinition::complex(declaration, schema);
        if type_def.value.is_some() && self.has_neither_attributes_nor_elements(&type_def) {
            Ok(type_def.into_simple())
        } else {
            Ok(type_def)
        }
    }

    /// Narrow a declaration down to its adapting declaration, if adapted.
    /// A non-declared adapting type leaves the original declaration in
    /// place; an unresolvable declared one is a fatal configuration error.
    fn narrow_to_adapting_type<'a>(
        &'a self,
        declaration: &'a TypeDeclaration,
    ) -> Result<&'a TypeDeclaration> {
        let adapter = match &declaration.annotations.adapter {
            Some(adapter) => adapter,
            None => return Ok(declaration),
        };
        let adapting_name = match adapter.adapting.qualified_name() {
            Some(name) => name,
            None => return Ok(declaration),
        };
        match self.source.declaration(adapting_name) {
            Some(adapting) => Ok(adapting),
            None => Err(ModelError::unresolvable_adapter(
                &declaration.qualified_name,
                adapting_name,
            )
            .into()),
        }
    }

    /// Whether the definition has neither attributes nor elements,
    /// transitively through the superclass chain up to but excluding the
    /// universal base type. Each ancestor is rebuilt as a complex type
    /// purely for this check; nothing is registered.
    fn has_neither_attributes_nor_elements(&self, type_def: &TypeDefinition) -> bool {
        let mut none = type_def.has_no_local_members();
        let mut superclass = type_def.superclass.clone();
        while none {
            let name = match superclass.as_ref().and_then(|s| s.qualified_name()) {
                Some(name) if name != OBJECT_TYPE => name.to_string(),
                _ => break,
            };
            let declaration = match self.source.declaration(&name) {
                Some(declaration) => declaration,
                None => break,
            };
            let ancestor = TypeDefinition::complex(declaration, self.schema_for(declaration));
            none &= ancestor.has_no_local_members();
            superclass = ancestor.superclass;
        }
        none
    }

    /// The package schema a declaration belongs to
    fn schema_for(&self, declaration: &TypeDeclaration) -> Schema {
        match self.source.package(&declaration.package) {
            Some(package) => Schema::from_package(package),
            None => Schema::new(declaration.package.clone(), ""),
        }
    }

    // ------------------------------------------------------------------
    // Add operations
    // ------------------------------------------------------------------

    /// Classify the named declaration and add it, with everything it
    /// transitively references, to the model
    pub fn add_type(&mut self, qualified_name: &str) -> Result<()> {
        let source = Arc::clone(&self.source);
        let declaration = source.declaration(qualified_name).ok_or_else(|| {
            ModelError::new(format!("unknown declaration: {}", qualified_name))
                .with_subject(qualified_name)
        })?;
        let type_def = self.create_type_definition(declaration)?;
        self.add_type_definition(type_def)
    }

    /// Add a type definition to the model
    pub fn add_type_definition(&mut self, type_def: TypeDefinition) -> Result<()> {
        self.add_type_definition_with(type_def, &mut TraversalStack::new())
    }

    /// Add a package schema declaration to the model
    pub fn add_schema(&mut self, schema: Schema) -> Result<()> {
        self.add_schema_with(schema, &mut TraversalStack::new())
    }

    fn add_type_definition_with(
        &mut self,
        type_def: TypeDefinition,
        stack: &mut TraversalStack,
    ) -> Result<()> {
        if self.type_definitions.contains_key(&type_def.qualified_name)
            || known_types::is_known_type(&type_def.qualified_name)
        {
            return Ok(());
        }

        let mut type_def = type_def;
        type_def.referenced_from.extend(stack.iter().cloned());

        let qualified_name = type_def.qualified_name.clone();
        let type_def = Arc::new(type_def);
        self.type_definitions
            .insert(qualified_name.clone(), Arc::clone(&type_def));
        log::debug!("added {} as an XML type definition", qualified_name);

        // a root-annotated type is always discoverable as an element, even
        // if never explicitly added as one
        if !self.element_declarations.contains_key(&qualified_name) {
            if let Some(name) = type_def.root_element_qname() {
                self.add_root_element(RootElementDeclaration {
                    qualified_name: qualified_name.clone(),
                    name,
                    schema: type_def.schema.clone(),
                    type_definition: Some(Arc::clone(&type_def)),
                })?;
            }
        }

        with_frame(stack, qualified_name.clone(), |stack| {
            self.add_schema_with(type_def.schema.clone(), stack)?;

            let namespace = type_def.namespace.clone();
            let info = self.schema_info_mut(&namespace);
            if !info.has_type_definition(&qualified_name) {
                info.type_definitions.push(Arc::clone(&type_def));
            }

            self.add_see_also_definitions(&type_def.see_also, stack)?;

            for element in &type_def.elements {
                self.add_element_references(element, stack)?;

                if let Some(implicit) = self.implicit_element(&type_def, element) {
                    let namespace = implicit.namespace.clone();
                    let info = self.schema_info_mut(&namespace);
                    if !info.implicit_schema_elements.contains(&implicit) {
                        info.implicit_schema_elements.push(implicit);
                    }
                }
            }

            for attribute in &type_def.attributes {
                self.add_attribute_references(attribute, stack)?;

                if let Some(implicit) = self.implicit_attribute(&type_def, attribute) {
                    let namespace = implicit.namespace.clone();
                    let info = self.schema_info_mut(&namespace);
                    if !info.implicit_schema_attributes.contains(&implicit) {
                        info.implicit_schema_attributes.push(implicit);
                    }
                }
            }

            if let Some(enum_ref) = &type_def.any_attribute_qname_enum_ref {
                self.add_referenced_type_definitions(enum_ref, stack)?;
            }

            if let Some(value) = &type_def.value {
                self.add_value_references(value, stack)?;
            }

            if !type_def.is_enum() {
                if let Some(superclass) = &type_def.superclass {
                    self.add_referenced_type_definitions(superclass, stack)?;
                }
            }

            Ok(())
        })
    }

    /// Add a root element declaration, idempotent by the declaring class's
    /// qualified name
    pub fn add_root_element(&mut self, root: RootElementDeclaration) -> Result<()> {
        if self.element_declarations.contains_key(&root.qualified_name) {
            return Ok(());
        }

        let root = Arc::new(root);
        self.element_declarations.insert(
            root.qualified_name.clone(),
            ElementDeclaration::Root(Arc::clone(&root)),
        );
        log::debug!("added {} as a root XML element", root.name);

        self.add_schema(root.schema.clone())?;

        let namespace = root.namespace().to_string();
        let info = self.schema_info_mut(&namespace);
        info.root_elements.push(Arc::clone(&root));

        // discover the referenced type definition
        match &root.type_definition {
            Some(type_def) => {
                self.add_type_definition(TypeDefinition::clone(type_def))?;
            }
            None => {
                // some root elements don't carry their type definition
                let source = Arc::clone(&self.source);
                let declaration = source.declaration(&root.qualified_name).ok_or_else(|| {
                    ModelError::new(format!("unknown declaration: {}", root.qualified_name))
                        .with_subject(root.qualified_name.clone())
                })?;
                let type_def = self.create_type_definition(declaration)?;
                self.add_type_definition(type_def)?;
            }
        }

        Ok(())
    }

    fn add_schema_with(&mut self, schema: Schema, stack: &mut TraversalStack) -> Result<()> {
        with_frame(stack, schema.qualified_name.clone(), |_stack| {
            let namespace = schema.namespace.clone();
            self.add_namespace(&namespace);
            let specified: Vec<(String, String)> = schema
                .specified_prefixes
                .iter()
                .map(|(ns, prefix)| (ns.clone(), prefix.clone()))
                .collect();
            for (ns, prefix) in specified {
                self.prefixes.assign(ns, prefix);
            }

            let info = self.schema_info_mut(&namespace);

            if schema.element_form_default.is_explicit() {
                for package in &info.packages {
                    if package.element_form_default.is_explicit()
                        && package.element_form_default != schema.element_form_default
                    {
                        return Err(ModelError::inconsistent_form_default(
                            false,
                            &schema.qualified_name,
                            &package.qualified_name,
                        )
                        .into());
                    }
                }
            }

            if schema.attribute_form_default.is_explicit() {
                for package in &info.packages {
                    if package.attribute_form_default.is_explicit()
                        && package.attribute_form_default != schema.attribute_form_default
                    {
                        return Err(ModelError::inconsistent_form_default(
                            true,
                            &schema.qualified_name,
                            &package.qualified_name,
                        )
                        .into());
                    }
                }
            }

            // re-processing the same package is a no-op beyond the checks
            if !info.has_package(&schema.qualified_name) {
                info.packages.push(schema);
            }

            Ok(())
        })
    }

    /// Add the named registry declaration and everything it references
    pub fn add_registry(&mut self, qualified_name: &str) -> Result<()> {
        let source = Arc::clone(&self.source);
        let declaration = source.declaration(qualified_name).ok_or_else(|| {
            ModelError::new(format!("unknown declaration: {}", qualified_name))
                .with_subject(qualified_name)
        })?;
        let registry = declaration.registry.clone().ok_or_else(|| {
            ModelError::new(format!(
                "{}: declaration is not an XML registry",
                qualified_name
            ))
            .with_subject(qualified_name)
        })?;

        let mut stack = TraversalStack::new();
        let schema = self.schema_for(declaration);
        let namespace = schema.namespace.clone();
        self.add_schema_with(schema, &mut stack)?;

        let info = self.schema_info_mut(&namespace);
        if !info.registries.iter().any(|r| r == qualified_name) {
            info.registries.push(qualified_name.to_string());
        }
        log::debug!("added {} as an XML registry", qualified_name);

        with_frame(&mut stack, qualified_name.to_string(), |stack| {
            self.add_see_also_definitions(&declaration.annotations.see_also, stack)?;

            for method in &registry.instance_factory_methods {
                let frame = format!("{}#{}", qualified_name, method.name);
                with_frame(stack, frame, |stack| {
                    self.add_referenced_type_definitions(&method.return_type, stack)
                })?;
            }

            for local in &registry.local_elements {
                self.add_local_element_declaration(local.clone(), stack)?;
            }

            Ok(())
        })
    }

    fn add_local_element_declaration(
        &mut self,
        local: LocalElementDeclaration,
        stack: &mut TraversalStack,
    ) -> Result<()> {
        let namespace = local.namespace.clone();
        let info = self.schema_info_mut(&namespace);
        if !info
            .local_element_declarations
            .iter()
            .any(|l| l.key == local.key)
        {
            info.local_element_declarations.push(local.clone());
        }
        self.element_declarations
            .entry(local.key.clone())
            .or_insert_with(|| ElementDeclaration::Local(local.clone()));
        log::debug!("added {} as a local element declaration", local.name);

        self.add_see_also_definitions(&local.see_also, stack)?;

        let source = Arc::clone(&self.source);
        for name in [local.scope.as_deref(), local.element_type.as_deref()]
            .into_iter()
            .flatten()
        {
            if self.is_known_type_definition(name) {
                continue;
            }
            if let Some(declaration) = source.declaration(name) {
                if declaration.kind == DeclarationKind::Class {
                    let type_def = self.create_type_definition(declaration)?;
                    self.add_type_definition_with(type_def, stack)?;
                }
            }
        }

        Ok(())
    }

    fn add_see_also_definitions(
        &mut self,
        names: &[String],
        stack: &mut TraversalStack,
    ) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        with_frame(stack, SEE_ALSO_MARKER.to_string(), |stack| {
            let source = Arc::clone(&self.source);
            for name in names {
                if self.is_known_type_definition(name) {
                    continue;
                }
                let declaration = match source.declaration(name) {
                    Some(declaration) => declaration,
                    None => {
                        log::debug!("see-also reference {} has no declaration; skipped", name);
                        continue;
                    }
                };
                // registries referenced via see-also are added separately
                if declaration.registry.is_some() {
                    continue;
                }
                let type_def = self.create_type_definition(declaration)?;
                self.add_type_definition_with(type_def, stack)?;
            }
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Accessor reference discovery
    // ------------------------------------------------------------------

    fn add_accessor_references(
        &mut self,
        accessor: &Accessor,
        stack: &mut TraversalStack,
    ) -> Result<()> {
        if let Some(enum_ref) = &accessor.qname_enum_ref {
            self.add_referenced_type_definitions(enum_ref, stack)?;
        }
        Ok(())
    }

    fn add_attribute_references(
        &mut self,
        attribute: &Attribute,
        stack: &mut TraversalStack,
    ) -> Result<()> {
        self.add_accessor_references(&attribute.accessor, stack)?;
        let resolved = attribute.accessor.resolved_type().clone();
        self.add_referenced_type_definitions(&resolved, stack)
    }

    fn add_value_references(&mut self, value: &Value, stack: &mut TraversalStack) -> Result<()> {
        self.add_accessor_references(&value.accessor, stack)?;
        let resolved = value.accessor.resolved_type().clone();
        self.add_referenced_type_definitions(&resolved, stack)
    }

    fn add_element_references(
        &mut self,
        element: &Element,
        stack: &mut TraversalStack,
    ) -> Result<()> {
        self.add_accessor_references(&element.accessor, stack)?;

        if element.element_ref && element.accessor.is_collection() {
            // collections of element refs resolve their per-choice types
            // lazily; only the raw accessor type is walked here
            let raw = element.accessor.accessor_type.clone();
            self.add_referenced_type_definitions(&raw, stack)
        } else {
            let choices: Vec<TypeRef> =
                element.choice_types().into_iter().cloned().collect();
            for choice in &choices {
                self.add_referenced_type_definitions(choice, stack)?;
            }
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Reference-closure walker
    // ------------------------------------------------------------------

    /// Walk a type reference, adding every type definition, schema and
    /// namespace it transitively depends on, each exactly once
    pub fn add_referenced_type_definitions(
        &mut self,
        ty: &TypeRef,
        stack: &mut TraversalStack,
    ) -> Result<()> {
        match ty {
            TypeRef::Primitive(_) => Ok(()),
            TypeRef::Array(component) => self.add_referenced_type_definitions(component, stack),
            TypeRef::Variable { upper_bound } => {
                self.add_referenced_type_definitions(upper_bound, stack)
            }
            TypeRef::Wildcard {
                extends_bound,
                super_bound,
            } => {
                if let Some(bound) = extends_bound {
                    self.add_referenced_type_definitions(bound, stack)?;
                }
                if let Some(bound) = super_bound {
                    self.add_referenced_type_definitions(bound, stack)?;
                }
                Ok(())
            }
            TypeRef::Adapter { adapting } => {
                self.add_referenced_type_definitions(adapting, stack)
            }
            TypeRef::Declared { name, args } => self.visit_declared(name, args, stack),
        }
    }

    fn visit_declared(
        &mut self,
        name: &str,
        args: &[TypeRef],
        stack: &mut TraversalStack,
    ) -> Result<()> {
        let source = Arc::clone(&self.source);
        let declaration = source.declaration(name);

        if let Some(declaration) = declaration {
            if declaration.kind == DeclarationKind::Enum {
                if !self.is_known_type_definition(name) {
                    let type_def = self.create_type_definition(declaration)?;
                    self.add_type_definition(type_def)?;
                }
                return Ok(());
            }
        }

        if is_map(name) {
            // the map container itself is not a type definition
            for arg in args {
                self.add_referenced_type_definitions(arg, stack)?;
            }
            return Ok(());
        }

        if name == OBJECT_TYPE {
            // skip the universal base type; not a type definition
            return Ok(());
        }

        if stack.iter().any(|entry| entry == name) {
            // already visiting this declaration
            return Ok(());
        }

        with_frame(stack, name.to_string(), |stack| {
            if !self.is_known_type_definition(name)
                && !is_collection(name)
                && !is_element_container(name)
            {
                if let Some(declaration) = declaration {
                    let type_def = self.create_type_definition(declaration)?;
                    self.add_type_definition_with(type_def, stack)?;
                }
            }

            for arg in args {
                self.add_referenced_type_definitions(arg, stack)?;
            }

            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Namespace aggregates
    // ------------------------------------------------------------------

    fn schema_info_mut(&mut self, namespace: &str) -> &mut SchemaInfo {
        if !self.schemas.contains_key(namespace) {
            let prefix = self.prefixes.resolve(namespace).to_string();
            self.schemas
                .insert(namespace.to_string(), SchemaInfo::new(prefix, namespace));
        }
        self.schemas.get_mut(namespace).unwrap()
    }

    /// The XML type QName a member reference resolves to: a known
    /// built-in's canonical QName, or the registered type definition's
    /// QName, looking through adapters, arrays and container arguments
    fn referenced_type_qname(&self, ty: &TypeRef) -> Option<QName> {
        match ty {
            TypeRef::Primitive(p) => known_types::known_type(p.name()).map(|k| k.qname()),
            TypeRef::Declared { name, args } => {
                if let Some(known) = known_types::known_type(name) {
                    return Some(known.qname());
                }
                if is_collection(name) || is_map(name) || is_element_container(name) {
                    return args.first().and_then(|arg| self.referenced_type_qname(arg));
                }
                self.type_definitions.get(name).map(|def| def.qname())
            }
            TypeRef::Array(component) => match component.as_ref() {
                // byte arrays bind to base64Binary, not a byte sequence
                TypeRef::Primitive(Primitive::Byte) => {
                    known_types::known_type("byte[]").map(|k| k.qname())
                }
                component => self.referenced_type_qname(component),
            },
            TypeRef::Adapter { adapting } => self.referenced_type_qname(adapting),
            TypeRef::Variable { upper_bound } => self.referenced_type_qname(upper_bound),
            TypeRef::Wildcard { extends_bound, .. } => extends_bound
                .as_ref()
                .and_then(|bound| self.referenced_type_qname(bound)),
        }
    }

    /// The implicit namespace-level element for a member whose effective
    /// namespace diverges from its owning type's, or `None`
    fn implicit_element(
        &self,
        owner: &TypeDefinition,
        element: &Element,
    ) -> Option<ImplicitSchemaElement> {
        if element.element_ref {
            return None;
        }
        let qualified = matches!(element.accessor.form, XmlNsForm::Qualified);
        let element_namespace = element.effective_namespace();
        if element_namespace != owner.namespace && (qualified || !element_namespace.is_empty()) {
            let name = match &element.wrapper {
                Some(wrapper) => wrapper.name.clone(),
                None => element.accessor.name.clone(),
            };
            Some(ImplicitSchemaElement {
                name,
                namespace: element_namespace.to_string(),
                type_qname: self.referenced_type_qname(element.accessor.resolved_type()),
                container_qname: owner.qname(),
                wrapped: element.is_wrapped(),
            })
        } else {
            None
        }
    }

    /// The implicit namespace-level attribute for a member whose namespace
    /// diverges from its owning type's, or `None`
    fn implicit_attribute(
        &self,
        owner: &TypeDefinition,
        attribute: &Attribute,
    ) -> Option<ImplicitSchemaAttribute> {
        let qualified = matches!(attribute.accessor.form, XmlNsForm::Qualified);
        let attribute_namespace = &attribute.accessor.namespace;
        if attribute_namespace != &owner.namespace && (qualified || !attribute_namespace.is_empty())
        {
            Some(ImplicitSchemaAttribute {
                name: attribute.accessor.name.clone(),
                namespace: attribute_namespace.clone(),
                type_qname: self.referenced_type_qname(attribute.accessor.resolved_type()),
                container_qname: owner.qname(),
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::{
        AdapterType, DeclarationIndex, MemberDeclaration, PackageDeclaration, TypeDeclaration,
        XmlTypeAnnotation,
    };
    use crate::model::type_definition::TypeDefinitionKind;
    use pretty_assertions::assert_eq;

    fn context(index: DeclarationIndex) -> ModelContext {
        ModelContext::new(Arc::new(index), &ModelConfig::new())
    }

    #[test]
    fn test_interface_with_type_annotation_is_fatal() {
        let index = DeclarationIndex::new().with_type(
            TypeDeclaration::interface("com.example.Shape")
                .with_xml_type(XmlTypeAnnotation::default()),
        );
        let ctx = context(index);
        let declaration = TypeDeclaration::interface("com.example.Shape")
            .with_xml_type(XmlTypeAnnotation::default());
        let err = ctx.create_type_definition(&declaration).unwrap_err();
        assert!(err.to_string().contains("interface"));
    }

    #[test]
    fn test_plain_interface_is_tolerated() {
        let ctx = context(DeclarationIndex::new());
        let declaration = TypeDeclaration::interface("com.example.Marker");
        assert!(ctx.create_type_definition(&declaration).is_ok());
    }

    #[test]
    fn test_adapter_narrowing() {
        let adapting = TypeDeclaration::class("com.example.MoneyView").with_member(
            MemberDeclaration::element("amount", TypeRef::declared("java.math.BigDecimal")),
        );
        let adapted = TypeDeclaration::class("com.example.Money").with_adapter(AdapterType::new(
            "com.example.MoneyAdapter",
            TypeRef::declared("com.example.MoneyView"),
        ));
        let index = DeclarationIndex::new()
            .with_type(adapting)
            .with_type(adapted.clone());
        let ctx = context(index);

        let type_def = ctx.create_type_definition(&adapted).unwrap();
        assert_eq!(type_def.qualified_name, "com.example.MoneyView");
    }

    #[test]
    fn test_unresolvable_adapter_is_fatal() {
        let adapted = TypeDeclaration::class("com.example.Money").with_adapter(AdapterType::new(
            "com.example.MoneyAdapter",
            TypeRef::declared("com.example.Missing"),
        ));
        let ctx = context(DeclarationIndex::new().with_type(adapted.clone()));
        let err = ctx.create_type_definition(&adapted).unwrap_err();
        assert!(err.to_string().contains("com.example.Missing"));
    }

    #[test]
    fn test_simple_type_downgrade() {
        let declaration = TypeDeclaration::class("com.example.Label").with_member(
            MemberDeclaration::value("value", TypeRef::declared("java.lang.String")),
        );
        let ctx = context(DeclarationIndex::new().with_type(declaration.clone()));
        let type_def = ctx.create_type_definition(&declaration).unwrap();
        assert_eq!(type_def.kind, TypeDefinitionKind::Simple);
    }

    #[test]
    fn test_superclass_attribute_blocks_downgrade() {
        let base = TypeDeclaration::class("com.example.Base").with_member(
            MemberDeclaration::attribute("id", TypeRef::declared("java.lang.String")),
        );
        let declaration = TypeDeclaration::class("com.example.Label")
            .with_superclass(TypeRef::declared("com.example.Base"))
            .with_member(MemberDeclaration::value(
                "value",
                TypeRef::declared("java.lang.String"),
            ));
        let ctx = context(
            DeclarationIndex::new()
                .with_type(base)
                .with_type(declaration.clone()),
        );
        let type_def = ctx.create_type_definition(&declaration).unwrap();
        assert_eq!(type_def.kind, TypeDefinitionKind::Complex);
    }

    #[test]
    fn test_package_schema_is_applied() {
        let declaration = TypeDeclaration::class("com.example.Order");
        let index = DeclarationIndex::new()
            .with_type(declaration.clone())
            .with_package(PackageDeclaration::new("com.example").with_namespace("urn:orders"));
        let ctx = context(index);
        let type_def = ctx.create_type_definition(&declaration).unwrap();
        assert_eq!(type_def.namespace, "urn:orders");
        assert_eq!(type_def.schema.namespace, "urn:orders");
    }

    #[test]
    fn test_add_type_registers_schema_info() {
        let declaration = TypeDeclaration::class("com.example.Order");
        let index = DeclarationIndex::new()
            .with_type(declaration)
            .with_package(PackageDeclaration::new("com.example").with_namespace("urn:orders"));
        let mut ctx = context(index);
        ctx.add_type("com.example.Order").unwrap();

        assert!(ctx.type_definition_for("com.example.Order").is_some());
        let info = ctx.schemas().get("urn:orders").unwrap();
        assert!(info.has_type_definition("com.example.Order"));
        assert!(info.has_package("com.example"));
    }

    #[test]
    fn test_unknown_declaration_is_an_error() {
        let mut ctx = context(DeclarationIndex::new());
        assert!(ctx.add_type("com.example.Missing").is_err());
    }

    #[test]
    fn test_package_specified_types_come_from_config() {
        let config = ModelConfig::from_json(
            r#"{
                "package_types": [
                    {"package": "com.example", "types": {"com.example.Money": "xs:decimal"}}
                ]
            }"#,
        )
        .unwrap();
        let ctx = ModelContext::new(Arc::new(DeclarationIndex::new()), &config);

        let types = ctx.package_specified_types("com.example").unwrap();
        assert_eq!(types["com.example.Money"], "xs:decimal");
        assert!(ctx.package_specified_types("com.other").is_none());
    }
}
