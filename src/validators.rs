//! Per-target validation passes
//!
//! A validator runs after core model construction and checks the built
//! type definitions and endpoint interfaces against the constraints of one
//! output format. [`AmfValidator`] is the AMF target: reflection-based
//! instantiation requires a public no-arg constructor and property-backed
//! accessors, and a handful of schema types have no AMF mapping.

use crate::declarations::{is_collection, is_map, DeclarationSource, TypeRef};
use crate::error::{Error, Result, ValidationError};
use crate::model::accessors::Accessor;
use crate::model::endpoints::EndpointInterface;
use crate::model::type_definition::{TypeDefinition, TypeDefinitionKind};
use std::collections::HashSet;

/// The outcome of one validation pass
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// An empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error against a declaration
    pub fn add_error(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.errors
            .push(ValidationError::new(message).with_subject(subject));
    }

    /// Whether any errors were recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The recorded errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Merge another result into this one
    pub fn aggregate(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    /// Fold into a `Result`, failing with the first recorded error
    pub fn into_result(mut self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self.errors.remove(0)))
        }
    }
}

/// Validator for the AMF output format
pub struct AmfValidator {
    unsupported_types: HashSet<&'static str>,
}

impl AmfValidator {
    /// Create the validator with the AMF unsupported-type set
    pub fn new() -> Self {
        let mut unsupported_types = HashSet::new();
        unsupported_types.insert("javax.xml.namespace.QName");
        unsupported_types.insert("javax.xml.datatype.XMLGregorianCalendar");
        unsupported_types.insert("javax.xml.datatype.Duration");
        unsupported_types.insert("java.awt.Image");
        unsupported_types.insert("javax.xml.transform.Source");
        Self { unsupported_types }
    }

    /// Validate a type definition against the AMF constraints
    pub fn validate_type_definition(
        &self,
        type_def: &TypeDefinition,
        source: &dyn DeclarationSource,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        if self.is_transient_type(type_def, source) {
            return result;
        }

        match &type_def.kind {
            TypeDefinitionKind::Complex => {
                if !has_public_no_arg_constructor(type_def) {
                    result.add_error(
                        &type_def.qualified_name,
                        "the mapping from AMF to XML requires a public no-arg constructor",
                    );
                }

                for attribute in &type_def.attributes {
                    self.check_accessor(&attribute.accessor, type_def, source, &mut result);
                }
                for element in &type_def.elements {
                    self.check_accessor(&element.accessor, type_def, source, &mut result);
                }
                if let Some(value) = &type_def.value {
                    self.check_accessor(&value.accessor, type_def, source, &mut result);
                }
            }
            TypeDefinitionKind::Simple => {
                if !has_public_no_arg_constructor(type_def) {
                    result.add_error(
                        &type_def.qualified_name,
                        "the mapping from AMF to XML requires a public no-arg constructor",
                    );
                }
            }
            TypeDefinitionKind::Enum { .. } | TypeDefinitionKind::QNameEnum { .. } => {}
        }

        result
    }

    /// Validate an endpoint interface against the AMF constraints
    pub fn validate_endpoint_interface(
        &self,
        endpoint: &EndpointInterface,
        source: &dyn DeclarationSource,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        if endpoint.transient {
            return result;
        }

        for method in &endpoint.methods {
            if method.transient {
                continue;
            }
            if !self.is_supported(&method.return_type, source) {
                result.add_error(
                    format!("{}#{}", endpoint.qualified_name, method.name),
                    format!(
                        "AMF doesn't support '{}' as a return type",
                        method.return_type
                    ),
                );
            }
            for param in &method.params {
                if !self.is_supported(&param.ty, source) {
                    result.add_error(
                        format!("{}#{}", endpoint.qualified_name, method.name),
                        format!("AMF doesn't support '{}' as a parameter type", param.ty),
                    );
                }
            }
        }

        if endpoint.implementations.len() > 1 {
            result.add_error(
                &endpoint.qualified_name,
                format!(
                    "AMF doesn't support two endpoint implementations for interface '{}'; found {} ({})",
                    endpoint.qualified_name,
                    endpoint.implementations.len(),
                    endpoint.implementations.join(", ")
                ),
            );
        }

        result
    }

    fn check_accessor(
        &self,
        accessor: &Accessor,
        owner: &TypeDefinition,
        source: &dyn DeclarationSource,
        result: &mut ValidationResult,
    ) {
        if accessor.transient {
            return;
        }

        let subject = format!("{}#{}", owner.qualified_name, accessor.name);

        if accessor.field {
            result.add_error(
                &subject,
                "AMF mapping can't use fields for accessors; use properties",
            );
        }

        if !self.is_supported(accessor.resolved_type(), source) {
            result.add_error(
                subject,
                format!("AMF doesn't support the '{}' type", accessor.resolved_type()),
            );
        }
    }

    /// Whether the given type is supported, following adapters first and
    /// recursing into collection/map type arguments
    fn is_supported(&self, ty: &TypeRef, source: &dyn DeclarationSource) -> bool {
        match ty {
            TypeRef::Adapter { adapting } => self.is_supported(adapting, source),
            TypeRef::Declared { name, args } => {
                if self.is_transient_declaration(name, source) {
                    return false;
                }
                if is_collection(name) || is_map(name) {
                    return args.iter().all(|arg| self.is_supported(arg, source));
                }
                !self.unsupported_types.contains(name.as_str())
            }
            // primitives, arrays, variables and wildcards are assumed
            // complex-and-supported
            _ => true,
        }
    }

    fn is_transient_type(&self, type_def: &TypeDefinition, source: &dyn DeclarationSource) -> bool {
        type_def.transient
            || source
                .package(&type_def.package)
                .map(|p| p.transient)
                .unwrap_or(false)
    }

    fn is_transient_declaration(&self, qualified_name: &str, source: &dyn DeclarationSource) -> bool {
        match source.declaration(qualified_name) {
            Some(declaration) => {
                declaration.annotations.transient
                    || source
                        .package(&declaration.package)
                        .map(|p| p.transient)
                        .unwrap_or(false)
            }
            None => false,
        }
    }
}

impl Default for AmfValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn has_public_no_arg_constructor(type_def: &TypeDefinition) -> bool {
    type_def
        .constructors
        .iter()
        .any(|c| c.public && c.arity == 0)
}
