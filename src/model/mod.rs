//! The semantic model of web-service data types and XML schemas
//!
//! Built once per run by the [`context::ModelContext`] from annotated host
//! declarations, then consumed read-only by downstream artifact generators.

pub mod accessors;
pub mod context;
pub mod endpoints;
pub mod known_types;
pub mod schema;
pub mod type_definition;

pub use accessors::{Accessor, Attribute, Element, Value};
pub use context::ModelContext;
pub use endpoints::{EndpointInterface, WebMethod, WebParam};
pub use known_types::{known_type, KnownXmlType, XSD_NAMESPACE};
pub use schema::{
    ElementDeclaration, ImplicitSchemaAttribute, ImplicitSchemaElement, RootElementDeclaration,
    Schema, SchemaInfo,
};
pub use type_definition::{TypeDefinition, TypeDefinitionKind};
