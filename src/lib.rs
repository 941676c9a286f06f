//! # xmlbind
//!
//! Build-time XML binding model construction.
//!
//! Given annotated host type declarations surfaced through an abstract
//! declaration-inspection interface, this library classifies them into XML
//! type-definition kinds (complex, simple, enum, QName-enum), computes the
//! full reference closure over everything they reach (accessors,
//! collections, adapters, generics, "see also" hints), and assembles a
//! namespace-partitioned schema registry for downstream artifact
//! generators (WSDL, API docs, client stubs).
//!
//! ## Example
//!
//! ```rust,ignore
//! use xmlbind::config::ModelConfig;
//! use xmlbind::declarations::DeclarationIndex;
//! use xmlbind::model::ModelContext;
//! use std::sync::Arc;
//!
//! let index = DeclarationIndex::new(); // populated by the front end
//! let mut context = ModelContext::new(Arc::new(index), &ModelConfig::new());
//! context.add_type("com.example.Order")?;
//!
//! for (namespace, info) in context.schemas() {
//!     println!("{} -> {} type definitions", namespace, info.type_definitions.len());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;

// Utilities
pub mod namespaces;
pub mod config;

// Input oracle
pub mod declarations;

// The semantic model
pub mod model;

// Per-target validation passes
pub mod validators;

// Re-exports for convenience
pub use error::{Error, Result};
pub use model::ModelContext;

/// Version of the xmlbind library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML Schema instance namespace
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// WSDL namespace
pub const WSDL_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/";
