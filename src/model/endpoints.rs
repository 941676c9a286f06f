//! Endpoint interfaces
//!
//! A minimal view of a web-service endpoint interface, consumed by
//! target-format validator passes.

use crate::declarations::TypeRef;

/// A parameter of a web method
#[derive(Debug, Clone)]
pub struct WebParam {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: TypeRef,
}

/// A method of an endpoint interface
#[derive(Debug, Clone)]
pub struct WebMethod {
    /// Method name
    pub name: String,
    /// Return type
    pub return_type: TypeRef,
    /// Parameters in declaration order
    pub params: Vec<WebParam>,
    /// Marked transient for target-format mapping
    pub transient: bool,
}

impl WebMethod {
    /// Create a web method
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            return_type,
            params: Vec::new(),
            transient: false,
        }
    }

    /// Add a parameter
    pub fn with_param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.params.push(WebParam {
            name: name.into(),
            ty,
        });
        self
    }

    /// Mark the method transient for target-format mapping
    pub fn as_transient(mut self) -> Self {
        self.transient = true;
        self
    }
}

/// An endpoint interface with its bound implementations
#[derive(Debug, Clone)]
pub struct EndpointInterface {
    /// Qualified name of the interface
    pub qualified_name: String,
    /// Web methods
    pub methods: Vec<WebMethod>,
    /// Qualified names of bound implementations
    pub implementations: Vec<String>,
    /// Marked transient for target-format mapping
    pub transient: bool,
}

impl EndpointInterface {
    /// Create an endpoint interface
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            methods: Vec::new(),
            implementations: Vec::new(),
            transient: false,
        }
    }

    /// Add a web method
    pub fn with_method(mut self, method: WebMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a bound implementation
    pub fn with_implementation(mut self, qualified_name: impl Into<String>) -> Self {
        self.implementations.push(qualified_name.into());
        self
    }

    /// Mark the interface transient for target-format mapping
    pub fn as_transient(mut self) -> Self {
        self.transient = true;
        self
    }
}
