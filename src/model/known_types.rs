//! Known built-in type mappings
//!
//! The static table mapping built-in host types to canonical schema
//! primitive kinds. Any host type in this table is terminal: the closure
//! walker never descends into it and the classifier never produces a type
//! definition for it.

use crate::namespaces::QName;
use std::collections::HashMap;

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Canonical schema primitive kinds for known host types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownXmlType {
    /// xs:boolean
    Boolean,
    /// xs:byte
    Byte,
    /// xs:double
    Double,
    /// xs:float
    Float,
    /// xs:int
    Int,
    /// xs:long
    Long,
    /// xs:short
    Short,
    /// xs:unsignedShort (host char)
    UnsignedShort,
    /// xs:string
    String,
    /// xs:integer (arbitrary precision)
    Integer,
    /// xs:decimal (arbitrary precision)
    Decimal,
    /// xs:dateTime
    DateTime,
    /// xs:QName
    Qname,
    /// xs:duration
    Duration,
    /// xs:anyType
    AnyType,
    /// xs:base64Binary
    Base64Binary,
}

impl KnownXmlType {
    /// The local name of the schema type
    pub fn local_name(&self) -> &'static str {
        match self {
            KnownXmlType::Boolean => "boolean",
            KnownXmlType::Byte => "byte",
            KnownXmlType::Double => "double",
            KnownXmlType::Float => "float",
            KnownXmlType::Int => "int",
            KnownXmlType::Long => "long",
            KnownXmlType::Short => "short",
            KnownXmlType::UnsignedShort => "unsignedShort",
            KnownXmlType::String => "string",
            KnownXmlType::Integer => "integer",
            KnownXmlType::Decimal => "decimal",
            KnownXmlType::DateTime => "dateTime",
            KnownXmlType::Qname => "QName",
            KnownXmlType::Duration => "duration",
            KnownXmlType::AnyType => "anyType",
            KnownXmlType::Base64Binary => "base64Binary",
        }
    }

    /// The qualified name of the schema type
    pub fn qname(&self) -> QName {
        QName::new(XSD_NAMESPACE, self.local_name())
    }
}

lazy_static::lazy_static! {
    /// Host qualified name to schema primitive kind
    static ref KNOWN_TYPES: HashMap<&'static str, KnownXmlType> = {
        let mut m = HashMap::new();

        // primitives and their boxed forms
        m.insert("boolean", KnownXmlType::Boolean);
        m.insert("java.lang.Boolean", KnownXmlType::Boolean);
        m.insert("byte", KnownXmlType::Byte);
        m.insert("java.lang.Byte", KnownXmlType::Byte);
        m.insert("char", KnownXmlType::UnsignedShort);
        m.insert("java.lang.Character", KnownXmlType::UnsignedShort);
        m.insert("double", KnownXmlType::Double);
        m.insert("java.lang.Double", KnownXmlType::Double);
        m.insert("float", KnownXmlType::Float);
        m.insert("java.lang.Float", KnownXmlType::Float);
        m.insert("int", KnownXmlType::Int);
        m.insert("java.lang.Integer", KnownXmlType::Int);
        m.insert("long", KnownXmlType::Long);
        m.insert("java.lang.Long", KnownXmlType::Long);
        m.insert("short", KnownXmlType::Short);
        m.insert("java.lang.Short", KnownXmlType::Short);

        m.insert("java.lang.String", KnownXmlType::String);
        m.insert("java.math.BigInteger", KnownXmlType::Integer);
        m.insert("java.math.BigDecimal", KnownXmlType::Decimal);

        // calendar/date/timestamp variants all map to dateTime
        m.insert("java.util.Calendar", KnownXmlType::DateTime);
        m.insert("java.util.GregorianCalendar", KnownXmlType::DateTime);
        m.insert("java.util.Date", KnownXmlType::DateTime);
        m.insert("java.sql.Timestamp", KnownXmlType::DateTime);
        m.insert("javax.xml.datatype.XMLGregorianCalendar", KnownXmlType::DateTime);

        m.insert("javax.xml.namespace.QName", KnownXmlType::Qname);
        m.insert("java.net.URI", KnownXmlType::String);
        m.insert("javax.xml.datatype.Duration", KnownXmlType::Duration);
        m.insert("java.lang.Object", KnownXmlType::AnyType);

        // binary blobs
        m.insert("byte[]", KnownXmlType::Base64Binary);
        m.insert("java.awt.Image", KnownXmlType::Base64Binary);
        m.insert("javax.activation.DataHandler", KnownXmlType::Base64Binary);
        m.insert("javax.xml.transform.Source", KnownXmlType::Base64Binary);

        m.insert("java.util.UUID", KnownXmlType::String);

        m
    };
}

/// Look up the schema primitive kind for a host type, if it is known
pub fn known_type(qualified_name: &str) -> Option<KnownXmlType> {
    KNOWN_TYPES.get(qualified_name).copied()
}

/// Whether the host type is in the known-type table
pub fn is_known_type(qualified_name: &str) -> bool {
    KNOWN_TYPES.contains_key(qualified_name)
}
