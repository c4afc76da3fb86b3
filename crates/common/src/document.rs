//! The documentation model
//!
//! One `Document` is built per schema file and never mutated afterwards;
//! renderers only read it. Messages used directly as a method's request or
//! response payload live inside that method, every other message becomes a
//! standalone [`Object`]. Enums are always standalone.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::resolve::anchor;

/// Top-level documentation model for one schema file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Services declared at the top level of the schema
    pub services: Vec<Service>,

    /// Messages not used directly as a request/response payload
    pub objects: Vec<Object>,

    /// Every enum in the schema, nested ones included
    pub enums: Vec<Enum>,
}

/// A named group of RPC methods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Leading comment of the service declaration
    pub comment: String,

    /// Package name of the schema file
    pub package_name: String,

    pub service_name: String,

    /// Methods in declaration order
    pub methods: Vec<Method>,
}

/// One RPC method of a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Method {
    pub package_name: String,
    pub service_name: String,
    pub method_name: String,

    /// Synthesized route: `/<package>/<service>/<method>`
    pub route: String,

    /// `POST` for unary methods, `GET` for streaming ones
    pub http_method: String,

    pub streaming: StreamingKind,

    /// Leading and inline comments of the rpc declaration, newline-joined
    pub comment: String,

    pub request: Payload,
    pub response: Payload,
}

/// Which side(s) of an RPC exchange are multi-valued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreamingKind {
    Unary,
    ClientStreaming,
    ServerStreaming,
    BidirectionalStreaming,
}

impl StreamingKind {
    /// Streaming methods are served over a long-lived GET-initiated channel
    pub fn is_streaming(&self) -> bool {
        !matches!(self, StreamingKind::Unary)
    }
}

impl fmt::Display for StreamingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StreamingKind::Unary => "unary",
            StreamingKind::ClientStreaming => "client-streaming",
            StreamingKind::ServerStreaming => "server-streaming",
            StreamingKind::BidirectionalStreaming => "bidirectional-streaming",
        };
        write!(f, "{}", s)
    }
}

/// Request or response of a method
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payload {
    /// The message type name as declared in the rpc statement. Also feeds
    /// the exclusion set that keeps payload messages out of the objects list.
    pub type_name: String,

    /// Fields of the payload message, in declaration order
    pub fields: Vec<Field>,
}

impl Payload {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A field declared directly in a message body
///
/// The declared type name is stored raw; resolution against the document's
/// enum/object catalogs happens at render time (see [`crate::resolve`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    /// Type name exactly as written in the schema
    pub type_name: String,

    pub repeated: bool,

    /// Leading and inline comments, space-joined
    pub comment: String,

    /// Dot-joined ancestor message names, used only for type resolution
    pub enclosing: String,
}

/// A user-defined message that is not a request/response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Object {
    /// Fully qualified name, dot-joined by nesting
    pub name: String,

    /// Leading comment of the message declaration
    pub comment: String,

    pub attrs: Vec<Field>,
}

impl Object {
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

/// A user-defined type with a fixed list of named constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enum {
    /// Fully qualified name, dot-joined by nesting
    pub name: String,

    /// Leading comment of the enum declaration
    pub comment: String,

    pub constants: Vec<EnumValue>,
}

/// One named constant of an enum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,

    /// Numeric value as written in the schema
    pub value: String,

    /// Leading and inline comments, space-joined
    pub comment: String,
}

impl Service {
    /// Markdown cross-reference anchor for this service
    pub fn href(&self) -> String {
        format!("#service-{}", self.service_name.to_lowercase())
    }
}

impl Method {
    /// Markdown cross-reference anchor for this method
    pub fn href(&self) -> String {
        format!(
            "#method-{}{}",
            self.service_name.to_lowercase(),
            self.method_name.to_lowercase()
        )
    }
}

impl Object {
    /// Markdown cross-reference anchor for this object
    pub fn href(&self) -> String {
        format!("#object-{}", anchor(&self.name))
    }
}

impl Enum {
    /// Markdown cross-reference anchor for this enum
    pub fn href(&self) -> String {
        format!("#enum-{}", anchor(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaming_kind_display() {
        assert_eq!(StreamingKind::Unary.to_string(), "unary");
        assert_eq!(
            StreamingKind::ClientStreaming.to_string(),
            "client-streaming"
        );
        assert_eq!(
            StreamingKind::ServerStreaming.to_string(),
            "server-streaming"
        );
        assert_eq!(
            StreamingKind::BidirectionalStreaming.to_string(),
            "bidirectional-streaming"
        );
    }

    #[test]
    fn test_hrefs() {
        let method = Method {
            package_name: "pet".to_string(),
            service_name: "PetService".to_string(),
            method_name: "GetPet".to_string(),
            route: "/pet/PetService/GetPet".to_string(),
            http_method: "POST".to_string(),
            streaming: StreamingKind::Unary,
            comment: String::new(),
            request: Payload::default(),
            response: Payload::default(),
        };
        assert_eq!(method.href(), "#method-petservicegetpet");

        let object = Object {
            name: "Foo.Bar".to_string(),
            comment: String::new(),
            attrs: vec![],
        };
        assert_eq!(object.href(), "#object-foobar");

        let e = Enum {
            name: "Foo.Bar".to_string(),
            comment: String::new(),
            constants: vec![],
        };
        assert_eq!(e.href(), "#enum-foobar");
    }
}
