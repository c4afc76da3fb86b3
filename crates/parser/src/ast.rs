//! Raw `.proto` declaration tree
//!
//! These types mirror the schema as written, comments attached but nothing
//! resolved. `leading_comments` holds the comment fragments found directly
//! above a declaration, one entry per comment; `inline_comment` is a comment
//! starting on the same line as the declaration's terminator.

/// One parsed schema file
#[derive(Debug, Clone, Default)]
pub struct ProtoUnit {
    /// The `package` declaration, if present
    pub package: Option<String>,

    /// Top-level declarations in source order
    pub decls: Vec<Decl>,
}

/// A top-level declaration
#[derive(Debug, Clone)]
pub enum Decl {
    Service(ServiceDecl),
    Message(MessageDecl),
    Enum(EnumDecl),
}

#[derive(Debug, Clone)]
pub struct ServiceDecl {
    pub name: String,
    pub leading_comments: Vec<String>,
    pub rpcs: Vec<RpcDecl>,
}

#[derive(Debug, Clone)]
pub struct RpcDecl {
    pub name: String,
    pub leading_comments: Vec<String>,
    pub inline_comment: Option<String>,
    pub request_type: String,
    pub request_stream: bool,
    pub response_type: String,
    pub response_stream: bool,
}

#[derive(Debug, Clone)]
pub struct MessageDecl {
    pub name: String,
    pub leading_comments: Vec<String>,
    pub body: Vec<MessageElement>,
}

/// An element of a message body
#[derive(Debug, Clone)]
pub enum MessageElement {
    Field(FieldDecl),
    Map(MapFieldDecl),
    Message(MessageDecl),
    Enum(EnumDecl),
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,

    /// Type name as written, possibly dotted
    pub type_name: String,

    pub repeated: bool,
    pub leading_comments: Vec<String>,
    pub inline_comment: Option<String>,
}

/// A `map<K, V>` field. Parsed so the surrounding message survives, but not
/// a documentation field.
#[derive(Debug, Clone)]
pub struct MapFieldDecl {
    pub name: String,
    pub key_type: String,
    pub value_type: String,
    pub leading_comments: Vec<String>,
    pub inline_comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: String,
    pub leading_comments: Vec<String>,
    pub values: Vec<EnumValueDecl>,
}

#[derive(Debug, Clone)]
pub struct EnumValueDecl {
    pub name: String,

    /// Numeric value as written, sign included
    pub number: String,

    pub leading_comments: Vec<String>,
    pub inline_comment: Option<String>,
}
