//! `.proto` schema parsing for protodoc
//!
//! This crate turns the text of a Protocol Buffer schema file into the
//! documentation model (`Document`) in two stages:
//!
//! 1. A comment-preserving lexer and recursive-descent parser produce a raw
//!    declaration tree (`ProtoUnit`). The parser is permissive: statements
//!    that carry no documentation value (options, imports, reserved ranges,
//!    oneof groups) are parsed and discarded.
//! 2. The converter builds the `Document`: it composes comments into display
//!    strings, synthesizes each method's route/verb/streaming kind, resolves
//!    request and response payloads into field lists, and walks the whole
//!    tree collecting standalone objects and enums under their fully
//!    qualified names.
//!
//! ## Example
//! ```rust,ignore
//! use protodoc_parser::ProtoParser;
//!
//! let unit = ProtoParser::from_file("pet.proto")?.parse()?;
//! let document = protodoc_parser::build_document(&unit)?;
//! ```

mod ast;
mod converter;
mod lexer;
mod parser;

pub use ast::{
    Decl, EnumDecl, EnumValueDecl, FieldDecl, MapFieldDecl, MessageDecl, MessageElement, ProtoUnit,
    RpcDecl, ServiceDecl,
};
pub use converter::build_document;
pub use parser::ProtoParser;

use protodoc_common::{Document, Result};
use std::path::Path;

/// Parse a schema file and build its documentation model
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let unit = ProtoParser::from_file(path)?.parse()?;
    build_document(&unit)
}

/// Parse schema source text and build its documentation model
pub fn parse_source(source: &str) -> Result<Document> {
    let unit = ProtoParser::from_source(source).parse()?;
    build_document(&unit)
}
