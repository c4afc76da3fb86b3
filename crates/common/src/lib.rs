//! Common types and utilities for protodoc
//!
//! This crate contains the documentation model built from a parsed schema,
//! the error types shared across the parser, generator, and CLI components,
//! and the field type resolver.

mod document;
mod resolve;

pub use document::{
    Document, Enum, EnumValue, Field, Method, Object, Payload, Service, StreamingKind,
};
pub use resolve::{anchor, display_type, display_type_linked, resolve, TypeRef, SCALAR_TYPES};

use thiserror::Error;

/// Errors that can occur while building or rendering documentation
#[derive(Error, Debug)]
pub enum DocError {
    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Schema has no message named {0:?}")]
    MissingMessage(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for protodoc operations
pub type Result<T> = std::result::Result<T, DocError>;
