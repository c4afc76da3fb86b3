//! Field type resolution
//!
//! A field stores its declared type name raw; classification happens here,
//! at render time, against the completed document's catalogs. The search
//! walks the field's enclosing scope innermost to outermost, so a name
//! declared in a nearer scope shadows one declared further out. Enums take
//! priority over objects at every scope depth. Resolution never fails: a
//! name that matches nothing is an unresolved external reference, which is
//! a displayed outcome rather than an error.

use crate::document::{Document, Field};

/// The fixed set of built-in scalar type names
pub const SCALAR_TYPES: [&str; 15] = [
    "double", "float", "int32", "int64", "uint32", "uint64", "sint32", "sint64", "fixed32",
    "fixed64", "sfixed32", "sfixed64", "bool", "string", "bytes",
];

/// Outcome of classifying a field's declared type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// The declared type name was empty
    Nil,

    /// A built-in scalar
    Scalar(String),

    /// A known enum, carrying its fully qualified catalog name
    Enum(String),

    /// A known object, carrying its fully qualified catalog name
    Object(String),

    /// Matched neither catalog; carries the raw declared name
    Unresolved(String),
}

/// Classify a field's declared type name within `doc`
pub fn resolve(doc: &Document, field: &Field) -> TypeRef {
    if field.type_name.is_empty() {
        return TypeRef::Nil;
    }
    if SCALAR_TYPES.contains(&field.type_name.as_str()) {
        return TypeRef::Scalar(field.type_name.clone());
    }
    for qualified in scope_candidates(&field.enclosing, &field.type_name) {
        if let Some(e) = doc.enums.iter().find(|e| e.name == qualified) {
            return TypeRef::Enum(e.name.clone());
        }
    }
    for qualified in scope_candidates(&field.enclosing, &field.type_name) {
        if let Some(o) = doc.objects.iter().find(|o| o.name == qualified) {
            return TypeRef::Object(o.name.clone());
        }
    }
    TypeRef::Unresolved(field.type_name.clone())
}

/// Candidate fully qualified names for `type_name`, innermost scope first,
/// ending with the bare name at global scope
fn scope_candidates(enclosing: &str, type_name: &str) -> Vec<String> {
    let segments: Vec<&str> = enclosing.split('.').collect();
    let mut candidates = Vec::with_capacity(segments.len() + 1);
    for depth in (0..=segments.len()).rev() {
        let scope = segments[..depth].join(".");
        if scope.is_empty() {
            candidates.push(type_name.to_string());
        } else {
            candidates.push(format!("{}.{}", scope, type_name));
        }
    }
    candidates
}

/// Plain-text rendering of a field's type
pub fn display_type(doc: &Document, field: &Field) -> String {
    let label = match resolve(doc, field) {
        TypeRef::Nil => return "(nil)".to_string(),
        TypeRef::Scalar(name) => name,
        TypeRef::Enum(name) => format!("enum {}", name),
        TypeRef::Object(name) => format!("object {}", name),
        TypeRef::Unresolved(raw) => format!("({})", raw),
    };
    if field.repeated {
        format!("array of {}", label)
    } else {
        label
    }
}

/// Cross-reference rendering of a field's type: enum and object matches
/// become Markdown links to their section anchors
pub fn display_type_linked(doc: &Document, field: &Field) -> String {
    let label = match resolve(doc, field) {
        TypeRef::Nil => return "(nil)".to_string(),
        TypeRef::Scalar(name) => name,
        TypeRef::Enum(name) => format!("[enum {}](#enum-{})", name, anchor(&name)),
        TypeRef::Object(name) => format!("[object {}](#object-{})", name, anchor(&name)),
        TypeRef::Unresolved(raw) => format!("({})", raw),
    };
    if field.repeated {
        format!("array of {}", label)
    } else {
        label
    }
}

/// Stable anchor identifier for a fully qualified type name: lowercased,
/// with the `.` separators removed
pub fn anchor(type_name: &str) -> String {
    type_name
        .to_lowercase()
        .split('.')
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Enum, Object};

    fn field(type_name: &str, enclosing: &str, repeated: bool) -> Field {
        Field {
            name: "f".to_string(),
            type_name: type_name.to_string(),
            repeated,
            comment: String::new(),
            enclosing: enclosing.to_string(),
        }
    }

    fn doc_with(enums: &[&str], objects: &[&str]) -> Document {
        Document {
            services: vec![],
            objects: objects
                .iter()
                .map(|name| Object {
                    name: name.to_string(),
                    comment: String::new(),
                    attrs: vec![],
                })
                .collect(),
            enums: enums
                .iter()
                .map(|name| Enum {
                    name: name.to_string(),
                    comment: String::new(),
                    constants: vec![],
                })
                .collect(),
        }
    }

    #[test]
    fn test_scalars_never_hit_catalogs() {
        // A catalog entry shadowing a scalar name must not win
        let doc = doc_with(&["string"], &["int32"]);
        for name in SCALAR_TYPES {
            let f = field(name, "Outer", false);
            assert_eq!(resolve(&doc, &f), TypeRef::Scalar(name.to_string()));
            assert_eq!(display_type(&doc, &f), name);
        }
    }

    #[test]
    fn test_empty_type_renders_nil_even_when_repeated() {
        let doc = doc_with(&[], &[]);
        let f = field("", "Outer", true);
        assert_eq!(resolve(&doc, &f), TypeRef::Nil);
        assert_eq!(display_type(&doc, &f), "(nil)");
        assert_eq!(display_type_linked(&doc, &f), "(nil)");
    }

    #[test]
    fn test_repeated_prefix() {
        let doc = doc_with(&[], &["Pet"]);
        let f = field("Pet", "", true);
        assert_eq!(display_type(&doc, &f), "array of object Pet");
        assert_eq!(
            display_type_linked(&doc, &f),
            "array of [object Pet](#object-pet)"
        );
        let f = field("Pet", "", false);
        assert_eq!(display_type(&doc, &f), "object Pet");
    }

    #[test]
    fn test_innermost_scope_wins() {
        let doc = doc_with(&["A.T", "A.B.T"], &[]);
        let f = field("T", "A.B", false);
        assert_eq!(resolve(&doc, &f), TypeRef::Enum("A.B.T".to_string()));
    }

    #[test]
    fn test_search_ends_at_global_scope() {
        let doc = doc_with(&["T"], &[]);
        let f = field("T", "A.B.C", false);
        assert_eq!(resolve(&doc, &f), TypeRef::Enum("T".to_string()));
    }

    #[test]
    fn test_enum_beats_object_at_same_depth() {
        let doc = doc_with(&["A.T"], &["A.T"]);
        let f = field("T", "A", false);
        assert_eq!(resolve(&doc, &f), TypeRef::Enum("A.T".to_string()));
    }

    #[test]
    fn test_inner_enum_beats_outer_object() {
        // The whole scope search runs against enums before objects are tried
        let doc = doc_with(&["T"], &["A.T"]);
        let f = field("T", "A", false);
        assert_eq!(resolve(&doc, &f), TypeRef::Enum("T".to_string()));
    }

    #[test]
    fn test_unresolved_renders_bracketed() {
        let doc = doc_with(&[], &[]);
        let f = field("google.protobuf.Timestamp", "Pet", false);
        assert_eq!(
            resolve(&doc, &f),
            TypeRef::Unresolved("google.protobuf.Timestamp".to_string())
        );
        assert_eq!(display_type(&doc, &f), "(google.protobuf.Timestamp)");
    }

    #[test]
    fn test_anchor_is_lowercase_dotless() {
        assert_eq!(anchor("Foo.Bar"), "foobar");
        assert_eq!(anchor("Status"), "status");
    }

    #[test]
    fn test_first_catalog_entry_wins_on_duplicates() {
        let mut doc = doc_with(&["T", "T"], &[]);
        doc.enums[1].comment = "second".to_string();
        let f = field("T", "", false);
        // Declaration order decides; the scan stops at the first entry.
        assert_eq!(resolve(&doc, &f), TypeRef::Enum("T".to_string()));
    }
}
