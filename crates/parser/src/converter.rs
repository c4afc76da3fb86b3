//! Builds the documentation model from a parsed declaration tree
//!
//! Services come first: each rpc gets its synthesized route, HTTP verb, and
//! streaming kind, and its request/response payload message is resolved to a
//! field list. The payload type names form an exclusion set; the tree walk
//! that follows collects every enum and every message not in that set into
//! the document's standalone catalogs, under fully qualified dotted names.

use crate::ast::{
    Decl, EnumDecl, MessageDecl, MessageElement, ProtoUnit, RpcDecl, ServiceDecl,
};
use protodoc_common::{
    DocError, Document, Enum, EnumValue, Field, Method, Object, Payload, Result, Service,
    StreamingKind,
};
use std::collections::HashSet;

/// Package name substitute when the schema has no `package` declaration
const MISSING_PACKAGE: &str = "(missed-package)";

/// Build the documentation model for one parsed schema file
pub fn build_document(unit: &ProtoUnit) -> Result<Document> {
    let package = unit.package.as_deref().unwrap_or(MISSING_PACKAGE);

    let mut document = Document::default();
    for decl in &unit.decls {
        if let Decl::Service(service) = decl {
            document.services.push(build_service(service, package, unit)?);
        }
    }
    collect_objects_and_enums(&mut document, unit);

    Ok(document)
}

fn build_service(decl: &ServiceDecl, package: &str, unit: &ProtoUnit) -> Result<Service> {
    let methods = decl
        .rpcs
        .iter()
        .map(|rpc| build_method(rpc, package, &decl.name, unit))
        .collect::<Result<Vec<_>>>()?;

    Ok(Service {
        comment: compose_leading(&decl.leading_comments),
        package_name: package.to_string(),
        service_name: decl.name.clone(),
        methods,
    })
}

fn build_method(rpc: &RpcDecl, package: &str, service_name: &str, unit: &ProtoUnit) -> Result<Method> {
    let streaming = streaming_kind(rpc);
    let http_method = if streaming.is_streaming() {
        // Streaming endpoints open a WebSocket-style channel
        "GET"
    } else {
        "POST"
    };

    Ok(Method {
        package_name: package.to_string(),
        service_name: service_name.to_string(),
        method_name: rpc.name.clone(),
        route: format!("/{}/{}/{}", package, service_name, rpc.name),
        http_method: http_method.to_string(),
        streaming,
        comment: compose_comment(&rpc.leading_comments, rpc.inline_comment.as_deref(), "\n"),
        request: build_payload(&rpc.request_type, unit)?,
        response: build_payload(&rpc.response_type, unit)?,
    })
}

fn streaming_kind(rpc: &RpcDecl) -> StreamingKind {
    match (rpc.request_stream, rpc.response_stream) {
        (true, true) => StreamingKind::BidirectionalStreaming,
        (true, false) => StreamingKind::ClientStreaming,
        (false, true) => StreamingKind::ServerStreaming,
        (false, false) => StreamingKind::Unary,
    }
}

/// Resolve an rpc payload type to its message declaration and extract its
/// fields. A payload message that does not exist is fatal.
fn build_payload(type_name: &str, unit: &ProtoUnit) -> Result<Payload> {
    let message = find_message(unit, type_name)
        .ok_or_else(|| DocError::MissingMessage(type_name.to_string()))?;

    Ok(Payload {
        type_name: type_name.to_string(),
        fields: extract_fields(message, &message.name),
    })
}

/// Look up a top-level message by name
fn find_message<'a>(unit: &'a ProtoUnit, name: &str) -> Option<&'a MessageDecl> {
    unit.decls.iter().find_map(|decl| match decl {
        Decl::Message(message) if message.name == name => Some(message),
        _ => None,
    })
}

/// One `Field` per plain field declared directly in the message body, in
/// declaration order. Nested declarations, maps, and oneof groups are not
/// fields. The declared type name stays raw; resolution happens at render
/// time against the finished document.
fn extract_fields(message: &MessageDecl, enclosing: &str) -> Vec<Field> {
    message
        .body
        .iter()
        .filter_map(|element| match element {
            MessageElement::Field(field) => Some(Field {
                name: field.name.clone(),
                type_name: field.type_name.clone(),
                repeated: field.repeated,
                comment: compose_comment(
                    &field.leading_comments,
                    field.inline_comment.as_deref(),
                    " ",
                ),
                enclosing: enclosing.to_string(),
            }),
            _ => None,
        })
        .collect()
}

/// Walk the whole tree collecting enums and standalone objects in
/// depth-first declaration order. Messages used as a request/response
/// payload are excluded from the objects list, but their nested
/// declarations are still collected.
fn collect_objects_and_enums(document: &mut Document, unit: &ProtoUnit) {
    let excludes: HashSet<String> = document
        .services
        .iter()
        .flat_map(|s| s.methods.iter())
        .flat_map(|m| [m.request.type_name.clone(), m.response.type_name.clone()])
        .collect();

    for decl in &unit.decls {
        match decl {
            Decl::Message(message) => walk_message(document, message, "", &excludes),
            Decl::Enum(decl) => {
                let e = build_enum(decl, "");
                document.enums.push(e);
            }
            Decl::Service(_) => {}
        }
    }
}

fn walk_message(
    document: &mut Document,
    message: &MessageDecl,
    scope: &str,
    excludes: &HashSet<String>,
) {
    let qualified = qualify(scope, &message.name);

    if !excludes.contains(qualified.as_str()) {
        document.objects.push(Object {
            name: qualified.clone(),
            comment: compose_leading(&message.leading_comments),
            attrs: extract_fields(message, &qualified),
        });
    }

    for element in &message.body {
        match element {
            MessageElement::Message(nested) => {
                walk_message(document, nested, &qualified, excludes);
            }
            MessageElement::Enum(nested) => {
                let e = build_enum(nested, &qualified);
                document.enums.push(e);
            }
            _ => {}
        }
    }
}

fn build_enum(decl: &EnumDecl, scope: &str) -> Enum {
    Enum {
        name: qualify(scope, &decl.name),
        comment: compose_leading(&decl.leading_comments),
        constants: decl
            .values
            .iter()
            .map(|value| EnumValue {
                name: value.name.clone(),
                value: value.number.clone(),
                comment: compose_comment(
                    &value.leading_comments,
                    value.inline_comment.as_deref(),
                    " ",
                ),
            })
            .collect(),
    }
}

fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", scope, name)
    }
}

/// Join leading comment fragments with single spaces, in declaration order
fn compose_leading(fragments: &[String]) -> String {
    fragments.join(" ")
}

/// Compose leading and inline comments into one display string. `separator`
/// joins the two sides when both are present; either side alone is returned
/// verbatim.
fn compose_comment(leading: &[String], inline: Option<&str>, separator: &str) -> String {
    let head = compose_leading(leading);
    let inline = inline.unwrap_or("");
    if head.is_empty() {
        return inline.to_string();
    }
    if inline.is_empty() {
        return head;
    }
    format!("{}{}{}", head, separator, inline)
}
