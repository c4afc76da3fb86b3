//! Serializable views for the Markdown template
//!
//! Tera templates cannot call back into the resolver, so every field's type
//! label and hyperlinked label are precomputed here. The template performs
//! no resolution of its own.

use protodoc_common::{display_type, display_type_linked, Document, Field, Payload};
use serde::Serialize;

#[derive(Serialize)]
struct ServiceView {
    service_name: String,
    comment: String,
    href: String,
    methods: Vec<MethodView>,
}

#[derive(Serialize)]
struct MethodView {
    service_name: String,
    method_name: String,
    comment: String,
    href: String,
    http_method: String,
    route: String,
    streaming: String,
    is_websocket: bool,
    request: PayloadView,
    response: PayloadView,
}

#[derive(Serialize)]
struct PayloadView {
    type_name: String,
    empty: bool,
    fields: Vec<FieldView>,
}

#[derive(Serialize)]
struct FieldView {
    name: String,
    type_label: String,
    type_linked: String,
    comment: String,
}

#[derive(Serialize)]
struct EnumView {
    name: String,
    comment: String,
    href: String,
    constants: Vec<ConstantView>,
}

#[derive(Serialize)]
struct ConstantView {
    name: String,
    value: String,
    comment: String,
}

#[derive(Serialize)]
struct ObjectView {
    name: String,
    comment: String,
    href: String,
    empty: bool,
    attrs: Vec<FieldView>,
}

/// Build the template context for the Markdown renderer
pub(crate) fn markdown_context(document: &Document) -> tera::Context {
    let services: Vec<ServiceView> = document
        .services
        .iter()
        .map(|service| ServiceView {
            service_name: service.service_name.clone(),
            comment: service.comment.clone(),
            href: service.href(),
            methods: service
                .methods
                .iter()
                .map(|method| MethodView {
                    service_name: method.service_name.clone(),
                    method_name: method.method_name.clone(),
                    comment: method.comment.clone(),
                    href: method.href(),
                    http_method: method.http_method.clone(),
                    route: method.route.clone(),
                    streaming: method.streaming.to_string(),
                    is_websocket: method.streaming.is_streaming(),
                    request: payload_view(document, &method.request),
                    response: payload_view(document, &method.response),
                })
                .collect(),
        })
        .collect();

    let enums: Vec<EnumView> = document
        .enums
        .iter()
        .map(|e| EnumView {
            name: e.name.clone(),
            comment: e.comment.clone(),
            href: e.href(),
            constants: e
                .constants
                .iter()
                .map(|c| ConstantView {
                    name: c.name.clone(),
                    value: c.value.clone(),
                    comment: c.comment.clone(),
                })
                .collect(),
        })
        .collect();

    let objects: Vec<ObjectView> = document
        .objects
        .iter()
        .map(|object| ObjectView {
            name: object.name.clone(),
            comment: object.comment.clone(),
            href: object.href(),
            empty: object.is_empty(),
            attrs: field_views(document, &object.attrs),
        })
        .collect();

    let mut context = tera::Context::new();
    context.insert("services", &services);
    context.insert("enums", &enums);
    context.insert("objects", &objects);
    context
}

fn payload_view(document: &Document, payload: &Payload) -> PayloadView {
    PayloadView {
        type_name: payload.type_name.clone(),
        empty: payload.is_empty(),
        fields: field_views(document, &payload.fields),
    }
}

fn field_views(document: &Document, fields: &[Field]) -> Vec<FieldView> {
    fields
        .iter()
        .map(|field| FieldView {
            name: field.name.clone(),
            type_label: display_type(document, field),
            type_linked: display_type_linked(document, field),
            comment: field.comment.clone(),
        })
        .collect()
}
