//! Plain text renderer
//!
//! An indented listing with `SERVICE` / `METHOD` / `ENUM` / `OBJECT`
//! sections, meant for terminals and quick grepping.

use protodoc_common::{display_type, Document, Field};

/// Render the whole document as a plain text listing
pub fn render_text(document: &Document) -> String {
    let mut out = String::new();
    render_services(&mut out, document);
    render_enums(&mut out, document);
    render_objects(&mut out, document);
    out
}

fn render_services(out: &mut String, document: &Document) {
    for service in &document.services {
        out.push_str(&format!("SERVICE {}\n\n", service.package_name));
        out.push_str(&format!("{}\n\n", service.comment));

        for method in &service.methods {
            out.push_str(&format!(
                "METHOD {}.{}",
                method.service_name, method.method_name
            ));
            if method.streaming.is_streaming() {
                out.push_str(&format!(" ({})\n", method.streaming));
            } else {
                out.push('\n');
            }

            out.push_str(&format!("{} {}\n", method.http_method, method.route));
            out.push_str(&format!("{}\n\n", method.comment));

            out.push_str(&format!("REQUEST PARAMETERS ({})\n", method.request.type_name));
            render_fields(out, document, &method.request.fields);

            out.push_str(&format!(
                "RESPONSE PARAMETERS ({})\n",
                method.response.type_name
            ));
            render_fields(out, document, &method.response.fields);

            out.push('\n');
        }
    }
}

fn render_fields(out: &mut String, document: &Document, fields: &[Field]) {
    for field in fields {
        out.push_str(&format!(
            "    {} {} {}\n",
            display_type(document, field),
            field.name,
            field.comment
        ));
    }
}

fn render_enums(out: &mut String, document: &Document) {
    for e in &document.enums {
        out.push_str(&format!("ENUM {}\n", e.name));
        out.push_str(&format!("{}\n\n", e.comment));
        out.push_str("CONSTANTS\n");
        for constant in &e.constants {
            out.push_str(&format!(
                "    {} {} {}\n",
                constant.name, constant.value, constant.comment
            ));
        }
        out.push('\n');
    }
}

fn render_objects(out: &mut String, document: &Document) {
    for object in &document.objects {
        out.push_str(&format!("OBJECT {}\n", object.name));
        out.push_str(&format!("{}\n\n", object.comment));
        out.push_str("ATTRIBUTES\n");
        render_fields(out, document, &object.attrs);
        out.push('\n');
    }
}
