//! End-to-end tests: schema source text to documentation model

use protodoc_common::{display_type, StreamingKind};
use protodoc_parser::parse_source;

const PET_STORE: &str = r#"
syntax = "proto3";

package pet;

// PetService manages the pets of the store.
service PetService {
    // GetPet returns a single pet.
    rpc GetPet (GetPetRequest) returns (Pet);
}

message GetPetRequest {
    string id = 1;
}

// A pet for sale.
message Pet {
    string name = 1; // display name
    Status status = 2;
}

// Liveness of a pet.
enum Status {
    ALIVE = 0;
    DEAD = 1;
}
"#;

#[test]
fn test_pet_store_document() {
    let doc = parse_source(PET_STORE).unwrap();

    assert_eq!(doc.services.len(), 1);
    let service = &doc.services[0];
    assert_eq!(service.package_name, "pet");
    assert_eq!(service.service_name, "PetService");
    assert_eq!(service.comment, "PetService manages the pets of the store.");

    assert_eq!(service.methods.len(), 1);
    let method = &service.methods[0];
    assert_eq!(method.method_name, "GetPet");
    assert_eq!(method.route, "/pet/PetService/GetPet");
    assert_eq!(method.http_method, "POST");
    assert_eq!(method.streaming, StreamingKind::Unary);
    assert_eq!(method.comment, "GetPet returns a single pet.");

    assert_eq!(method.request.type_name, "GetPetRequest");
    assert_eq!(method.request.fields.len(), 1);
    assert_eq!(method.request.fields[0].name, "id");
    assert_eq!(display_type(&doc, &method.request.fields[0]), "string");

    assert_eq!(method.response.type_name, "Pet");
    let response_fields: Vec<(&str, String)> = method
        .response
        .fields
        .iter()
        .map(|f| (f.name.as_str(), display_type(&doc, f)))
        .collect();
    assert_eq!(
        response_fields,
        vec![
            ("name", "string".to_string()),
            ("status", "enum Status".to_string()),
        ]
    );

    // GetPetRequest and Pet serve as payloads, so neither is an object
    let objects: Vec<&str> = doc.objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(objects, Vec::<&str>::new());

    let enums: Vec<&str> = doc.enums.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(enums, vec!["Status"]);
}

#[test]
fn test_scope_shadowing_resolves_innermost() {
    let doc = parse_source(
        "package p;\n\
         message A {\n\
           enum T { OUTER = 0; }\n\
           message B {\n\
             enum T { INNER = 0; }\n\
             T which = 1;\n\
           }\n\
           T which = 1;\n\
         }",
    )
    .unwrap();

    let inner = doc.objects.iter().find(|o| o.name == "A.B").unwrap();
    assert_eq!(display_type(&doc, &inner.attrs[0]), "enum A.B.T");

    let outer = doc.objects.iter().find(|o| o.name == "A").unwrap();
    assert_eq!(display_type(&doc, &outer.attrs[0]), "enum A.T");
}

#[test]
fn test_unresolved_and_repeated_rendering() {
    let doc = parse_source(
        "package p;\n\
         message M {\n\
           repeated string tags = 1;\n\
           repeated Widget widgets = 2;\n\
           google.protobuf.Timestamp born = 3;\n\
         }",
    )
    .unwrap();

    let m = &doc.objects[0];
    assert_eq!(display_type(&doc, &m.attrs[0]), "array of string");
    assert_eq!(display_type(&doc, &m.attrs[1]), "array of (Widget)");
    assert_eq!(display_type(&doc, &m.attrs[2]), "(google.protobuf.Timestamp)");
}

#[test]
fn test_build_is_deterministic() {
    let first = parse_source(PET_STORE).unwrap();
    let second = parse_source(PET_STORE).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
