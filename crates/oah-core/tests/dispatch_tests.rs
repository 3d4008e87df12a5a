use oah_core::{ApiDocument, convert, parse};

const PETSTORE_V2: &str = include_str!("fixtures/petstore-v2.yaml");
const PETSTORE_V3: &str = include_str!("fixtures/petstore-v3.yaml");
const UNVERSIONED: &str = include_str!("fixtures/unversioned.yaml");

#[test]
fn swagger_marker_routes_to_v2() {
    let document = parse::from_yaml(PETSTORE_V2).unwrap();
    assert!(matches!(document, ApiDocument::V2(_)));
    let requests = convert(&document);
    assert!(!requests.is_empty());
    // v2 templates keep the document's lowercase method spelling.
    assert!(requests.iter().all(|r| r.method.chars().all(|c| c.is_ascii_lowercase())));
}

#[test]
fn openapi_marker_routes_to_v3() {
    let document = parse::from_yaml(PETSTORE_V3).unwrap();
    assert!(matches!(document, ApiDocument::V3(_)));
    let requests = convert(&document);
    assert!(!requests.is_empty());
    // v3 templates upper-case the method.
    assert!(requests.iter().all(|r| r.method.chars().all(|c| c.is_ascii_uppercase())));
}

#[test]
fn unversioned_document_yields_nothing() {
    let document = parse::from_yaml(UNVERSIONED).unwrap();
    assert!(matches!(document, ApiDocument::Unrecognized(_)));
    assert!(convert(&document).is_empty());
}

#[test]
fn unsupported_swagger_version_yields_nothing() {
    let document = parse::from_yaml(
        r#"
swagger: "1.2"
paths:
  /ping:
    get: {}
"#,
    )
    .unwrap();
    assert!(convert(&document).is_empty());
}

#[test]
fn openapi_marker_outside_3x_yields_nothing() {
    let document = parse::from_yaml(
        r#"
openapi: "4.0.0"
paths:
  /ping:
    get: {}
"#,
    )
    .unwrap();
    assert!(convert(&document).is_empty());
}

#[test]
fn json_documents_parse_like_yaml() {
    let document =
        parse::from_json(r#"{"swagger": "2.0", "paths": {"/ping": {"get": {}}}}"#).unwrap();
    let requests = convert(&document);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://localhost/ping");
}

#[test]
fn malformed_input_is_a_parse_error() {
    assert!(parse::from_yaml("[unclosed").is_err());
    assert!(parse::from_json("{not json").is_err());
}

#[test]
fn conversion_is_idempotent() {
    for fixture in [PETSTORE_V2, PETSTORE_V3] {
        let document = parse::from_yaml(fixture).unwrap();
        assert_eq!(convert(&document), convert(&document));
    }
}

#[test]
fn output_serializes_as_har_like_array() {
    let document = parse::from_yaml(PETSTORE_V2).unwrap();
    let requests = convert(&document);
    let json = serde_json::to_value(&requests).unwrap();

    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), requests.len());
    for entry in entries {
        assert!(entry.get("method").is_some());
        assert!(entry.get("url").is_some());
        assert!(entry.get("headers").is_some());
        assert!(entry.get("queryString").is_some());
        // Bodyless operations serialize an explicit null.
        assert!(entry.get("postData").is_some());
    }
}
