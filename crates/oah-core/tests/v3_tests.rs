use oah_core::har::{APPLICATION_JSON, FORM_URLENCODED};
use oah_core::{HarRequest, PostData, convert, parse};

const PETSTORE: &str = include_str!("fixtures/petstore-v3.yaml");

fn petstore_requests() -> Vec<HarRequest> {
    let document = parse::from_yaml(PETSTORE).expect("should parse petstore-v3.yaml");
    convert(&document)
}

#[test]
fn walk_order_and_method_casing() {
    let requests = petstore_requests();
    let summary: Vec<(&str, &str)> = requests
        .iter()
        .map(|r| (r.method.as_str(), r.url.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("GET", "https://api.example.com/v1/pets"),
            ("POST", "https://api.example.com/v1/pets"),
            ("GET", "https://api.example.com/v1/pets/{{id}}"),
            ("POST", "https://api.example.com/v1/login"),
            ("PUT", "https://api.example.com/v1/avatar"),
            ("POST", "https://api.example.com/v1/subscribe"),
        ]
    );
}

#[test]
fn path_item_parameters_key_is_not_an_operation() {
    // `/pets/{id}` carries a path-item-level `parameters` key; only the
    // declared GET may produce a template for that path.
    let requests = petstore_requests();
    let for_path: Vec<&HarRequest> = requests
        .iter()
        .filter(|r| r.url.contains("/pets/"))
        .collect();
    assert_eq!(for_path.len(), 1);
    assert_eq!(for_path[0].method, "GET");
}

#[test]
fn path_level_parameters_are_not_merged() {
    let requests = petstore_requests();
    let get_pet = &requests[2];
    assert!(get_pet.query_string.is_empty());
    assert!(get_pet.url.contains("{{id}}"));
    assert!(!get_pet.url.contains("/pets/{id}"));
}

#[test]
fn component_parameter_reference_resolves() {
    let requests = petstore_requests();
    let list = &requests[0];
    assert_eq!(list.query_string.len(), 1);
    assert_eq!(list.query_string[0].name, "q");
    assert_eq!(list.query_string[0].value, "{{q}}");
    assert_eq!(list.headers.len(), 1);
    assert_eq!(list.headers[0].name, "X-Api-Key");
}

#[test]
fn json_request_body_is_instantiated() {
    let requests = petstore_requests();
    let Some(PostData::Text { mime_type, text }) = &requests[1].post_data else {
        panic!("createPet should have a text body");
    };
    assert_eq!(mime_type, APPLICATION_JSON);

    let body: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(body["x"], "");
    // Enum schemas instantiate as their first entry.
    assert_eq!(body["status"], "available");
}

#[test]
fn form_body_params_carry_placeholders() {
    let requests = petstore_requests();
    let Some(PostData::Form { mime_type, params }) = &requests[3].post_data else {
        panic!("login should have a form body");
    };
    assert_eq!(mime_type, FORM_URLENCODED);
    let entries: Vec<(&str, &str)> = params
        .iter()
        .map(|p| (p.name.as_str(), p.value.as_str()))
        .collect();
    assert_eq!(entries, vec![("a", "{{a}}"), ("b", "{{b}}")]);
}

#[test]
fn unsupported_content_type_yields_no_body() {
    let requests = petstore_requests();
    assert_eq!(requests[4].post_data, None);
}

#[test]
fn referenced_request_body_resolves() {
    let requests = petstore_requests();
    let Some(PostData::Text { mime_type, text }) = &requests[5].post_data else {
        panic!("subscribe should have a text body");
    };
    assert_eq!(mime_type, APPLICATION_JSON);
    let body: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(body["callbackUrl"], "https://client.example.com/hook");
}

#[test]
fn missing_servers_fall_back_to_localhost() {
    let document = parse::from_yaml(
        r#"
openapi: "3.0.0"
paths:
  /ping:
    get: {}
"#,
    )
    .unwrap();
    let requests = convert(&document);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "http://localhost:8000/ping");
}

#[test]
fn json_preferred_over_form_content() {
    let document = parse::from_yaml(
        r#"
openapi: "3.0.0"
paths:
  /items:
    post:
      requestBody:
        content:
          application/x-www-form-urlencoded:
            schema:
              type: object
              properties:
                a:
                  type: string
          application/json:
            schema:
              type: object
              properties:
                b:
                  type: string
"#,
    )
    .unwrap();
    let requests = convert(&document);
    let Some(PostData::Text { mime_type, text }) = &requests[0].post_data else {
        panic!("expected the JSON content to win");
    };
    assert_eq!(mime_type, APPLICATION_JSON);
    assert!(text.contains("\"b\""));
}

#[test]
fn unresolved_request_body_reference_yields_no_body() {
    let document = parse::from_yaml(
        r##"
openapi: "3.0.0"
paths:
  /items:
    post:
      requestBody:
        $ref: "#/components/requestBodies/Missing"
"##,
    )
    .unwrap();
    let requests = convert(&document);
    assert_eq!(requests[0].post_data, None);
}

#[test]
fn form_data_location_is_recognized_but_unused() {
    // OpenAPI 3 has no formData parameters, but documents carrying one
    // still convert; the parameter contributes nothing.
    let document = parse::from_yaml(
        r#"
openapi: "3.0.0"
paths:
  /upload:
    post:
      parameters:
        - name: file
          in: formData
"#,
    )
    .unwrap();
    let requests = convert(&document);
    assert_eq!(requests.len(), 1);
    assert!(requests[0].query_string.is_empty());
    assert!(requests[0].headers.is_empty());
    assert_eq!(requests[0].post_data, None);
}
