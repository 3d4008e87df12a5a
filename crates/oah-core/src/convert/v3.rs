//! OpenAPI 3.x conversion: parameter classification, request-body
//! resolution, and the per-path walker.

use indexmap::IndexMap;
use serde_json::Value;

use crate::har::{
    APPLICATION_JSON, FORM_URLENCODED, HarRequest, Param, PostData, TEXT_PLAIN, placeholder_token,
};
use crate::instantiate::Instantiator;
use crate::parse::Method;
use crate::parse::v3::{
    OpenApiSpec, Operation, Parameter, ParameterLocation, ParameterOrRef, RequestBody,
    RequestBodyOrRef,
};

/// Pointer section holding shared schemas in an OpenAPI 3 document.
const SCHEMA_SECTION: &str = "components/schemas";

/// Base URL used when a document declares no servers.
const DEFAULT_SERVER: &str = "http://localhost:8000";

pub fn convert(spec: &OpenApiSpec) -> Vec<HarRequest> {
    let server = spec
        .servers
        .first()
        .map(|s| s.url.as_str())
        .unwrap_or(DEFAULT_SERVER);

    let mut requests = Vec::new();
    for (path, item) in &spec.paths {
        for (method, op) in item.operations() {
            requests.push(convert_operation(method, op, spec, format!("{server}{path}")));
        }
    }
    requests
}

fn convert_operation(method: Method, op: &Operation, spec: &OpenApiSpec, url: String) -> HarRequest {
    let classified = classify(&op.parameters, spec, url);

    HarRequest {
        method: method.as_str().to_ascii_uppercase(),
        url: classified.url,
        headers: classified.headers,
        query_string: classified.query,
        post_data: resolve_request_body(op, spec),
    }
}

struct Classified {
    query: Vec<Param>,
    headers: Vec<Param>,
    url: String,
}

fn classify(params: &[ParameterOrRef], spec: &OpenApiSpec, mut url: String) -> Classified {
    let mut query = Vec::new();
    let mut headers = Vec::new();

    for entry in params {
        let param = match entry {
            ParameterOrRef::Ref { ref_path } => match lookup_parameter(spec, ref_path) {
                Some(param) => param,
                None => {
                    log::warn!("unresolved parameter reference {ref_path}");
                    continue;
                }
            },
            ParameterOrRef::Parameter(param) => param,
        };
        match param.location {
            ParameterLocation::Query => query.push(Param::placeholder(&param.name)),
            ParameterLocation::Path => {
                log::debug!("substituting path parameter {} in {}", param.name, url);
                url = url.replacen(
                    &format!("{{{}}}", param.name),
                    &placeholder_token(&param.name),
                    1,
                );
            }
            ParameterLocation::Header => headers.push(Param::placeholder(&param.name)),
            // A formData location has no request body to feed here, and
            // cookies are not part of the template.
            ParameterLocation::FormData | ParameterLocation::Cookie => {}
        }
    }

    Classified {
        query,
        headers,
        url,
    }
}

/// Locate, resolve, and encode the operation's request body. JSON content
/// wins over form encoding; every other content type is ignored, degrading
/// to no body at all.
fn resolve_request_body(op: &Operation, spec: &OpenApiSpec) -> Option<PostData> {
    let body = match op.request_body.as_ref()? {
        RequestBodyOrRef::Ref { ref_path } => match lookup_request_body(spec, ref_path) {
            Some(body) => body,
            None => {
                log::warn!("unresolved request body reference {ref_path}");
                return None;
            }
        },
        RequestBodyOrRef::RequestBody(body) => body,
    };

    let (mime_type, media) = body
        .content
        .get_key_value(APPLICATION_JSON)
        .or_else(|| body.content.get_key_value(FORM_URLENCODED))?;

    let schema = media.schema.as_ref()?;
    let empty = IndexMap::new();
    let schemas = spec
        .components
        .as_ref()
        .map(|c| &c.schemas)
        .unwrap_or(&empty);
    let value = Instantiator::new(SCHEMA_SECTION, schemas).instantiate(schema);

    encode_body(mime_type, value)
}

/// Encode the instantiated value for the chosen media type. Form bodies
/// carry placeholder values keyed by the instantiated object's fields;
/// non-object values fall through to a plain-text body.
fn encode_body(mime_type: &str, value: Value) -> Option<PostData> {
    match value {
        Value::Object(fields) if mime_type == FORM_URLENCODED => Some(PostData::Form {
            mime_type: mime_type.to_string(),
            params: fields
                .keys()
                .map(|name| Param::placeholder(name))
                .collect(),
        }),
        value @ (Value::Object(_) | Value::Array(_)) if mime_type == APPLICATION_JSON => {
            Some(PostData::Text {
                mime_type: mime_type.to_string(),
                text: value.to_string(),
            })
        }
        Value::Null => None,
        Value::String(text) => Some(PostData::Text {
            mime_type: TEXT_PLAIN.to_string(),
            text,
        }),
        value => Some(PostData::Text {
            mime_type: TEXT_PLAIN.to_string(),
            text: value.to_string(),
        }),
    }
}

/// Strip `#/components/<section>/` from a pointer and return the trailing
/// identifier.
fn ref_name<'a>(ref_path: &'a str, expected_section: &str) -> Option<&'a str> {
    let (section, name) = ref_path.strip_prefix("#/components/")?.split_once('/')?;
    (section == expected_section).then_some(name)
}

fn lookup_parameter<'a>(spec: &'a OpenApiSpec, ref_path: &str) -> Option<&'a Parameter> {
    let name = ref_name(ref_path, "parameters")?;
    match spec.components.as_ref()?.parameters.get(name)? {
        ParameterOrRef::Parameter(param) => Some(param),
        ParameterOrRef::Ref { .. } => None,
    }
}

fn lookup_request_body<'a>(spec: &'a OpenApiSpec, ref_path: &str) -> Option<&'a RequestBody> {
    let name = ref_name(ref_path, "requestBodies")?;
    match spec.components.as_ref()?.request_bodies.get(name)? {
        RequestBodyOrRef::RequestBody(body) => Some(body),
        RequestBodyOrRef::Ref { .. } => None,
    }
}
