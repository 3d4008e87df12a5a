//! Swagger 2.0 conversion: parameter classification, body synthesis, and
//! the per-path walker.

use indexmap::IndexMap;
use serde_json::Value;

use crate::har::{
    APPLICATION_JSON, FORM_URLENCODED, HarRequest, Param, PostData, TEXT_PLAIN, placeholder_token,
};
use crate::instantiate::Instantiator;
use crate::parse::v2::{Operation, Parameter, ParameterLocation, ParameterOrRef, SwaggerSpec};

/// Pointer section holding shared schemas in a Swagger 2.0 document.
const SCHEMA_SECTION: &str = "definitions";

pub fn convert(spec: &SwaggerSpec) -> Vec<HarRequest> {
    let scheme = spec.schemes.first().map(String::as_str).unwrap_or("http");
    let host = spec.host.as_deref().unwrap_or("localhost");
    let base_path = spec.base_path.as_deref().unwrap_or("");
    let base_url = format!("{scheme}://{host}{base_path}");

    let mut requests = Vec::new();
    for (path, item) in &spec.paths {
        for (method, op) in item.operations() {
            requests.push(convert_operation(
                method.as_str(),
                op,
                &item.parameters,
                spec,
                format!("{base_url}{path}"),
            ));
        }
    }
    requests
}

fn convert_operation(
    method: &str,
    op: &Operation,
    path_params: &[ParameterOrRef],
    spec: &SwaggerSpec,
    url: String,
) -> HarRequest {
    // Operation parameters first, then the path-level shared list. The
    // merged list is an ordered sequence; duplicates stay duplicated.
    let params: Vec<&ParameterOrRef> = op.parameters.iter().chain(path_params).collect();
    let classified = classify(&params, spec, url);

    HarRequest {
        method: method.to_string(),
        url: classified.url,
        headers: classified.headers,
        query_string: classified.query,
        post_data: classified.post_data,
    }
}

struct Classified {
    query: Vec<Param>,
    headers: Vec<Param>,
    url: String,
    post_data: Option<PostData>,
}

fn classify(params: &[&ParameterOrRef], spec: &SwaggerSpec, mut url: String) -> Classified {
    let mut query = Vec::new();
    let mut headers = Vec::new();
    let mut form: IndexMap<String, String> = IndexMap::new();
    let mut body = Value::Null;

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
            ParameterLocation::FormData => {
                form.insert(param.name.clone(), placeholder_token(&param.name));
            }
            ParameterLocation::Body => body = resolve_body(param, spec),
        }
    }

    Classified {
        query,
        headers,
        url,
        post_data: assemble_post_data(form, body),
    }
}

/// Resolve the body parameter's schema and synthesize an example value.
/// A body parameter without a schema is legacy input: its name becomes the
/// body value verbatim.
fn resolve_body(param: &Parameter, spec: &SwaggerSpec) -> Value {
    let Some(schema) = &param.schema else {
        return Value::String(param.name.clone());
    };
    Instantiator::new(SCHEMA_SECTION, &spec.definitions).instantiate(schema)
}

/// Body assembly precedence: form fields beat an instantiated body, and a
/// body only materializes when the instantiated value is non-empty.
fn assemble_post_data(form: IndexMap<String, String>, body: Value) -> Option<PostData> {
    if !form.is_empty() {
        return Some(PostData::Form {
            mime_type: FORM_URLENCODED.to_string(),
            params: form
                .into_iter()
                .map(|(name, value)| Param { name, value })
                .collect(),
        });
    }
    match body {
        Value::Object(ref fields) if !fields.is_empty() => Some(PostData::Text {
            mime_type: APPLICATION_JSON.to_string(),
            text: body.to_string(),
        }),
        Value::Array(ref items) if !items.is_empty() => Some(PostData::Text {
            mime_type: APPLICATION_JSON.to_string(),
            text: body.to_string(),
        }),
        Value::String(text) if !text.is_empty() => Some(PostData::Text {
            mime_type: TEXT_PLAIN.to_string(),
            text,
        }),
        _ => None,
    }
}

/// Strip `#/<table>/` from a pointer and return the trailing identifier.
fn ref_name<'a>(ref_path: &'a str, table: &str) -> Option<&'a str> {
    let (section, name) = ref_path.strip_prefix("#/")?.split_once('/')?;
    (section == table).then_some(name)
}

fn lookup_parameter<'a>(spec: &'a SwaggerSpec, ref_path: &str) -> Option<&'a Parameter> {
    let name = ref_name(ref_path, "parameters")?;
    match spec.parameters.get(name)? {
        ParameterOrRef::Parameter(param) => Some(param),
        ParameterOrRef::Ref { .. } => None,
    }
}
