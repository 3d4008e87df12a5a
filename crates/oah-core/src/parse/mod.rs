pub mod schema;
pub mod v2;
pub mod v3;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub version: String,
}

/// HTTP method, spelled the lowercase way it keys a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Put => "put",
            Method::Post => "post",
            Method::Delete => "delete",
            Method::Options => "options",
            Method::Head => "head",
            Method::Patch => "patch",
            Method::Trace => "trace",
        }
    }
}

/// A parsed API description document, version not yet committed.
///
/// Deserialization is total over well-formed YAML/JSON: anything that is not
/// structurally a Swagger 2.0 or OpenAPI 3.x document lands in
/// `Unrecognized`, which the dispatcher turns into an empty template list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiDocument {
    V2(v2::SwaggerSpec),
    V3(v3::OpenApiSpec),
    Unrecognized(serde_json::Value),
}

/// Parse an API document from YAML.
pub fn from_yaml(input: &str) -> Result<ApiDocument, ParseError> {
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Parse an API document from JSON.
pub fn from_json(input: &str) -> Result<ApiDocument, ParseError> {
    Ok(serde_json::from_str(input)?)
}
