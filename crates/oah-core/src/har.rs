use serde::{Deserialize, Serialize};

pub const APPLICATION_JSON: &str = "application/json";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const TEXT_PLAIN: &str = "text/plain";

/// A name/value entry used for query string and header lists. The value is
/// always the placeholder token `{{name}}`, never a concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: String,
}

impl Param {
    /// Build a placeholder entry for the given parameter name.
    pub fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: placeholder_token(name),
        }
    }
}

/// The `{{name}}` token substituted for a parameter value.
pub fn placeholder_token(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Request body of a request template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostData {
    /// JSON or plain-text body carried verbatim.
    Text {
        #[serde(rename = "mimeType")]
        mime_type: String,
        text: String,
    },

    /// Form-encoded body carried as name/value pairs.
    Form {
        #[serde(rename = "mimeType")]
        mime_type: String,
        params: Vec<Param>,
    },
}

/// One replayable request template, the request half of a HAR entry.
///
/// `postData` serializes as an explicit `null` when the operation declares
/// no body, so consumers can distinguish "no body" without probing for a
/// missing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarRequest {
    pub method: String,

    pub url: String,

    pub headers: Vec<Param>,

    #[serde(rename = "queryString")]
    pub query_string: Vec<Param>,

    #[serde(rename = "postData")]
    pub post_data: Option<PostData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_token() {
        assert_eq!(placeholder_token("id"), "{{id}}");
        let param = Param::placeholder("q");
        assert_eq!(param.name, "q");
        assert_eq!(param.value, "{{q}}");
    }

    #[test]
    fn test_request_serializes_har_field_names() {
        let request = HarRequest {
            method: "get".to_string(),
            url: "http://localhost/pets".to_string(),
            headers: vec![],
            query_string: vec![Param::placeholder("q")],
            post_data: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("queryString").is_some());
        assert_eq!(json["postData"], serde_json::Value::Null);
    }

    #[test]
    fn test_form_post_data_serializes_mime_type() {
        let post = PostData::Form {
            mime_type: FORM_URLENCODED.to_string(),
            params: vec![Param::placeholder("a")],
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["mimeType"], FORM_URLENCODED);
        assert_eq!(json["params"][0]["value"], "{{a}}");
    }
}
