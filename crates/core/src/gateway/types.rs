use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Path parameter carrying the book id.
pub const PATH_PARAM_ID: &str = "id";

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Methods the dispatcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Get,
    Put,
    Delete,
}

impl Method {
    /// Matches the upper-case method name exactly, as gateways send it.
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "POST" => Some(Method::Post),
            "GET" => Some(Method::Get),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound request envelope in the API Gateway proxy shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub http_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ProxyRequest {
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            path_parameters: None,
            body: None,
        }
    }

    /// Set the `id` path parameter.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(PATH_PARAM_ID.to_string(), id.into());
        self
    }

    /// Set the raw JSON body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The `id` path parameter, if the request carries one.
    pub fn path_id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(PATH_PARAM_ID))
            .map(String::as_str)
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Outbound response envelope. `body` is always JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ProxyResponse {
    /// Build a response with a pre-encoded JSON body.
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());

        Self {
            status_code,
            headers,
            body: body.into(),
        }
    }

    /// Build a response by encoding `body` as JSON.
    pub fn json<T: Serialize + ?Sized>(
        status_code: u16,
        body: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(status_code, serde_json::to_string(body)?))
    }

    /// `{"mensaje": "..."}`
    pub fn message(status_code: u16, message: &str) -> Self {
        Self::new(status_code, serde_json::json!({ "mensaje": message }).to_string())
    }

    /// `{"error": "..."}`
    pub fn error(status_code: u16, message: &str) -> Self {
        Self::new(status_code, serde_json::json!({ "error": message }).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_is_case_sensitive() {
        assert_eq!(Method::parse("GET"), Some(Method::Get));
        assert_eq!(Method::parse("DELETE"), Some(Method::Delete));
        assert_eq!(Method::parse("get"), None);
        assert_eq!(Method::parse("PATCH"), None);
        assert_eq!(Method::parse(""), None);
    }

    #[test]
    fn test_request_deserializes_gateway_event() {
        let event = r#"{
            "httpMethod": "GET",
            "pathParameters": {"id": "1"},
            "body": null,
            "headers": {"Accept": "*/*"}
        }"#;
        let request: ProxyRequest = serde_json::from_str(event).unwrap();

        assert_eq!(request.http_method, "GET");
        assert_eq!(request.path_id(), Some("1"));
        assert_eq!(request.body(), None);
    }

    #[test]
    fn test_request_without_path_parameters() {
        let request: ProxyRequest =
            serde_json::from_str(r#"{"httpMethod":"GET","pathParameters":null}"#).unwrap();
        assert_eq!(request.path_id(), None);

        let request: ProxyRequest =
            serde_json::from_str(r#"{"httpMethod":"GET","pathParameters":{"other":"x"}}"#)
                .unwrap();
        assert_eq!(request.path_id(), None);
    }

    #[test]
    fn test_request_builders() {
        let request = ProxyRequest::new("PUT").with_id("9").with_body("{}");

        assert_eq!(request.http_method, "PUT");
        assert_eq!(request.path_id(), Some("9"));
        assert_eq!(request.body(), Some("{}"));
    }

    #[test]
    fn test_response_serializes_gateway_shape() {
        let response = ProxyResponse::message(200, "ok");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["headers"]["Content-Type"], "application/json");
        assert_eq!(json["body"], r#"{"mensaje":"ok"}"#);
    }

    #[test]
    fn test_error_body_is_escaped_json() {
        let response = ProxyResponse::error(500, r#"bad "quote""#);
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();

        assert_eq!(body["error"], r#"bad "quote""#);
        assert_eq!(response.status_code, 500);
    }
}
