//! Book routes.
//!
//! `/items` and `/items/{id}` accept any method. The HTTP request is folded
//! into a [`ProxyRequest`] and the dispatcher decides what is supported.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header::HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};

use libros_core::gateway::{ProxyRequest, ProxyResponse};

use crate::state::AppState;

/// Renders a [`ProxyResponse`] as a plain HTTP response.
pub struct GatewayResponse(pub ProxyResponse);

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let ProxyResponse {
            status_code,
            headers,
            body,
        } = self.0;

        let status = StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Body::from(body)).into_response();

        for (name, value) in headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }

        response
    }
}

/// ANY /items - Collection route (list, create, update).
#[axum::debug_handler]
pub async fn collection(
    State(state): State<AppState>,
    method: Method,
    body: String,
) -> GatewayResponse {
    let request = to_proxy_request(&method, None, body);
    GatewayResponse(state.dispatcher.handle(request).await)
}

/// ANY /items/{id} - Item route (read, delete, and the body-driven methods).
#[axum::debug_handler]
pub async fn item(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
    body: String,
) -> GatewayResponse {
    let request = to_proxy_request(&method, Some(id), body);
    GatewayResponse(state.dispatcher.handle(request).await)
}

fn to_proxy_request(method: &Method, id: Option<String>, body: String) -> ProxyRequest {
    let mut request = ProxyRequest::new(method.as_str());
    if let Some(id) = id {
        request = request.with_id(id);
    }
    if !body.is_empty() {
        request = request.with_body(body);
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_request_from_http_parts() {
        let request = to_proxy_request(&Method::DELETE, Some("7".to_string()), String::new());

        assert_eq!(request.http_method, "DELETE");
        assert_eq!(request.path_id(), Some("7"));
        assert_eq!(request.body(), None);
    }

    #[test]
    fn test_proxy_request_keeps_body() {
        let request = to_proxy_request(&Method::POST, None, r#"{"id":"1"}"#.to_string());

        assert_eq!(request.path_id(), None);
        assert_eq!(request.body(), Some(r#"{"id":"1"}"#));
    }

    #[test]
    fn test_gateway_response_carries_status_and_headers() {
        let response =
            GatewayResponse(ProxyResponse::error(404, "Libro no encontrado")).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_gateway_response_invalid_status_becomes_500() {
        let response = GatewayResponse(ProxyResponse::new(42, "{}")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
