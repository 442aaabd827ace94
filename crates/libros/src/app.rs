use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{any, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        books::{collection, item},
        health::livez,
        invoke::invoke,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for the book routes
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let book_routes = Router::new()
        .route("/items", any(collection))
        .route("/items/{id}", any(item))
        .layer(cors);

    Router::new()
        .merge(book_routes)
        .route("/invoke", post(invoke))
        .route("/livez", get(livez))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(AppState::default());
        let (status, _) = send(&app, "GET", "/livez", None).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_books_empty() {
        let app = create_app(AppState::default());
        let (status, body) = send(&app, "GET", "/items", None).await;

        assert_eq!(status, StatusCode::OK);
        let json: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert!(json.is_empty());
    }

    #[tokio::test]
    async fn test_book_lifecycle_over_http() {
        let app = create_app(AppState::default());

        let (status, body) = send(
            &app,
            "POST",
            "/items",
            Some(
                r#"{"id":"1","titulo":"Rayuela","autor":"Cortázar","precio":"15.5","anio":"1963"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"mensaje":"Libro insertado con éxito"}"#);

        let (status, _) = send(&app, "PUT", "/items", Some(r#"{"id":"1","precio":"18"}"#)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/items/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let book: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(book["titulo"], "Rayuela");
        assert_eq!(book["precio"], "18");

        let (status, _) = send(&app, "DELETE", "/items/1", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/items/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"Libro no encontrado"}"#);
    }

    #[tokio::test]
    async fn test_delete_collection_requires_id() {
        let app = create_app(AppState::default());
        let (status, body) = send(&app, "DELETE", "/items", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Debe proporcionar un id"}"#);
    }

    #[tokio::test]
    async fn test_unsupported_method_is_400() {
        let app = create_app(AppState::default());
        let (status, body) = send(&app, "PATCH", "/items/1", Some("{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Unsupported method"}"#);
    }

    #[tokio::test]
    async fn test_invalid_body_is_400() {
        let app = create_app(AppState::default());
        let (status, _) = send(&app, "POST", "/items", Some("not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invoke_returns_envelope() {
        let app = create_app(AppState::default());

        let event = r#"{"httpMethod":"GET","pathParameters":{"id":"missing"},"body":null}"#;
        let (status, body) = send(&app, "POST", "/invoke", Some(event)).await;

        assert_eq!(status, StatusCode::OK);
        let envelope: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(envelope["statusCode"], 404);
        assert_eq!(envelope["headers"]["Content-Type"], "application/json");
        assert_eq!(envelope["body"], r#"{"error":"Libro no encontrado"}"#);
    }

    #[tokio::test]
    async fn test_invoke_malformed_event_returns_envelope() {
        let app = create_app(AppState::default());
        let (status, body) = send(&app, "POST", "/invoke", Some("{not json")).await;

        assert_eq!(status, StatusCode::OK);
        let envelope: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(envelope["statusCode"], 400);
        assert_eq!(envelope["headers"]["Content-Type"], "application/json");

        let inner: serde_json::Value =
            serde_json::from_str(envelope["body"].as_str().unwrap()).unwrap();
        assert!(inner["error"]
            .as_str()
            .unwrap()
            .starts_with("Malformed event: "));
    }

    #[tokio::test]
    async fn test_numeric_id_keeps_every_digit() {
        let app = create_app(AppState::default());
        let body = r#"{"id":123456789012345678901234,"titulo":"T","autor":"A","precio":1,"anio":2}"#;

        let (status, _) = send(&app, "POST", "/items", Some(body)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/items/123456789012345678901234", None).await;
        assert_eq!(status, StatusCode::OK);
        let book: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(book["id"], "123456789012345678901234");
    }

    #[tokio::test]
    async fn test_invoke_and_items_share_storage() {
        let app = create_app(AppState::default());

        let event = serde_json::json!({
            "httpMethod": "POST",
            "body": r#"{"id":"7","titulo":"T","autor":"A","precio":1,"anio":2}"#
        })
        .to_string();
        let (status, _) = send(&app, "POST", "/invoke", Some(&event)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/items/7", None).await;
        assert_eq!(status, StatusCode::OK);
        let book: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(book["anio"], "2");
    }
}
