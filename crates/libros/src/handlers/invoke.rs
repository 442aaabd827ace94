//! Raw envelope endpoint.
//!
//! Accepts an API Gateway proxy event as JSON and returns the response
//! envelope as JSON, exactly as the Lambda runtime would see it. Handy for
//! replaying captured events against a local server. An event that does not
//! parse still gets an envelope, carrying a 400.

use axum::{extract::State, Json};

use libros_core::gateway::{DispatchError, ProxyRequest, ProxyResponse};

use crate::state::AppState;

/// POST /invoke - Dispatch a raw proxy event.
#[axum::debug_handler]
pub async fn invoke(State(state): State<AppState>, body: String) -> Json<ProxyResponse> {
    let event = match serde_json::from_str::<ProxyRequest>(&body) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(error = %err, "Rejected malformed event");
            return Json(DispatchError::MalformedEvent(err.to_string()).into_response());
        }
    };

    Json(state.dispatcher.handle(event).await)
}
