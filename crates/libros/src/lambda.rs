//! AWS Lambda entry point.
//!
//! Receives API Gateway proxy events and hands them to the same dispatcher the
//! HTTP server uses. The dispatcher never fails, so every invocation returns a
//! response envelope.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};

use libros_core::gateway::{ProxyRequest, ProxyResponse};

use crate::state::AppState;

/// Run the Lambda runtime loop until the process is stopped.
pub async fn serve(state: AppState) -> Result<(), Error> {
    tracing::info!("Starting Lambda runtime");

    run(service_fn(move |event: LambdaEvent<ProxyRequest>| {
        let state = state.clone();
        async move { handle_event(&state, event).await }
    }))
    .await
}

async fn handle_event(
    state: &AppState,
    event: LambdaEvent<ProxyRequest>,
) -> Result<ProxyResponse, Error> {
    let (request, context) = event.into_parts();
    tracing::debug!(request_id = %context.request_id, method = %request.http_method, "Invocation");

    Ok(state.dispatcher.handle(request).await)
}
