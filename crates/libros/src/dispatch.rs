//! Request dispatcher.
//!
//! Branches on the envelope's method and issues exactly one storage call per
//! request. All error kinds are explicit [`DispatchError`] values rendered by
//! the core; nothing here retries or caches.

use std::sync::Arc;

use libros_core::book::{parse_create_body, parse_update_body};
use libros_core::gateway::{
    DispatchError, Method, ProxyRequest, ProxyResponse, BOOK_CREATED, BOOK_DELETED, BOOK_UPDATED,
};
use libros_core::storage::BookRepository;

/// Maps gateway requests onto [`BookRepository`] operations.
pub struct RequestDispatcher {
    repo: Arc<dyn BookRepository>,
}

impl RequestDispatcher {
    pub fn new(repo: Arc<dyn BookRepository>) -> Self {
        Self { repo }
    }

    /// Handle one request. Never fails: errors become error responses.
    pub async fn handle(&self, request: ProxyRequest) -> ProxyResponse {
        let method = request.http_method.clone();
        let id = request.path_id().map(str::to_string);

        match self.dispatch(request).await {
            Ok(response) => {
                tracing::debug!(%method, ?id, status = response.status_code, "Request handled");
                response
            }
            Err(err) => {
                let status = err.status_code();
                if status >= 500 {
                    tracing::error!(%method, ?id, status, error = %err, "Request failed");
                } else {
                    tracing::warn!(%method, ?id, status, error = %err, "Request rejected");
                }
                err.into_response()
            }
        }
    }

    async fn dispatch(&self, request: ProxyRequest) -> Result<ProxyResponse, DispatchError> {
        match Method::parse(&request.http_method) {
            Some(Method::Post) => self.create_book(request.body()).await,
            Some(Method::Get) => match request.path_id() {
                Some(id) => self.get_book(id).await,
                None => self.list_books().await,
            },
            Some(Method::Put) => self.update_book(request.body()).await,
            Some(Method::Delete) => self.delete_book(request.path_id()).await,
            None => Err(DispatchError::UnsupportedMethod(request.http_method)),
        }
    }

    /// POST: insert or replace a full record.
    async fn create_book(&self, body: Option<&str>) -> Result<ProxyResponse, DispatchError> {
        let book = parse_create_body(body)?;
        self.repo.put_book(&book).await?;

        tracing::info!(id = %book.id, "Book stored");
        Ok(ProxyResponse::message(200, BOOK_CREATED))
    }

    /// GET with id: point lookup.
    async fn get_book(&self, id: &str) -> Result<ProxyResponse, DispatchError> {
        let record = self
            .repo
            .get_book(id)
            .await?
            .ok_or_else(|| DispatchError::NotFound { id: id.to_string() })?;

        Ok(ProxyResponse::json(200, &record)?)
    }

    /// GET without id: full scan.
    async fn list_books(&self) -> Result<ProxyResponse, DispatchError> {
        let records = self.repo.scan_books().await?;
        Ok(ProxyResponse::json(200, &records)?)
    }

    /// PUT: overwrite the supplied attributes only.
    async fn update_book(&self, body: Option<&str>) -> Result<ProxyResponse, DispatchError> {
        let patch = parse_update_body(body)?;
        self.repo.update_book(&patch).await?;

        tracing::info!(id = %patch.id, "Book updated");
        Ok(ProxyResponse::message(200, BOOK_UPDATED))
    }

    /// DELETE: unconditional delete by id.
    async fn delete_book(&self, id: Option<&str>) -> Result<ProxyResponse, DispatchError> {
        let id = id.ok_or(DispatchError::MissingId)?;
        self.repo.delete_book(id).await?;

        tracing::info!(%id, "Book deleted");
        Ok(ProxyResponse::message(200, BOOK_DELETED))
    }
}
