//! HTTP mapping for core errors

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use folio_core::Error;
use tracing::error;

use crate::views;

/// Error returned by handlers, rendered as an HTML error page
#[derive(Debug)]
pub struct AppError(pub Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::ProjectNotFound(_) => StatusCode::NOT_FOUND,
            err if err.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.0.code(), error = %self.0, "Request failed");
        }
        let body = views::error_page(status, &self.0);
        (status, Html(body)).into_response()
    }
}
