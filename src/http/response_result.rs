use anyhow::Result;
use axum::response::{IntoResponse, Response};
use log::error;
use reqwest::StatusCode;

/// A wrapper that wraps an anyhow::Result into an `IntoResponse` compatible struct.
///
/// Errors are logged and turned into a bare 500.
pub struct ResponseResult<T: IntoResponse> {
    result: Result<T>,
}

impl<T: IntoResponse> ResponseResult<T> {
    pub fn new(result: Result<T>) -> Self {
        Self { result }
    }
}

impl<T: IntoResponse> IntoResponse for ResponseResult<T> {
    fn into_response(self) -> Response {
        match self.result {
            Ok(value) => value.into_response(),
            Err(error) => {
                error!("Failed to handle request: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
