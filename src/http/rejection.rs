use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::warn;

use crate::slack::{request::SlackPayloadParseError, signature::SlackSignatureError};

/// The reasons that a slack webhook is turned away before anything is dispatched.
#[derive(Debug)]
pub enum WebhookRejection {
    Unauthorized(SlackSignatureError),
    MalformedPayload(SlackPayloadParseError),
    TooLarge(SlackSignatureError),
    Internal(SlackSignatureError),
}

impl From<SlackSignatureError> for WebhookRejection {
    fn from(error: SlackSignatureError) -> Self {
        if error.is_internal() {
            Self::Internal(error)
        } else if error == SlackSignatureError::BodyTooLarge {
            Self::TooLarge(error)
        } else {
            Self::Unauthorized(error)
        }
    }
}

impl From<SlackPayloadParseError> for WebhookRejection {
    fn from(error: SlackPayloadParseError) -> Self {
        Self::MalformedPayload(error)
    }
}

impl IntoResponse for WebhookRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized(error) => {
                warn!("Rejecting unverified slack request: {}", error);
                StatusCode::UNAUTHORIZED
            }
            Self::MalformedPayload(error) => {
                warn!("Rejecting malformed slack request: {}", error);
                StatusCode::BAD_REQUEST
            }
            Self::TooLarge(error) => {
                warn!("Rejecting oversized slack request: {}", error);
                StatusCode::PAYLOAD_TOO_LARGE
            }
            Self::Internal(error) => {
                warn!("Failed to verify slack request: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
        .into_response()
    }
}
