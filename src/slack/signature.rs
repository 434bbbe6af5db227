use std::{
    error::Error,
    fmt::{Display, Formatter},
    pin::pin,
};

use axum::{body::Bytes, http::HeaderMap};
use chrono::Utc;
use futures_util::{Stream, StreamExt};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SLACK_TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SLACK_SIGNATURE_HEADER: &str = "x-slack-signature";

const SIGNATURE_VERSION: &str = "v0";

/// Requests older (or newer) than this many seconds are treated as replays.
const MAX_REQUEST_AGE_SECS: u64 = 5 * 60;

/// The largest body that is read before its signature is checked, same as axum's default limit.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// The signing secret of the slack app, shared between slack and this tool.
#[derive(Clone)]
pub struct SlackSigningSecret {
    secret: String,
}

impl SlackSigningSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Creates a verifier for a request with the specified headers.
    ///
    /// Fails without computing anything when the timestamp or signature headers are missing,
    /// malformed, or the timestamp is outside of the replay window.
    pub fn verifier(
        &self,
        headers: &HeaderMap,
    ) -> Result<SlackRequestVerifier, SlackSignatureError> {
        self.verifier_at(headers, Utc::now().timestamp())
    }

    fn verifier_at(
        &self,
        headers: &HeaderMap,
        now: i64,
    ) -> Result<SlackRequestVerifier, SlackSignatureError> {
        let timestamp = header_str(headers, SLACK_TIMESTAMP_HEADER)?;
        let request_time = timestamp
            .parse::<i64>()
            .map_err(|_| SlackSignatureError::MalformedHeader(SLACK_TIMESTAMP_HEADER))?;
        if now.abs_diff(request_time) > MAX_REQUEST_AGE_SECS {
            return Err(SlackSignatureError::StaleTimestamp(request_time));
        }
        let signature = header_str(headers, SLACK_SIGNATURE_HEADER)?
            .strip_prefix("v0=")
            .and_then(|hex_signature| hex::decode(hex_signature).ok())
            .ok_or(SlackSignatureError::MalformedHeader(SLACK_SIGNATURE_HEADER))?;
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| SlackSignatureError::InvalidSecret)?;
        mac.update(format!("{}:{}:", SIGNATURE_VERSION, timestamp).as_bytes());
        Ok(SlackRequestVerifier { mac, signature })
    }
}

fn header_str<'h>(
    headers: &'h HeaderMap,
    name: &'static str,
) -> Result<&'h str, SlackSignatureError> {
    headers
        .get(name)
        .ok_or(SlackSignatureError::MissingHeader(name))?
        .to_str()
        .map_err(|_| SlackSignatureError::MalformedHeader(name))
}

/// Verifies the signature of a single request while its body is being read.
///
/// The body is only read once. Every chunk is fed into the signature digest and into the buffer
/// that is handed back for parsing, so the verified bytes are exactly the parsed bytes.
pub struct SlackRequestVerifier {
    mac: HmacSha256,
    signature: Vec<u8>,
}

impl SlackRequestVerifier {
    /// Reads the body from `stream`, and returns it if the signature matches.
    ///
    /// Stops reading as soon as the body grows past `MAX_BODY_BYTES`.
    pub async fn read_verified_body<E: Display>(
        mut self,
        stream: impl Stream<Item = Result<Bytes, E>>,
    ) -> Result<Vec<u8>, SlackSignatureError> {
        let mut stream = pin!(stream);
        let mut body = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| SlackSignatureError::BodyRead(e.to_string()))?;
            if body.len() + chunk.len() > MAX_BODY_BYTES {
                return Err(SlackSignatureError::BodyTooLarge);
            }
            self.mac.update(&chunk);
            body.extend_from_slice(&chunk);
        }
        self.mac
            .verify_slice(&self.signature)
            .map_err(|_| SlackSignatureError::Mismatch)?;
        Ok(body)
    }
}

/// An error that occurs when verifying the signature of a slack request.
#[derive(Debug, PartialEq, Eq)]
pub enum SlackSignatureError {
    MissingHeader(&'static str),
    MalformedHeader(&'static str),
    StaleTimestamp(i64),
    InvalidSecret,
    BodyRead(String),
    BodyTooLarge,
    Mismatch,
}

impl SlackSignatureError {
    /// Returns true if this error says nothing about the authenticity of the request, but rather
    /// that this tool failed to check it.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::InvalidSecret | Self::BodyRead(_))
    }
}

impl Display for SlackSignatureError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::MissingHeader(name) => write!(f, "Missing {} header", name),
            Self::MalformedHeader(name) => write!(f, "Malformed {} header", name),
            Self::StaleTimestamp(timestamp) => {
                write!(f, "Request timestamp {} is outside of the replay window", timestamp)
            }
            Self::InvalidSecret => write!(f, "The signing secret cannot be used as an HMAC key"),
            Self::BodyRead(message) => write!(f, "Failed to read the request body: {}", message),
            Self::BodyTooLarge => {
                write!(f, "Request body is larger than {} bytes", MAX_BODY_BYTES)
            }
            Self::Mismatch => write!(f, "Signature does not match the request body"),
        }
    }
}

impl Error for SlackSignatureError {}
