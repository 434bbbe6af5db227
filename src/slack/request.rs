use std::{
    error::Error,
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A verified request from slack.
///
/// Slack posts slash commands as plain form fields, and interactions (shortcuts, modal
/// submissions) as a single `payload` form field holding JSON.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DajszSlackRequest {
    SlashCommand(SlackSlashCommand),
    Interaction(SlackInteraction),
}

/// A slash command invocation.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize, Clone)]
pub struct SlackSlashCommand {
    pub command: String,
    pub channel_id: String,
    pub text: String,
    pub response_url: String,
}

/// An interaction with a shortcut or modal.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize, Clone)]
pub struct SlackInteraction {
    #[serde(default)]
    pub callback_id: String,
    pub trigger_id: String,
    #[serde(default)]
    pub response_urls: Vec<SlackResponseUrl>,
}

impl SlackInteraction {
    /// The response url to use when only a single one is needed.
    pub fn primary_response_url(&self) -> Option<&SlackResponseUrl> {
        self.response_urls.first()
    }
}

/// A response url handed out by slack for an input of a submitted modal.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize, Clone)]
pub struct SlackResponseUrl {
    pub block_id: String,
    pub action_id: String,
    pub channel_id: String,
    pub response_url: String,
}

#[derive(Debug, Deserialize)]
struct InteractionForm {
    payload: String,
}

impl DajszSlackRequest {
    /// Parses the body of a slack request with the specified content type.
    pub fn parse(body: &[u8], content_type: Option<&str>) -> Result<Self, SlackPayloadParseError> {
        let is_form = content_type
            .and_then(|c| c.split(';').next())
            .map(|c| c.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
            .unwrap_or(false);
        if !is_form {
            return Err(SlackPayloadParseError::UnsupportedContentType(
                content_type.map(|c| c.to_string()),
            ));
        }
        if body.is_empty() {
            return Err(SlackPayloadParseError::EmptyBody);
        }
        let fields = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)?;
        if fields.iter().any(|(key, _)| key == "payload") {
            let form = serde_urlencoded::from_bytes::<InteractionForm>(body)?;
            Ok(Self::Interaction(serde_json::from_str(&form.payload)?))
        } else {
            Ok(Self::SlashCommand(serde_urlencoded::from_bytes(body)?))
        }
    }
}

/// An error that occurs when a slack request body cannot be turned into a `DajszSlackRequest`.
#[derive(Debug)]
pub enum SlackPayloadParseError {
    UnsupportedContentType(Option<String>),
    EmptyBody,
    Form(serde_urlencoded::de::Error),
    Json(serde_json::Error),
}

impl Display for SlackPayloadParseError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::UnsupportedContentType(Some(content_type)) => {
                write!(f, "Unsupported content type {}", content_type)
            }
            Self::UnsupportedContentType(None) => write!(f, "Missing content type"),
            Self::EmptyBody => write!(f, "Empty request body"),
            Self::Form(error) => write!(f, "Malformed form body: {}", error),
            Self::Json(error) => write!(f, "Malformed interaction payload: {}", error),
        }
    }
}

impl Error for SlackPayloadParseError {}

impl From<serde_urlencoded::de::Error> for SlackPayloadParseError {
    fn from(error: serde_urlencoded::de::Error) -> Self {
        Self::Form(error)
    }
}

impl From<serde_json::Error> for SlackPayloadParseError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}
