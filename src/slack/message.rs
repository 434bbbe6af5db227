use std::future::Future;

use anyhow::Result;
use serde::Serialize;

use crate::dajsz::{game::GameCreationResult, link::DajszGameLinks};

pub const GAME_CREATION_FAILED_TEXT: &str = "Something went wrong. Try again?";

/// Where a slack message is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlackMessageDestination {
    /// A one-time response url handed out by slack alongside a command or interaction.
    ResponseUrl(String),
    /// A channel, posted to with the bot token.
    Channel(String),
}

/// Who gets to see a message posted to a response url.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlackResponseType {
    Ephemeral,
    InChannel,
}

impl SlackResponseType {
    fn is_ephemeral(&self) -> bool {
        *self == Self::Ephemeral
    }
}

/// A plain text slack message.
///
/// Serializes to the body that slack expects on a response url. Ephemeral is slack's default,
/// so it is left out of the body.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SlackMessage {
    text: String,
    #[serde(skip_serializing_if = "SlackResponseType::is_ephemeral")]
    response_type: SlackResponseType,
    #[serde(skip)]
    destination: SlackMessageDestination,
}

impl SlackMessage {
    pub fn new(
        text: impl Into<String>,
        response_type: SlackResponseType,
        destination: SlackMessageDestination,
    ) -> Self {
        Self { text: text.into(), response_type, destination }
    }

    /// The message announcing the outcome of a game creation.
    ///
    /// A created game is shared with the whole channel, while failures are only shown to the
    /// person who asked.
    pub fn for_game_creation(
        result: &GameCreationResult,
        links: &DajszGameLinks,
        destination: SlackMessageDestination,
    ) -> Self {
        match result {
            GameCreationResult::Created { game_id } => {
                Self::new(links.game_url(game_id), SlackResponseType::InChannel, destination)
            }
            GameCreationResult::Failed => {
                Self::new(GAME_CREATION_FAILED_TEXT, SlackResponseType::Ephemeral, destination)
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn response_type(&self) -> SlackResponseType {
        self.response_type
    }

    pub fn destination(&self) -> &SlackMessageDestination {
        &self.destination
    }
}

/// A trait for sending a slack message.
pub trait SlackSendMessage {
    fn send(&self, message: &SlackMessage) -> impl Future<Output = Result<()>> + Send;
}
