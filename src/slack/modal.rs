use std::future::Future;

use anyhow::Result;
use serde::Serialize;
use serde_json::{json, Value};

/// A slack modal view, serialized as block kit JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SlackModalView(Value);

impl SlackModalView {
    /// The dialog for picking the conversation that the link of a new game is shared in.
    ///
    /// The conversation picker has response urls enabled, so submitting the modal sends an
    /// interaction carrying the response url of the picked conversation.
    pub fn share_game() -> Self {
        Self(json!({
            "type": "modal",
            "title": plain_text("Dajsz"),
            "submit": plain_text("Share link"),
            "blocks": [
                {
                    "type": "input",
                    "block_id": "share",
                    "optional": false,
                    "label": plain_text("Where to share the link of the game?"),
                    "element": {
                        "type": "conversations_select",
                        "action_id": "share_conversation",
                        "default_to_current_conversation": true,
                        "response_url_enabled": true
                    }
                }
            ]
        }))
    }
}

fn plain_text(text: &str) -> Value {
    json!({ "type": "plain_text", "text": text })
}

/// A trait for opening a modal in response to an interaction.
pub trait SlackOpenModal {
    /// Opens `view` for the interaction with `trigger_id`.
    ///
    /// Trigger ids are single use and expire after a few seconds, so this has to be called
    /// right after the interaction arrives.
    fn open_modal(
        &self,
        trigger_id: &str,
        view: &SlackModalView,
    ) -> impl Future<Output = Result<()>> + Send;
}
