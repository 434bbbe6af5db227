use std::{str::FromStr, sync::Arc};

use log::{error, info, warn};
use strum_macros::EnumString;
use tokio::spawn;

use crate::dajsz::{game::DajszGameCreate, link::DajszGameLinks};

use super::{
    command::{DajszInteractionCallback, DajszSlackCommand},
    message::{SlackMessage, SlackMessageDestination, SlackSendMessage},
    modal::{SlackModalView, SlackOpenModal},
    request::{DajszSlackRequest, SlackInteraction, SlackSlashCommand},
};

/// How the outcome of a game creation is delivered back to slack.
#[derive(Debug, PartialEq, Eq, EnumString, Clone, Copy)]
pub enum NotificationRoute {
    /// Post to the response url handed out with the request.
    #[strum(serialize = "response_url")]
    ResponseUrl,
    /// Post to the channel of the request with the bot token.
    #[strum(serialize = "channel")]
    Channel,
}

/// The work that a slack request asks for.
///
/// Holds only what is needed to perform the work after the request itself is gone.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DajszSlackAction {
    CreateGame(SlackMessageDestination),
    ShowShareModal { trigger_id: String },
}

impl DajszSlackAction {
    /// Returns the action for `request`, or None if the request should be dropped.
    pub fn from_request(request: DajszSlackRequest, route: NotificationRoute) -> Option<Self> {
        match request {
            DajszSlackRequest::SlashCommand(command) => Self::from_slash_command(command, route),
            DajszSlackRequest::Interaction(interaction) => {
                Self::from_interaction(interaction, route)
            }
        }
    }

    fn from_slash_command(command: SlackSlashCommand, route: NotificationRoute) -> Option<Self> {
        match DajszSlackCommand::from_str(&command.command) {
            Ok(DajszSlackCommand::CreateGame) => {
                let destination = match route {
                    NotificationRoute::ResponseUrl => {
                        SlackMessageDestination::ResponseUrl(command.response_url)
                    }
                    NotificationRoute::Channel => {
                        SlackMessageDestination::Channel(command.channel_id)
                    }
                };
                Some(Self::CreateGame(destination))
            }
            Err(_) => {
                warn!("Ignoring unknown slash command {}.", command.command);
                None
            }
        }
    }

    fn from_interaction(interaction: SlackInteraction, route: NotificationRoute) -> Option<Self> {
        if let Ok(DajszInteractionCallback::ShowShareModal) =
            DajszInteractionCallback::from_str(&interaction.callback_id)
        {
            return Some(Self::ShowShareModal { trigger_id: interaction.trigger_id });
        }
        let Some(response_url) = interaction.primary_response_url().cloned() else {
            warn!(
                "Ignoring interaction {:?} without response urls.",
                interaction.callback_id
            );
            return None;
        };
        let destination = match route {
            NotificationRoute::ResponseUrl => {
                SlackMessageDestination::ResponseUrl(response_url.response_url)
            }
            NotificationRoute::Channel => SlackMessageDestination::Channel(response_url.channel_id),
        };
        Some(Self::CreateGame(destination))
    }
}

/// Routes verified slack requests to the work that they ask for.
pub struct DajszSlackDispatcher<Games, Slack> {
    games: Games,
    slack: Slack,
    links: DajszGameLinks,
    route: NotificationRoute,
}

impl<Games, Slack> DajszSlackDispatcher<Games, Slack> {
    pub fn new(
        games: Games,
        slack: Slack,
        links: DajszGameLinks,
        route: NotificationRoute,
    ) -> Self {
        Self { games, slack, links, route }
    }
}

#[cfg(test)]
impl<Games, Slack> DajszSlackDispatcher<Games, Slack> {
    pub fn games(&self) -> &Games {
        &self.games
    }

    pub fn slack(&self) -> &Slack {
        &self.slack
    }
}

impl<Games, Slack> DajszSlackDispatcher<Games, Slack>
where
    Games: DajszGameCreate + Send + Sync + 'static,
    Slack: SlackSendMessage + SlackOpenModal + Send + Sync + 'static,
{
    /// Performs the work of `request` on a background task.
    ///
    /// The outcome is only ever reported through a slack message, nothing is handed back to the
    /// caller.
    pub fn dispatch(self: &Arc<Self>, request: DajszSlackRequest) {
        let Some(action) = DajszSlackAction::from_request(request, self.route) else {
            return;
        };
        let dispatcher = self.clone();
        // NB: Slack wants an ack within 3 seconds, so the work has to outlive the request that
        // started it.
        spawn(async move { dispatcher.perform(action).await });
    }

    /// Performs `action`, logging any failure to report back to slack.
    pub async fn perform(&self, action: DajszSlackAction) {
        match action {
            DajszSlackAction::CreateGame(destination) => {
                let result = self.games.create_game().await;
                let message = SlackMessage::for_game_creation(&result, &self.links, destination);
                if let Err(error) = self.slack.send(&message).await {
                    error!("Failed to send game creation message: {}", error);
                }
            }
            DajszSlackAction::ShowShareModal { trigger_id } => {
                info!("Opening share modal.");
                if let Err(error) = self
                    .slack
                    .open_modal(&trigger_id, &SlackModalView::share_game())
                    .await
                {
                    error!("Failed to open share modal: {}", error);
                }
            }
        }
    }
}
