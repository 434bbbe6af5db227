use std::{
    error::Error,
    fmt::{Display, Formatter},
};

use anyhow::Result;
use log::error;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{
    message::{SlackMessage, SlackMessageDestination, SlackSendMessage},
    modal::{SlackModalView, SlackOpenModal},
};

/// An http client for the slack web API, bound to the bot token of this app.
#[derive(Clone)]
pub struct SlackApiClient {
    http_client: Client,
    bot_token: String,
    api_url: String,
}

impl SlackApiClient {
    pub fn new(
        http_client: Client,
        bot_token: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self { http_client, bot_token: bot_token.into(), api_url: api_url.into() }
    }

    pub fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), method)
    }

    pub(super) fn http_client(&self) -> &Client {
        &self.http_client
    }

    async fn post_authenticated<Body: Serialize>(&self, method: &str, body: &Body) -> Result<()> {
        let resp = self
            .http_client
            .post(self.method_url(method))
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.bot_token)
            .json(body)
            .send()
            .await?;
        slack_api_result::<SlackEmptyResponse>(method, resp).await.map(|_| ())
    }
}

#[derive(Debug, Serialize)]
struct SlackChatPostMessage<'m> {
    channel: &'m str,
    text: &'m str,
}

impl SlackSendMessage for SlackApiClient {
    async fn send(&self, message: &SlackMessage) -> Result<()> {
        match message.destination() {
            SlackMessageDestination::ResponseUrl(response_url) => {
                // NB: Response urls answer with a bare "ok", there is nothing to check.
                self.http_client.post(response_url).json(message).send().await?;
                Ok(())
            }
            SlackMessageDestination::Channel(channel_id) => {
                let body = SlackChatPostMessage { channel: channel_id, text: message.text() };
                self.post_authenticated("chat.postMessage", &body).await
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct SlackViewsOpen<'v> {
    trigger_id: &'v str,
    view: &'v SlackModalView,
}

impl SlackOpenModal for SlackApiClient {
    async fn open_modal(&self, trigger_id: &str, view: &SlackModalView) -> Result<()> {
        self.post_authenticated("views.open", &SlackViewsOpen { trigger_id, view }).await
    }
}

#[derive(Debug, Deserialize)]
struct SlackApiResponse<Payload> {
    ok: bool,
    error: Option<String>,
    #[serde(flatten)]
    payload: Option<Payload>,
}

#[derive(Debug, Deserialize)]
struct SlackEmptyResponse {}

/// Unwraps the `{ "ok": ..., "error": ... }` envelope of a slack web API response.
pub(super) async fn slack_api_result<Payload: DeserializeOwned>(
    method: &str,
    resp: reqwest::Response,
) -> Result<Payload> {
    let slack_resp = resp.json::<SlackApiResponse<Payload>>().await?;
    match (slack_resp.ok, slack_resp.payload) {
        (true, Some(payload)) => Ok(payload),
        (_, _) => {
            let message = slack_resp.error.unwrap_or_else(|| "unknown_error".to_string());
            error!("A Slack API error occurred in {}: {}.", method, message);
            Err(anyhow::Error::new(SlackApiError { method: method.to_string(), message }))
        }
    }
}

#[derive(Debug)]
pub struct SlackApiError {
    method: String,
    message: String,
}

impl Display for SlackApiError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Slack API Error ({}): {}", self.method, self.message)
    }
}

impl Error for SlackApiError {}
