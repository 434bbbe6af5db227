use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::api::{slack_api_result, SlackApiClient};

/// The credentials used to install this app into a workspace.
#[derive(Debug, Clone)]
pub struct SlackOAuthCredentials {
    client_id: String,
    client_secret: String,
    redirect_url: String,
}

impl SlackOAuthCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: redirect_url.into(),
        }
    }

    /// The link that starts installing this app into a workspace.
    pub fn install_url(&self) -> String {
        format!(
            "https://slack.com/oauth/v2/authorize?scope=commands&client_id={}",
            self.client_id
        )
    }
}

/// The result of a successful OAuth code exchange.
///
/// The issued token is not kept, this app always posts with its own bot token.
#[derive(Debug, Deserialize)]
pub struct SlackOAuthAccess {
    pub team: SlackOAuthTeam,
}

#[derive(Debug, Deserialize)]
pub struct SlackOAuthTeam {
    pub id: String,
}

#[derive(Debug, Serialize)]
struct SlackOAuthAccessRequest<'r> {
    client_id: &'r str,
    client_secret: &'r str,
    code: &'r str,
    redirect_uri: &'r str,
}

impl SlackApiClient {
    /// Exchanges the code that slack redirects to after an install for an access token.
    pub async fn exchange_oauth_code(
        &self,
        credentials: &SlackOAuthCredentials,
        code: &str,
    ) -> Result<SlackOAuthAccess> {
        let request = SlackOAuthAccessRequest {
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            code,
            redirect_uri: &credentials.redirect_url,
        };
        let resp = self
            .http_client()
            .post(self.method_url("oauth.v2.access"))
            .form(&request)
            .send()
            .await?;
        slack_api_result("oauth.v2.access", resp).await
    }
}
