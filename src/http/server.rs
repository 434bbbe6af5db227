use std::sync::Arc;

use axum::{
    body::Body,
    extract::Query,
    http::{
        header::{CONTENT_TYPE, LOCATION},
        HeaderMap, StatusCode,
    },
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    serve, Router,
};
use log::info;
use tokio::net::TcpListener;

use crate::{
    dajsz::game::DajszGameCreate,
    slack::{
        api::SlackApiClient,
        handler::DajszSlackDispatcher,
        message::SlackSendMessage,
        modal::SlackOpenModal,
        oauth::SlackOAuthCredentials,
        request::DajszSlackRequest,
        signature::SlackSigningSecret,
    },
};

use super::{
    rejection::WebhookRejection, response_result::ResponseResult,
    server_environment::ServerEnvironment, success_page::INSTALL_SUCCESS_PAGE,
};

/// Runs this tool as an http server using the specified `ServerEnvironment`.
pub async fn run_http_server(environment: Arc<ServerEnvironment>) -> anyhow::Result<()> {
    let server = dajsz_server(&environment, Arc::new(environment.dispatcher()));
    let listener = TcpListener::bind(environment.address()).await?;
    info!("Listening on {}.", environment.address());
    Ok(serve(listener, server).await?)
}

fn dajsz_server<Games, Slack>(
    environment: &ServerEnvironment,
    dispatcher: Arc<DajszSlackDispatcher<Games, Slack>>,
) -> Router<()>
where
    Games: DajszGameCreate + Send + Sync + 'static,
    Slack: SlackSendMessage + SlackOpenModal + Send + Sync + 'static,
{
    let signing_secret = Arc::new(environment.signing_secret().clone());
    let install_url = environment.oauth_credentials().install_url();
    let oauth_credentials = Arc::new(environment.oauth_credentials().clone());
    let slack_client = Arc::new(environment.slack_client());
    Router::new()
        .route(
            "/",
            get(move || get_install_redirect(install_url)).post(
                move |headers, body| post_slack_webhook(headers, body, signing_secret, dispatcher),
            ),
        )
        .route(
            "/auth",
            get(move |query| get_oauth_exchange(query, slack_client, oauth_credentials)),
        )
        .route("/auth/success", get(get_install_success))
}

async fn post_slack_webhook<Games, Slack>(
    headers: HeaderMap,
    body: Body,
    signing_secret: Arc<SlackSigningSecret>,
    dispatcher: Arc<DajszSlackDispatcher<Games, Slack>>,
) -> Result<StatusCode, WebhookRejection>
where
    Games: DajszGameCreate + Send + Sync + 'static,
    Slack: SlackSendMessage + SlackOpenModal + Send + Sync + 'static,
{
    let verifier = signing_secret.verifier(&headers)?;
    let body = verifier.read_verified_body(body.into_data_stream()).await?;
    let content_type = headers.get(CONTENT_TYPE).and_then(|c| c.to_str().ok());
    let request = DajszSlackRequest::parse(&body, content_type)?;
    dispatcher.dispatch(request);
    Ok(StatusCode::OK)
}

async fn get_install_redirect(install_url: String) -> impl IntoResponse {
    (StatusCode::FOUND, [(LOCATION, install_url)])
}

async fn get_oauth_exchange(
    Query(params): Query<Vec<(String, String)>>,
    slack_client: Arc<SlackApiClient>,
    oauth_credentials: Arc<SlackOAuthCredentials>,
) -> Response {
    let codes = params
        .into_iter()
        .filter(|(key, _)| key == "code")
        .map(|(_, code)| code)
        .collect::<Vec<String>>();
    let [code] = codes.as_slice() else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let result = slack_client
        .exchange_oauth_code(oauth_credentials.as_ref(), code)
        .await
        .map(|access| {
            info!("Installed into workspace {}.", access.team.id);
            Redirect::to("/auth/success")
        });
    ResponseResult::new(result).into_response()
}

async fn get_install_success() -> Html<&'static str> {
    Html(INSTALL_SUCCESS_PAGE)
}
