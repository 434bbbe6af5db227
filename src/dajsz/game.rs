use std::{
    error::Error,
    fmt::{Display, Formatter},
    future::Future,
};

use anyhow::Result;
use log::{info, warn};
use reqwest::{header::LOCATION, Client, StatusCode};

/// The outcome of asking the Dajsz API for a new game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCreationResult {
    Created { game_id: String },
    Failed,
}

/// A trait for creating new Dajsz games.
pub trait DajszGameCreate {
    /// Creates a single game.
    ///
    /// Every failure is folded into `GameCreationResult::Failed`, the reason only ends up in the
    /// logs. No retries are made.
    fn create_game(&self) -> impl Future<Output = GameCreationResult> + Send;
}

/// An http client for the Dajsz game API.
#[derive(Debug, Clone)]
pub struct DajszGameClient {
    http_client: Client,
    api_url: String,
}

impl DajszGameClient {
    pub fn new(http_client: Client, api_url: impl Into<String>) -> Self {
        Self { http_client, api_url: api_url.into() }
    }
}

impl DajszGameCreate for DajszGameClient {
    async fn create_game(&self) -> GameCreationResult {
        match self.post_new_game().await {
            Ok(game_id) => {
                info!("Created Dajsz game {}.", game_id);
                GameCreationResult::Created { game_id }
            }
            Err(error) => {
                warn!("Failed to create a Dajsz game: {}", error);
                GameCreationResult::Failed
            }
        }
    }
}

impl DajszGameClient {
    async fn post_new_game(&self) -> Result<String> {
        let url = format!("{}/", self.api_url.trim_end_matches('/'));
        let response = self.http_client.post(url).send().await?;
        if response.status() != StatusCode::CREATED {
            return Err(GameCreationError::UnexpectedStatus(response.status()).into());
        }
        let locations = response.headers().get_all(LOCATION).iter().collect::<Vec<_>>();
        match locations.as_slice() {
            [location] => Ok(location.to_str()?.to_string()),
            _ => Err(GameCreationError::LocationCount(locations.len()).into()),
        }
    }
}

#[derive(Debug)]
enum GameCreationError {
    UnexpectedStatus(StatusCode),
    LocationCount(usize),
}

impl Display for GameCreationError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::UnexpectedStatus(status) => {
                write!(f, "Dajsz API responded with {} instead of 201 Created", status)
            }
            Self::LocationCount(count) => {
                write!(f, "Dajsz API responded with {} Location headers instead of 1", count)
            }
        }
    }
}

impl Error for GameCreationError {}
