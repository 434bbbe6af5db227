use std::time::Duration;

use anyhow::{anyhow, Result};
use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use tokio::{
    sync::{Mutex, Notify},
    time::timeout,
};

use super::{
    message::{SlackMessage, SlackSendMessage},
    modal::{SlackModalView, SlackOpenModal},
    signature::{SLACK_SIGNATURE_HEADER, SLACK_TIMESTAMP_HEADER},
};

pub const TEST_SIGNING_SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";

/// Returns the headers that slack would send with `body` when signing with `secret` at
/// `timestamp`.
pub fn signed_headers(secret: &str, timestamp: i64, body: &[u8]) -> HeaderMap {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("v0:{}:", timestamp).as_bytes());
    mac.update(body);
    let signature = format!("v0={}", hex::encode(mac.finalize().into_bytes()));
    let mut headers = HeaderMap::new();
    headers.insert(SLACK_TIMESTAMP_HEADER, timestamp.to_string().parse().unwrap());
    headers.insert(SLACK_SIGNATURE_HEADER, signature.parse().unwrap());
    headers
}

/// Form encodes an interaction payload the way slack posts it.
pub fn interaction_form_body(payload: &Value) -> String {
    serde_urlencoded::to_string(&[("payload", payload.to_string())]).unwrap()
}

/// A slack client that records everything sent through it.
pub struct TestSlack {
    messages: Mutex<Vec<SlackMessage>>,
    opened_modals: Mutex<Vec<String>>,
    recorded: Notify,
    fails: bool,
}

impl TestSlack {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(vec![]),
            opened_modals: Mutex::new(vec![]),
            recorded: Notify::new(),
            fails: false,
        }
    }

    /// Returns an instance that records, but reports every call as failed.
    pub fn failing() -> Self {
        Self { fails: true, ..Self::new() }
    }

    pub async fn messages(&self) -> Vec<SlackMessage> {
        self.messages.lock().await.clone()
    }

    pub async fn opened_modals(&self) -> Vec<String> {
        self.opened_modals.lock().await.clone()
    }

    /// Waits until at least `count` messages and modals were recorded in total.
    pub async fn wait_for_calls(&self, count: usize) {
        let recorded = async {
            loop {
                let calls =
                    self.messages.lock().await.len() + self.opened_modals.lock().await.len();
                if calls >= count {
                    return;
                }
                self.recorded.notified().await
            }
        };
        timeout(Duration::from_secs(5), recorded)
            .await
            .expect("Slack was not called in time.")
    }

    fn result(&self) -> Result<()> {
        if self.fails {
            Err(anyhow!("Slack is unreachable in this test."))
        } else {
            Ok(())
        }
    }
}

impl SlackSendMessage for TestSlack {
    async fn send(&self, message: &SlackMessage) -> Result<()> {
        self.messages.lock().await.push(message.clone());
        self.recorded.notify_one();
        self.result()
    }
}

impl SlackOpenModal for TestSlack {
    async fn open_modal(&self, trigger_id: &str, _: &SlackModalView) -> Result<()> {
        self.opened_modals.lock().await.push(trigger_id.to_string());
        self.recorded.notify_one();
        self.result()
    }
}
