use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use tokio::{sync::Notify, time::timeout};

use super::game::{DajszGameCreate, GameCreationResult};

/// A `DajszGameCreate` that hands out a fixed result and counts how often it was asked.
pub struct TestDajszGames {
    result: GameCreationResult,
    calls: AtomicUsize,
    called: Notify,
    release: Option<Notify>,
}

impl TestDajszGames {
    pub fn creating(game_id: &str) -> Self {
        Self::new(GameCreationResult::Created { game_id: game_id.to_string() })
    }

    pub fn failing() -> Self {
        Self::new(GameCreationResult::Failed)
    }

    /// Returns an instance whose games are only created after `release` is called.
    pub fn gated(game_id: &str) -> Self {
        Self { release: Some(Notify::new()), ..Self::creating(game_id) }
    }

    fn new(result: GameCreationResult) -> Self {
        Self { result, calls: AtomicUsize::new(0), called: Notify::new(), release: None }
    }

    pub fn release(&self) {
        if let Some(release) = &self.release {
            release.notify_one()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Waits until a game creation was asked for at least `count` times.
    pub async fn wait_for_calls(&self, count: usize) {
        let called = async {
            while self.calls() < count {
                self.called.notified().await
            }
        };
        timeout(Duration::from_secs(5), called)
            .await
            .expect("No game was created in time.")
    }
}

impl DajszGameCreate for TestDajszGames {
    async fn create_game(&self) -> GameCreationResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.called.notify_one();
        if let Some(release) = &self.release {
            release.notified().await
        }
        self.result.clone()
    }
}
