use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use super::service::QuizSession;

/// Cancellable one-second heartbeat for a running session.
///
/// At most one ticker may be live per session; the owner must cancel the
/// previous one before spawning a replacement, otherwise the quiz clock
/// runs at double speed. The task also exits on its own once the session
/// completes, and dropping the ticker aborts it, so an abandoned session
/// cannot keep counting in the background.
#[derive(Debug)]
pub struct SessionTicker {
    handle: JoinHandle<()>,
}

impl SessionTicker {
    /// Spawn the periodic tick task for the shared session.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(session: Arc<Mutex<QuizSession>>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick of an interval resolves immediately; consume it
            // so the session only accrues seconds that actually passed.
            interval.tick().await;
            loop {
                interval.tick().await;
                let Ok(mut guard) = session.lock() else {
                    warn!("session lock poisoned, stopping ticker");
                    return;
                };
                if guard.is_complete() {
                    return;
                }
                guard.tick();
            }
        });
        Self { handle }
    }

    /// Stop ticking. Idempotent.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SessionTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
