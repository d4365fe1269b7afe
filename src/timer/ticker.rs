//! The 1 Hz session ticker.
//!
//! A session owns at most one ticking task. The task advances the session's
//! timers once per second and stops on its own when there is nothing left to
//! tick; dropping the `SessionTicker` aborts it on any other exit path, so
//! no tick ever outlives its session.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::session::GameSession;

use super::clock::Clock;

/// Owned handle to a session's recurring timer tick.
#[derive(Debug)]
pub struct SessionTicker {
    handle: JoinHandle<()>,
}

impl SessionTicker {
    /// Spawn the ticking task. Must be called within a tokio runtime.
    ///
    /// The task exits once the session has a result or every timer has
    /// expired; aborting covers every other teardown path.
    #[must_use]
    pub fn spawn(session: Arc<Mutex<GameSession>>, clock: Arc<dyn Clock>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;

                let mut session = session.lock();
                session.tick(clock.now());

                let done = session.result().is_some()
                    || (session.is_started() && session.timers().all_expired());
                if done {
                    debug!(session = %session.id(), "ticker finished");
                    break;
                }
            }
        });

        Self { handle }
    }

    /// Whether the ticking task has already exited on its own.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop ticking immediately.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for SessionTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
