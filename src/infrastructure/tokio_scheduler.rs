// SPDX-License-Identifier: MPL-2.0
//! Scheduler backed by tokio timers.
//!
//! Each armed [`TimerKind`] owns one sleeping task. Re-arming or cancelling
//! aborts it, and fired timers are delivered over an unbounded channel the
//! host drains into [`crate::player::Player::update`].

use crate::application::port::{Scheduler, TimerFired, TimerKind, TimerToken};
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Receiver side of a [`TokioScheduler`].
pub type TimerReceiver = mpsc::UnboundedReceiver<TimerFired>;

pub struct TokioScheduler {
    handle: Handle,
    tx: mpsc::UnboundedSender<TimerFired>,
    tasks: HashMap<TimerKind, JoinHandle<()>>,
}

impl std::fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("armed", &self.tasks.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl TokioScheduler {
    /// Creates a scheduler spawning on `handle`.
    #[must_use]
    pub fn new(handle: Handle) -> (Self, TimerReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                handle,
                tx,
                tasks: HashMap::new(),
            },
            rx,
        )
    }

    /// Creates a scheduler on the runtime of the calling context.
    ///
    /// Returns `None` outside a tokio runtime.
    #[must_use]
    pub fn current() -> Option<(Self, TimerReceiver)> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Number of timers with a live task.
    #[must_use]
    pub fn armed_count(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn arm(&mut self, kind: TimerKind, token: TimerToken, delay: Duration) {
        self.cancel(kind);
        let tx = self.tx.clone();
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone once the host stopped listening.
            let _ = tx.send(TimerFired { kind, token });
        });
        self.tasks.insert(kind, task);
    }

    fn cancel(&mut self, kind: TimerKind) {
        if let Some(task) = self.tasks.remove(&kind) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
