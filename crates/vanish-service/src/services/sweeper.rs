//! Expiry sweeper
//!
//! Background task that deletes expired messages on a fixed period. It sweeps
//! once right away, then on every tick, until its handle is shut down.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use vanish_core::traits::MessageRepository;
use vanish_core::{Clock, RepoResult};

use super::context::ServiceContext;

/// What the sweeper is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    Idle,
    Sweeping,
}

/// Commands sent to a running sweeper
#[derive(Debug)]
enum SweeperCommand {
    Shutdown,
}

/// Deletes messages whose `expires_at` has passed
pub struct ExpirySweeper {
    message_repo: Arc<dyn MessageRepository>,
    clock: Arc<dyn Clock>,
    period: Duration,
    state: watch::Sender<SweeperState>,
}

impl ExpirySweeper {
    pub fn new(
        message_repo: Arc<dyn MessageRepository>,
        clock: Arc<dyn Clock>,
        period: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SweeperState::Idle);
        Self {
            message_repo,
            clock,
            period,
            state,
        }
    }

    /// Sweeper over the context's message store and clock
    pub fn from_context(ctx: &ServiceContext, period: Duration) -> Self {
        Self::new(ctx.message_repo_handle(), ctx.clock(), period)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> SweeperState {
        *self.state.borrow()
    }

    /// Run one sweep and return how many messages were removed
    ///
    /// Failures are logged here; callers may ignore the error.
    pub async fn sweep_once(&self) -> RepoResult<u64> {
        self.state.send_replace(SweeperState::Sweeping);
        let now = self.clock.now();
        let result = self.message_repo.delete_expired(now).await;
        self.state.send_replace(SweeperState::Idle);

        match &result {
            Ok(0) => {}
            Ok(removed) => tracing::info!(removed = *removed, "Swept expired messages"),
            Err(e) => tracing::error!(error = %e, "Expiry sweep failed"),
        }

        result
    }

    /// Start the background loop
    pub fn spawn(self) -> SweeperHandle {
        let (control_tx, control_rx) = mpsc::channel(1);

        tracing::info!(period_secs = self.period.as_secs_f64(), "Expiry sweeper started");
        let task = tokio::spawn(self.run(control_rx));

        SweeperHandle { control_tx, task }
    }

    async fn run(self, mut control_rx: mpsc::Receiver<SweeperCommand>) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // The first tick completes immediately
                _ = ticker.tick() => {
                    // Already logged; the next tick retries
                    let _ = self.sweep_once().await;
                }
                cmd = control_rx.recv() => match cmd {
                    Some(SweeperCommand::Shutdown) | None => {
                        tracing::info!("Expiry sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for ExpirySweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpirySweeper")
            .field("period", &self.period)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Handle to a running sweeper, owned by the server lifecycle
#[derive(Debug)]
pub struct SweeperHandle {
    control_tx: mpsc::Sender<SweeperCommand>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the loop and wait for it; an in-flight sweep finishes first
    pub async fn shutdown(self) {
        // A closed channel means the loop is already gone
        let _ = self.control_tx.send(SweeperCommand::Shutdown).await;

        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Expiry sweeper task failed");
        }
    }
}
