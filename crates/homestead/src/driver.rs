//! The fixed-rate loop that ticks every session.
//!
//! ```text
//!   loop {
//!       select! {
//!           shutdown      => break,
//!           wait_for_tick => lock state, snapshot players, tick, unlock
//!       }
//!   }
//!   disable_all()
//! ```
//!
//! The lock is taken once per tick and released before waiting for the
//! next one, so commands run between ticks.

use homestead_home::HomeStore;
use homestead_tick::{TickConfig, TickScheduler};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::{Platform, SharedHomestead};

/// Handle to a running tick loop.
pub struct TickDriver {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<u64>,
}

impl TickDriver {
    /// Starts ticking `shared` on the current Tokio runtime.
    pub fn spawn<P: Platform, S: HomeStore>(shared: SharedHomestead<P, S>, config: TickConfig) -> Self {
        let (shutdown, rx) = oneshot::channel();
        let task = tokio::spawn(run(shared, TickScheduler::new(config), rx));
        Self {
            shutdown: Some(shutdown),
            task,
        }
    }

    /// Stops the loop after the current tick and waits for it. Returns the
    /// number of ticks run.
    pub async fn shutdown(mut self) -> u64 {
        if let Some(tx) = self.shutdown.take() {
            // The loop may already have ended.
            let _ = tx.send(());
        }
        match self.task.await {
            Ok(ticks) => ticks,
            Err(e) => {
                tracing::error!(error = %e, "tick driver task failed");
                0
            }
        }
    }
}

/// Ticks until `shutdown` fires or its sender is dropped, then disables
/// every session.
pub async fn run<P: Platform, S: HomeStore>(
    shared: SharedHomestead<P, S>,
    mut scheduler: TickScheduler,
    mut shutdown: oneshot::Receiver<()>,
) -> u64 {
    tracing::info!(rate_hz = scheduler.tick_rate_hz(), "tick driver started");

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            info = scheduler.wait_for_tick() => {
                let mut state = shared.lock().await;
                let players = state.platform.online_players();
                state.tick(&players);
                drop(state);
                scheduler.record_tick_end();
                tracing::trace!(tick = info.tick, players = players.len(), "tick done");
            }
        }
    }

    shared.lock().await.sessions.disable_all();
    let ticks = scheduler.tick_count();
    tracing::info!(ticks, "tick driver stopped");
    ticks
}
