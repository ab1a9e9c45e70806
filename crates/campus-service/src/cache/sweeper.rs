use super::MemoryCacheStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

/// Handle to a running expiry sweeper.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stops the sweeper and waits for it to exit.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.task.await;
    }
}

/// Spawns a task that calls [`MemoryCacheStore::sweep`] every `period`.
pub fn spawn_sweeper(store: Arc<MemoryCacheStore>, period: Duration) -> SweeperHandle {
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        info!(period_secs = period.as_secs(), "Cache sweeper started");
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Cache sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let dropped = store.sweep();
                    debug!(dropped, "Cache sweep finished");
                }
            }
        }
    });

    SweeperHandle { shutdown_tx, task }
}
