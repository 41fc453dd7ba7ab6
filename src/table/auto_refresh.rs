use crate::core::error::RefreshError;
use crate::table::model::PeerTableModel;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Peer table shared between the timer task and readers
pub type SharedPeerTable = Arc<Mutex<PeerTableModel>>;

/// Periodically refreshes a peer table on a background task
pub struct AutoRefresh {
    table: SharedPeerTable,
    task: Option<JoinHandle<()>>,
}

impl AutoRefresh {
    pub fn new(table: SharedPeerTable) -> Self {
        Self { table, task: None }
    }

    /// Start refreshing every `interval_ms`, replacing any running timer.
    /// The first refresh happens one interval from now. Must be called from
    /// within a Tokio runtime.
    pub fn start(&mut self, interval_ms: u64) -> Result<(), RefreshError> {
        if interval_ms == 0 {
            return Err(RefreshError::InvalidInterval);
        }
        self.stop();

        let period = Duration::from_millis(interval_ms);
        let table = Arc::clone(&self.table);

        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let refreshed = table.lock().await.refresh();
                if !refreshed {
                    debug!("Auto refresh skipped, peer list busy");
                }
            }
        }));

        info!(interval_ms, "Peer table auto refresh started");
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("Peer table auto refresh stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.stop();
    }
}
