//! Periodic scan task

use crate::controller::SharedController;
use crate::MonitorError;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

/// Background task scanning the fleet on a fixed cadence.
///
/// The first pass runs immediately. Dropping the handle stops the task at
/// its next wakeup; [`ScanTask::cancel`] stops it and waits for it to exit.
pub struct ScanTask {
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<u64>,
    period: Duration,
}

impl ScanTask {
    /// Spawn the scan loop on the current tokio runtime
    pub fn start(controller: SharedController, period: Duration) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        info!("Starting scan task every {:?}", period);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut passes = 0u64;

            loop {
                tokio::select! {
                    biased;

                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let report = controller.write().await.scan();
                        passes += 1;
                        debug!("Scan pass {} opened {} incidents", passes, report.opened.len());
                    }
                }
            }

            info!("Scan task stopped after {} passes", passes);
            passes
        });

        Self {
            stop_tx,
            handle,
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop scanning and wait for the task; returns the number of passes run
    pub async fn cancel(self) -> Result<u64, MonitorError> {
        info!("Stopping scan task");
        // The task may already be gone; the join below reports why
        let _ = self.stop_tx.send(());
        self.handle
            .await
            .map_err(|e| MonitorError::TaskFailed(e.to_string()))
    }
}
