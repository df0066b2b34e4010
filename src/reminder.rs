use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Emitted once per reminder period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSignal;

/// Background task nudging the user to write an entry.
///
/// Signals travel over a channel so the UI thread decides when to show them.
pub struct ReminderTimer {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ReminderTimer {
    pub fn spawn(
        runtime: &Handle,
        period: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<ReminderSignal>) {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let (stop_tx, mut stop_rx) = oneshot::channel();

        let task = runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(period_secs = period.as_secs(), "reminder timer started");

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        debug!("reminder fired");
                        if signal_tx.send(ReminderSignal).is_err() {
                            break;
                        }
                    }
                }
            }
            info!("reminder timer stopped");
        });

        (
            ReminderTimer {
                stop: Some(stop_tx),
                task,
            },
            signal_rx,
        )
    }

    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        let _ = (&mut self.task).await;
    }
}
