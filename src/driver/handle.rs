//! Driver task and the handle hosts talk to.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::counter::{CounterAction, CounterState, CounterStore, CounterView};

use super::reconcile::{DriverError, ReconciliationDriver};

type Reply = oneshot::Sender<Result<CounterState, DriverError>>;

/// Messages consumed by the driver task.
#[derive(Debug)]
pub enum DriverCommand {
    /// Run one action through reconciliation. `reply` receives the outcome.
    Submit {
        action: CounterAction,
        reply: Option<Reply>,
    },
}

/// Handle to a spawned [`ReconciliationDriver`].
///
/// Gating: at most one submission is accepted until the previous one has
/// been resolved; extra submissions get [`DriverError::Busy`].
pub struct DriverHandle {
    commands: mpsc::Sender<DriverCommand>,
    views: watch::Receiver<CounterView>,
    in_flight: Arc<AtomicBool>,
    task: JoinHandle<CounterStore>,
}

/// Move `driver` onto a tokio task and return its handle.
///
/// The driver clears the in-flight flag before it publishes a settled view,
/// so a host that sees `!is_pending()` can submit again right away.
pub fn spawn(mut driver: ReconciliationDriver) -> DriverHandle {
    let views = driver.subscribe();
    let (commands, rx) = mpsc::channel(1);
    let in_flight = Arc::new(AtomicBool::new(false));
    driver.track_in_flight(Arc::clone(&in_flight));
    let task = tokio::spawn(run(driver, rx));

    DriverHandle {
        commands,
        views,
        in_flight,
        task,
    }
}

async fn run(
    mut driver: ReconciliationDriver,
    mut commands: mpsc::Receiver<DriverCommand>,
) -> CounterStore {
    while let Some(command) = commands.recv().await {
        match command {
            DriverCommand::Submit { action, reply } => {
                let result = driver.submit(action).await;

                if let Err(err @ (DriverError::Store(_) | DriverError::Busy)) = &result {
                    tracing::error!(action = %action, error = %err, "Driver rejected action");
                }
                if let Some(reply) = reply {
                    let _ = reply.send(result);
                }
            }
        }
    }

    tracing::debug!("Driver command channel closed");
    driver.into_store()
}

impl DriverHandle {
    /// Latest published view.
    pub fn view(&self) -> CounterView {
        self.views.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CounterView> {
        self.views.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Fire-and-forget submission. The outcome shows up in the view.
    pub fn submit(&self, action: CounterAction) -> Result<(), DriverError> {
        self.enqueue(DriverCommand::Submit {
            action,
            reply: None,
        })
    }

    /// Submit and wait for the action to be confirmed or rolled back.
    pub async fn submit_and_wait(
        &self,
        action: CounterAction,
    ) -> Result<CounterState, DriverError> {
        let (reply, outcome) = oneshot::channel();
        self.enqueue(DriverCommand::Submit {
            action,
            reply: Some(reply),
        })?;
        outcome.await.map_err(|_| DriverError::Closed)?
    }

    /// Stop accepting commands and return the final store once the task
    /// has drained.
    pub async fn shutdown(self) -> Result<CounterStore, DriverError> {
        drop(self.commands);
        self.task.await.map_err(|err| {
            tracing::error!(error = %err, "Driver task failed");
            DriverError::Closed
        })
    }

    fn enqueue(&self, command: DriverCommand) -> Result<(), DriverError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(DriverError::Busy);
        }

        self.commands.try_send(command).map_err(|err| {
            self.in_flight.store(false, Ordering::SeqCst);
            match err {
                TrySendError::Full(_) => DriverError::Busy,
                TrySendError::Closed(_) => DriverError::Closed,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::CounterBounds;
    use crate::driver::SimulatedRemote;
    use std::time::Duration;

    fn handle(failure: f64) -> DriverHandle {
        let store = CounterStore::new(CounterBounds::new(10, 0, 20).unwrap());
        let remote = SimulatedRemote::new(store.reducer(), Duration::from_millis(200), failure);
        spawn(ReconciliationDriver::new(store, Arc::new(remote)))
    }

    #[tokio::test(start_paused = true)]
    async fn second_submit_while_pending_is_busy() {
        let h = handle(0.0);
        h.submit(CounterAction::increment(1)).unwrap();
        assert_eq!(h.submit(CounterAction::increment(1)), Err(DriverError::Busy));

        let store = h.shutdown().await.unwrap();
        assert_eq!(store.confirmed().value, 11);
        assert_eq!(store.confirmed().update_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_and_wait_returns_outcome() {
        let h = handle(1.0);
        let err = h
            .submit_and_wait(CounterAction::decrement(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DriverError::Confirmation(_)));
        assert!(!h.is_busy());

        let view = h.view();
        assert_eq!(view.displayed.value, 10);
        assert!(view.last_error.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn settled_view_accepts_next_submit_immediately() {
        let store = CounterStore::new(CounterBounds::new(0, 0, 100).unwrap());
        let remote = SimulatedRemote::new(store.reducer(), Duration::ZERO, 0.0);
        let h = spawn(ReconciliationDriver::new(store, Arc::new(remote)));
        let mut views = h.subscribe();

        for round in 1..=25u64 {
            assert_eq!(h.submit(CounterAction::increment(1)), Ok(()), "round {round}");
            views
                .wait_for(|v| !v.is_pending() && v.confirmed.update_count == round)
                .await
                .unwrap();
        }

        let store = h.shutdown().await.unwrap();
        assert_eq!(store.confirmed().value, 25);
    }
}
