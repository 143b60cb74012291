//! Per-action reconciliation.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use crate::counter::{CounterAction, CounterState, CounterStore, CounterView, StoreError};

use super::remote::{CounterRemote, RemoteError};

/// Errors surfaced to callers of [`ReconciliationDriver::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// Another action is still in flight.
    #[error("An update is already in progress")]
    Busy,

    /// The remote rejected the action; the projection was rolled back.
    #[error(transparent)]
    Confirmation(#[from] RemoteError),

    /// The driver task is gone.
    #[error("Counter driver has stopped")]
    Closed,

    #[error("Invalid store transition: {0}")]
    Store(StoreError),
}

impl From<StoreError> for DriverError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Busy => DriverError::Busy,
            other => DriverError::Store(other),
        }
    }
}

/// Ordered record of a submission's transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    Projected {
        action_id: Uuid,
        action: CounterAction,
        displayed: CounterState,
        confirmed: CounterState,
    },
    Confirmed {
        action_id: Uuid,
        confirmed: CounterState,
    },
    RolledBack {
        action_id: Uuid,
        confirmed: CounterState,
        error: RemoteError,
    },
}

impl DriverEvent {
    pub fn action_id(&self) -> Uuid {
        match self {
            DriverEvent::Projected { action_id, .. }
            | DriverEvent::Confirmed { action_id, .. }
            | DriverEvent::RolledBack { action_id, .. } => *action_id,
        }
    }
}

impl fmt::Display for DriverEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverEvent::Projected {
                action,
                displayed,
                confirmed,
                ..
            } => write!(
                f,
                "{} projected: {} (confirmed {})",
                action, displayed.value, confirmed.value
            ),
            DriverEvent::Confirmed { confirmed, .. } => write!(
                f,
                "confirmed: {} (updates: {})",
                confirmed.value, confirmed.update_count
            ),
            DriverEvent::RolledBack {
                confirmed, error, ..
            } => write!(f, "rolled back to {}: {}", confirmed.value, error),
        }
    }
}

/// Drives one action at a time through
/// `Idle → Projected → {Confirmed, RolledBack} → Idle`.
///
/// Sole writer of the confirmed state. Every transition is published as a
/// [`CounterView`] on a watch channel.
pub struct ReconciliationDriver {
    store: CounterStore,
    remote: Arc<dyn CounterRemote>,
    views: watch::Sender<CounterView>,
    events: Option<mpsc::UnboundedSender<DriverEvent>>,
    in_flight: Option<Arc<AtomicBool>>,
}

impl ReconciliationDriver {
    pub fn new(store: CounterStore, remote: Arc<dyn CounterRemote>) -> Self {
        let (views, _) = watch::channel(store.view());
        Self {
            store,
            remote,
            views,
            events: None,
            in_flight: None,
        }
    }

    pub fn store(&self) -> &CounterStore {
        &self.store
    }

    pub fn into_store(self) -> CounterStore {
        self.store
    }

    pub fn view(&self) -> CounterView {
        self.store.view()
    }

    pub fn subscribe(&self) -> watch::Receiver<CounterView> {
        self.views.subscribe()
    }

    /// Stream of every transition, in order. Replaces any earlier stream.
    pub fn subscribe_events(&mut self) -> mpsc::UnboundedReceiver<DriverEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    /// Flag cleared whenever a submission is resolved, before the settled
    /// view is published.
    pub(crate) fn track_in_flight(&mut self, flag: Arc<AtomicBool>) {
        self.in_flight = Some(flag);
    }

    /// Project `action`, confirm it with the remote, then commit or roll back.
    ///
    /// The projection is published before the remote is called. When this
    /// returns, the displayed state equals the confirmed state.
    pub async fn submit(&mut self, action: CounterAction) -> Result<CounterState, DriverError> {
        let result = self.reconcile(action).await;
        if let Err(DriverError::Busy | DriverError::Store(_)) = &result {
            self.release();
        }
        result
    }

    async fn reconcile(&mut self, action: CounterAction) -> Result<CounterState, DriverError> {
        let projected = self.store.project(action)?;
        let action_id = self.store.pending().map(|p| p.id).unwrap_or_default();
        self.publish();
        self.emit(DriverEvent::Projected {
            action_id,
            action,
            displayed: projected,
            confirmed: *self.store.confirmed(),
        });

        tracing::info!(
            action_id = %action_id,
            action = %action,
            remote = self.remote.name(),
            projected = projected.value,
            "Submitted action"
        );

        let confirmed = *self.store.confirmed();
        match self.remote.confirm(&confirmed, action).await {
            Ok(authoritative) => {
                self.store.commit(authoritative)?;
                self.store.settle()?;
                self.release();
                self.publish();

                let confirmed = *self.store.confirmed();
                self.emit(DriverEvent::Confirmed {
                    action_id,
                    confirmed,
                });
                tracing::info!(
                    action_id = %action_id,
                    value = confirmed.value,
                    update_count = confirmed.update_count,
                    "Action confirmed"
                );
                Ok(confirmed)
            }
            Err(err) => {
                self.store.roll_back(err.to_string())?;
                self.store.settle()?;
                self.release();
                self.publish();
                self.emit(DriverEvent::RolledBack {
                    action_id,
                    confirmed: *self.store.confirmed(),
                    error: err.clone(),
                });

                tracing::warn!(
                    action_id = %action_id,
                    value = self.store.confirmed().value,
                    error = %err,
                    "Action rolled back"
                );
                Err(DriverError::Confirmation(err))
            }
        }
    }

    fn release(&self) {
        if let Some(flag) = &self.in_flight {
            flag.store(false, Ordering::SeqCst);
        }
    }

    fn publish(&self) {
        self.views.send_replace(self.store.view());
    }

    fn emit(&self, event: DriverEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}
