//! Main Coordinator implementation: registration and the drain/timeout race

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::{Mutex, oneshot};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::CoordinatorConfig;
use super::error::DrainError;

/// A boxed cleanup action
///
/// Each action receives the bounded drain token, which is cancelled when the
/// grace period expires. An action that wants to cut its own work short on
/// timeout should select on it; nothing forces it to.
pub type CleanupAction =
    Box<dyn FnOnce(CancellationToken) -> BoxFuture<'static, eyre::Result<()>> + Send>;

/// Sink for drain-time failures, shared with the background worker
type ErrorSink = Arc<dyn Fn(DrainError) + Send + Sync>;

/// A cleanup action plus the label used for logging and error reports
struct RegisteredAction {
    label: String,
    action: CleanupAction,
}

/// The Coordinator collects cleanup actions and drains them on cancellation
///
/// Construction spawns a watcher task that suspends until the cancellation
/// token fires, then runs every registered action sequentially, in
/// registration order, within the grace period. The watcher is the only
/// invoker of the drain, so the drain runs at most once no matter how many
/// times the token is cancelled.
pub struct Coordinator {
    /// Ordered drain list; also the registration lock. The drain holds this
    /// lock for its full duration, so a `register` call that arrives after
    /// the drain has begun blocks until the drain returns and its action
    /// never runs (there is no second drain).
    actions: Arc<Mutex<Vec<RegisteredAction>>>,
}

impl Coordinator {
    /// Create a new Coordinator and start its watcher task
    ///
    /// Never blocks; the returned coordinator is immediately usable for
    /// registration. Must be called from within a tokio runtime.
    ///
    /// The error sink must tolerate concurrent invocation: once the deadline
    /// report is emitted, the abandoned worker may still be running and
    /// reporting action failures.
    pub fn new<S>(cancel: CancellationToken, error_sink: S, grace: Duration) -> Self
    where
        S: Fn(DrainError) + Send + Sync + 'static,
    {
        debug!(grace_ms = grace.as_millis() as u64, "Coordinator::new: called");
        let actions: Arc<Mutex<Vec<RegisteredAction>>> = Arc::new(Mutex::new(Vec::new()));
        let sink: ErrorSink = Arc::new(error_sink);

        let watcher_actions = Arc::clone(&actions);
        tokio::spawn(async move {
            cancel.cancelled().await;
            // The budget starts at fire time, not construction time, and the
            // wait for the registration lock counts against it.
            let deadline = Instant::now() + grace;
            drain(watcher_actions, sink, grace, deadline).await;
        });

        Self { actions }
    }

    /// Create a new Coordinator from a [`CoordinatorConfig`]
    pub fn with_config<S>(cancel: CancellationToken, error_sink: S, config: CoordinatorConfig) -> Self
    where
        S: Fn(DrainError) + Send + Sync + 'static,
    {
        Self::new(cancel, error_sink, config.grace_period())
    }

    /// Register a cleanup action
    ///
    /// Always succeeds. Callable from any number of concurrent tasks; order
    /// across concurrent callers is lock-acquisition order, and that order is
    /// exactly the order actions run in during the drain. Registering after
    /// the cancellation token has fired is a race the caller must avoid: the
    /// call blocks until the drain finishes and the action never runs.
    pub async fn register<F, Fut>(&self, action: F)
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = eyre::Result<()>> + Send + 'static,
    {
        let mut guard = self.actions.lock().await;
        let label = format!("cleanup-{}", guard.len());
        debug!(%label, "Coordinator::register: called");
        guard.push(RegisteredAction {
            label,
            action: Box::new(move |token| action(token).boxed()),
        });
    }

    /// Register a cleanup action under a name
    ///
    /// Same semantics as [`register`](Self::register); the name shows up in
    /// log lines and in [`DrainError::Action`] reports instead of the
    /// positional label.
    pub async fn register_named<F, Fut>(&self, name: impl Into<String>, action: F)
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = eyre::Result<()>> + Send + 'static,
    {
        let label = name.into();
        let mut guard = self.actions.lock().await;
        debug!(%label, "Coordinator::register_named: called");
        guard.push(RegisteredAction {
            label,
            action: Box::new(move |token| action(token).boxed()),
        });
    }
}

/// Run the drain: invoked exactly once by the watcher task
///
/// Holds the registration lock for the entire drain, takes the action list as
/// a consistent snapshot, then races "all actions finished" against the
/// deadline. On timeout the worker is abandoned, not cancelled: remaining
/// actions keep running in the background with no further observation, though
/// the drain token they hold is cancelled so they can exit early themselves.
async fn drain(
    actions: Arc<Mutex<Vec<RegisteredAction>>>,
    sink: ErrorSink,
    budget: Duration,
    deadline: Instant,
) {
    let mut guard = actions.lock().await;
    let batch: Vec<RegisteredAction> = guard.drain(..).collect();

    info!(
        actions = batch.len(),
        budget_ms = budget.as_millis() as u64,
        "Drain started"
    );

    let drain_token = CancellationToken::new();
    let (done_tx, done_rx) = oneshot::channel::<()>();

    let worker_token = drain_token.clone();
    let worker_sink = Arc::clone(&sink);
    tokio::spawn(async move {
        for entry in batch {
            debug!(label = %entry.label, "Running cleanup action");
            if let Err(err) = (entry.action)(worker_token.clone()).await {
                warn!(label = %entry.label, error = %err, "Cleanup action failed");
                worker_sink(DrainError::Action {
                    label: entry.label,
                    error: err,
                });
            }
        }
        // The receiver is gone if the deadline won the race.
        let _ = done_tx.send(());
    });

    tokio::select! {
        _ = done_rx => {
            info!("Drain complete");
        }
        _ = tokio::time::sleep_until(deadline) => {
            drain_token.cancel();
            warn!(
                budget_ms = budget.as_millis() as u64,
                "Drain deadline exceeded, abandoning wait"
            );
            sink(DrainError::DeadlineExceeded { budget });
        }
    }
}
