use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::oneshot;

/// Handle to a task scheduled on a [`Scheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskToken(u64);

impl std::fmt::Display for TaskToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

type PendingTasks = HashMap<TaskToken, oneshot::Sender<()>>;

/// Locks the pending map, recovering it from poisoning. A panicking task body
/// never holds this lock, so a poisoned map carries no broken invariant.
fn lock_pending(pending: &Mutex<PendingTasks>) -> MutexGuard<'_, PendingTasks> {
    pending
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Delayed tasks that can be cancelled until they start running.
///
/// Each task waits on its delay and a oneshot cancel signal; whichever finishes
/// first decides whether the task body runs. Once the body has started, cancel is
/// a no-op.
#[derive(Clone, Default)]
pub struct Scheduler {
    next_token: Arc<AtomicU64>,
    pending: Arc<Mutex<PendingTasks>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the task built by `make_task` after `delay` unless cancelled first.
    ///
    /// The task receives its own token, which lets it check that it still owns
    /// whatever it is about to change.
    pub fn schedule<F, Fut>(&self, delay: Duration, make_task: F) -> TaskToken
    where
        F: FnOnce(TaskToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = TaskToken(self.next_token.fetch_add(1, Ordering::Relaxed) + 1);
        let task = make_task(token);
        let (cancel_tx, cancel_rx) = oneshot::channel();

        // Registered before spawning so a cancel can never miss it
        lock_pending(&self.pending).insert(token, cancel_tx);

        let pending = self.pending.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    let still_pending = lock_pending(&pending).remove(&token).is_some();
                    if still_pending {
                        task.await;
                    }
                }
                _ = cancel_rx => {
                    tracing::trace!(token = %token, "Scheduled task cancelled");
                }
            }
        });

        token
    }

    /// Cancels a task that has not started yet.
    ///
    /// Returns `false` when the task already fired or was cancelled before.
    pub fn cancel(&self, token: TaskToken) -> bool {
        match lock_pending(&self.pending).remove(&token) {
            Some(cancel_tx) => {
                let _ = cancel_tx.send(());
                true
            }
            None => false,
        }
    }

    /// Number of tasks still waiting on their delay
    pub fn pending_count(&self) -> usize {
        lock_pending(&self.pending).len()
    }
}
