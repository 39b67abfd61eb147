//! Single-flight request pacing.
//!
//! Every outbound call waits for an [`Admission`] from the shared
//! [`RequestPacer`]. Waiters are queued in the order `acquire` was called and a
//! single dispatch task releases them one by one, never closer together than
//! the configured minimum interval.
//!
//! ```text
//!  acquire() ──┐
//!  acquire() ──┼──▶ FIFO channel ──▶ dispatch task ──▶ oneshot grant
//!  acquire() ──┘                     (sleeps until last_grant + interval)
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, error, trace};

/// Default spacing between upstream calls, sized for the public demo tier.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(2_000);

/// Permission for exactly one outbound call to proceed now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    ticket: u64,
    granted_at: Instant,
    waited: Duration,
}

impl Admission {
    /// Arrival position of the caller, starting at zero.
    pub const fn ticket(&self) -> u64 {
        self.ticket
    }

    pub const fn granted_at(&self) -> Instant {
        self.granted_at
    }

    /// Time spent queued between `acquire` and the grant.
    pub const fn waited(&self) -> Duration {
        self.waited
    }
}

#[derive(Debug)]
struct Waiter {
    ticket: u64,
    enqueued_at: Instant,
    grant: oneshot::Sender<Admission>,
}

/// FIFO admission gate shared by every gateway operation.
///
/// Cloning is cheap and every clone feeds the same dispatch task. The dispatch
/// task stops once the last clone is dropped and the queue has drained.
#[derive(Debug, Clone)]
pub struct RequestPacer {
    queue: mpsc::UnboundedSender<Waiter>,
    next_ticket: Arc<Mutex<u64>>,
    pending: Arc<AtomicUsize>,
    min_interval: Duration,
}

impl RequestPacer {
    /// Starts the dispatch task. Must be called from within a Tokio runtime.
    pub fn spawn(min_interval: Duration) -> Self {
        let (queue, receiver) = mpsc::unbounded_channel();
        let pending = Arc::new(AtomicUsize::new(0));

        tokio::spawn(dispatch(receiver, min_interval, Arc::clone(&pending)));

        Self {
            queue,
            next_ticket: Arc::new(Mutex::new(0)),
            pending,
            min_interval,
        }
    }

    /// Queues the caller and resolves once it is admitted.
    ///
    /// The caller takes its place in line when `acquire` is called, not when
    /// the returned future is first polled. Dropping the future gives the place
    /// up without consuming a slot.
    ///
    /// The dispatch task lives as long as any clone of the pacer, so it can
    /// only be missing after it panicked or the runtime is shutting down. In
    /// that case the caller is held back for one full interval before it is
    /// admitted.
    pub fn acquire(&self) -> impl Future<Output = Admission> + Send + 'static {
        let (grant, granted) = oneshot::channel();
        let enqueued_at = Instant::now();
        let min_interval = self.min_interval;

        let ticket = {
            let mut next_ticket = self
                .next_ticket
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let ticket = *next_ticket;
            self.pending.fetch_add(1, Ordering::SeqCst);
            if self
                .queue
                .send(Waiter {
                    ticket,
                    enqueued_at,
                    grant,
                })
                .is_err()
            {
                self.pending.fetch_sub(1, Ordering::SeqCst);
            }
            *next_ticket += 1;
            ticket
        };

        async move {
            match granted.await {
                Ok(admission) => admission,
                Err(_) => {
                    error!(ticket, "pacing dispatcher is gone; admitting after one interval");
                    tokio::time::sleep(min_interval).await;
                    let now = Instant::now();
                    Admission {
                        ticket,
                        granted_at: now,
                        waited: now.saturating_duration_since(enqueued_at),
                    }
                }
            }
        }
    }

    /// Callers queued and not yet admitted.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

async fn dispatch(
    mut queue: mpsc::UnboundedReceiver<Waiter>,
    min_interval: Duration,
    pending: Arc<AtomicUsize>,
) {
    let mut last_grant: Option<Instant> = None;

    while let Some(waiter) = queue.recv().await {
        if waiter.grant.is_closed() {
            pending.fetch_sub(1, Ordering::SeqCst);
            trace!(ticket = waiter.ticket, "skipping abandoned waiter");
            continue;
        }

        if let Some(last) = last_grant {
            let ready_at = last + min_interval;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }

        let granted_at = Instant::now();
        let admission = Admission {
            ticket: waiter.ticket,
            granted_at,
            waited: granted_at.saturating_duration_since(waiter.enqueued_at),
        };

        let delivered = waiter.grant.send(admission).is_ok();
        let remaining = pending.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);

        if delivered {
            last_grant = Some(granted_at);
            debug!(
                ticket = admission.ticket,
                waited_ms = admission.waited.as_millis() as u64,
                pending = remaining,
                "admission granted"
            );
        } else {
            trace!(ticket = waiter.ticket, "waiter left before its grant");
        }
    }

    trace!("pacing dispatcher stopped");
}
