//! Wall-clock scheduler backed by tokio tasks.
//!
//! Each timer is a small spawned task that sleeps and then sends its
//! [`TimerId`] over an unbounded channel.  The owner of the receiving end
//! forwards those ids to the widget, the same way terminal events reach the
//! main loop.  Must be used from inside a tokio runtime.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::{Scheduler, TimerId};

pub struct TokioScheduler {
    origin: Instant,
    tx: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Scheduler that delivers firings to `tx`.  Clone the sender to let
    /// several schedulers share one receiver.
    pub fn new(tx: mpsc::UnboundedSender<TimerId>) -> Self {
        Self {
            origin: Instant::now(),
            tx,
            tasks: HashMap::new(),
        }
    }

    /// Scheduler plus the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn track(&mut self, id: TimerId, handle: JoinHandle<()>) -> TimerId {
        // Drop handles of one-shot timers that already fired.
        self.tasks.retain(|_, h| !h.is_finished());
        self.tasks.insert(id, handle);
        id
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        let id = TimerId::next();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send(id);
        });
        tracing::trace!(?id, ?delay, "scheduled one-shot timer");
        self.track(id, handle)
    }

    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        let id = TimerId::next();
        let tx = self.tx.clone();
        let period = period.max(Duration::from_millis(1));
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            // A stalled host should not get a burst of catch-up frames.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(id).is_err() {
                    break; // receiver dropped
                }
            }
        });
        tracing::trace!(?id, ?period, "scheduled repeating timer");
        self.track(id, handle)
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
