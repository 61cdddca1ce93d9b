//! Injectable periodic-tick scheduling.
//!
//! The controller never calls `setInterval`-style APIs directly: it asks a
//! [`TickScheduler`] for a periodic callback and keeps the returned
//! [`TickHandle`]. Cancellation must hit the exact handle -- a leaked
//! handle would mean two independent decrement streams.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

/// Opaque cancellation token for one scheduled periodic callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

pub trait TickScheduler {
    /// Begin firing ticks every `period`. The first tick fires one full
    /// period after scheduling, never immediately.
    fn schedule(&mut self, period: Duration) -> TickHandle;

    /// Cancel exactly the callback identified by `handle`.
    fn cancel(&mut self, handle: TickHandle);
}

/// Deterministic scheduler for tests: records active handles, fires
/// nothing on its own. The test delivers ticks by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: std::collections::BTreeSet<u64>,
    scheduled_total: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// How many schedules were ever requested, cancelled or not.
    pub fn scheduled_total(&self) -> u32 {
        self.scheduled_total
    }

    pub fn is_active(&self, handle: TickHandle) -> bool {
        self.active.contains(&handle.0)
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, _period: Duration) -> TickHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.active.insert(id);
        self.scheduled_total += 1;
        TickHandle(id)
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.active.remove(&handle.0);
    }
}

/// Tokio-backed scheduler. Each schedule spawns an interval task sending
/// unit ticks over the channel handed out at construction; cancel aborts
/// that task. Must be used inside a tokio runtime.
#[derive(Debug)]
pub struct IntervalScheduler {
    tx: mpsc::UnboundedSender<()>,
    tasks: HashMap<u64, tokio::task::JoinHandle<()>>,
    next_id: u64,
}

impl IntervalScheduler {
    /// Returns the scheduler and the stream its ticks arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                tasks: HashMap::new(),
                next_id: 0,
            },
            rx,
        )
    }
}

impl TickScheduler for IntervalScheduler {
    fn schedule(&mut self, period: Duration) -> TickHandle {
        let id = self.next_id;
        self.next_id += 1;
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(id, task);
        TickHandle(id)
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle.0) {
            task.abort();
        }
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_scheduler_tracks_active_handles() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule(Duration::from_secs(1));
        let b = sched.schedule(Duration::from_secs(1));
        assert_eq!(sched.active_count(), 2);
        assert_ne!(a, b);

        sched.cancel(a);
        assert_eq!(sched.active_count(), 1);
        assert!(!sched.is_active(a));
        assert!(sched.is_active(b));

        // Cancelling twice is harmless.
        sched.cancel(a);
        assert_eq!(sched.active_count(), 1);
        assert_eq!(sched.scheduled_total(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_scheduler_fires_once_per_period() {
        let (mut sched, mut rx) = IntervalScheduler::new();
        let handle = sched.schedule(Duration::from_secs(1));

        for _ in 0..3 {
            rx.recv().await.expect("tick");
        }

        sched.cancel(handle);
        // No further ticks after cancellation.
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_only_the_given_handle() {
        let (mut sched, mut rx) = IntervalScheduler::new();
        let a = sched.schedule(Duration::from_secs(5));
        let _b = sched.schedule(Duration::from_secs(1));

        sched.cancel(a);
        // The one-second stream keeps firing.
        rx.recv().await.expect("tick from remaining schedule");
    }
}
