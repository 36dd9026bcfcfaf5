//! Background expiry sweeper
//!
//! `CacheStore::get` already hides expired entries, so sweeping never changes
//! what callers see. It only reclaims memory held by keys nobody reads again,
//! such as everything left behind by a previous profile.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::storage::CacheStore;

/// Shortest interval accepted; `tokio::time::interval` rejects zero
const MIN_INTERVAL: Duration = Duration::from_millis(1);

const IDLE: u8 = 0;
const SWEEPING: u8 = 1;

/// Anything the sweeper can purge of expired entries
pub trait Sweep: Send + Sync {
    /// Remove expired entries, returning how many were dropped
    fn clean_expired(&self) -> usize;
}

impl<V: Clone + Send> Sweep for CacheStore<V> {
    fn clean_expired(&self) -> usize {
        CacheStore::clean_expired(self)
    }
}

/// What the sweeper task is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    /// Waiting for the next tick
    Idle,
    /// Running `clean_expired` over the watched stores
    Sweeping,
}

/// Builder for the periodic sweep task.
///
/// # Example
/// ```ignore
/// let store = Arc::new(CacheStore::<serde_json::Value>::new());
/// let _sweeper = ExpirySweeper::new(CacheTtl::SWEEP_INTERVAL)
///     .watch(store.clone())
///     .spawn();
/// ```
pub struct ExpirySweeper {
    interval: Duration,
    targets: Vec<Arc<dyn Sweep>>,
}

impl ExpirySweeper {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            targets: Vec::new(),
        }
    }

    /// Add a store to every sweep pass
    pub fn watch(mut self, target: Arc<dyn Sweep>) -> Self {
        self.targets.push(target);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start sweeping on the current tokio runtime.
    ///
    /// The first pass runs one full interval after spawning.
    pub fn spawn(self) -> SweeperHandle {
        let status = Arc::new(SweeperStatus::default());
        let task_status = status.clone();

        debug!(
            "Starting cache sweeper over {} store(s) every {:?}",
            self.targets.len(),
            self.interval
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;

                task_status.state.store(SWEEPING, Ordering::SeqCst);
                let removed: usize = self.targets.iter().map(|t| t.clean_expired()).sum();
                task_status.state.store(IDLE, Ordering::SeqCst);
                let pass = task_status.sweeps.fetch_add(1, Ordering::SeqCst) + 1;

                debug!("Cache sweep #{} removed {} expired entries", pass, removed);
            }
        });

        SweeperHandle { task, status }
    }
}

#[derive(Debug, Default)]
struct SweeperStatus {
    state: AtomicU8,
    sweeps: AtomicU64,
}

/// Handle to a running sweeper.
///
/// Dropping the handle detaches the task; it keeps sweeping until the
/// runtime shuts down or `stop` is called.
#[derive(Debug)]
pub struct SweeperHandle {
    task: JoinHandle<()>,
    status: Arc<SweeperStatus>,
}

impl SweeperHandle {
    pub fn state(&self) -> SweeperState {
        match self.status.state.load(Ordering::SeqCst) {
            SWEEPING => SweeperState::Sweeping,
            _ => SweeperState::Idle,
        }
    }

    /// Number of completed sweep passes
    pub fn sweeps(&self) -> u64 {
        self.status.sweeps.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the timer (process shutdown)
    pub fn stop(self) {
        debug!("Stopping cache sweeper after {} passes", self.sweeps());
        self.task.abort();
    }
}
