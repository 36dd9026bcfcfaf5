//! Session-scoped cache for provider responses
//!
//! Keeps fetched resource listings in memory so navigating the dashboard does
//! not re-query the provider on every step. Entries expire by TTL; a
//! background sweeper reclaims the ones nobody reads again.

pub mod client;
pub mod clock;
pub mod key;
pub mod storage;
pub mod sweeper;

use std::time::Duration;

/// Default cache TTLs per resource family
///
/// Overridable per kind through `CacheConfig::ttl_overrides`.
pub struct CacheTtl;

impl CacheTtl {
    // Compute state flips often (instances starting, tasks draining)
    pub const COMPUTE: Duration = Duration::from_secs(30); // 30 sec

    pub const STORAGE: Duration = Duration::from_secs(5 * 60); // 5 min
    pub const OBJECTS: Duration = Duration::from_secs(60); // 1 min - uploads land constantly

    // Relatively stable data
    pub const NETWORK: Duration = Duration::from_secs(15 * 60); // 15 min
    pub const IDENTITY: Duration = Duration::from_secs(15 * 60); // 15 min
    pub const STACKS: Duration = Duration::from_secs(5 * 60); // 5 min
    pub const SECRETS: Duration = Duration::from_secs(10 * 60); // 10 min

    // Messaging and observability
    pub const MESSAGING: Duration = Duration::from_secs(2 * 60); // 2 min
    pub const OBSERVABILITY: Duration = Duration::from_secs(2 * 60); // 2 min
    pub const LOG_STREAMS: Duration = Duration::from_secs(20); // 20 sec

    /// Interval between background sweeps
    pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60); // 1 min
}

// Re-export main types
pub use client::CachedProvider;
pub use clock::{Clock, ManualClock, SystemClock};
pub use key::{KeyBuilder, ResourceKind};
pub use storage::{CacheStats, CacheStore, ClearStats};
pub use sweeper::{ExpirySweeper, Sweep, SweeperHandle, SweeperState};
