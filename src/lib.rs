//! Cloudscope - session cache for the infrastructure dashboard
//!
//! Resource views fetch listings from the provider once and reuse them while
//! they are fresh. The pieces:
//!
//! - [`cache::KeyBuilder`] builds profile-scoped, hierarchical keys
//! - [`cache::CacheStore`] holds values with per-entry expiry
//! - [`cache::ExpirySweeper`] periodically drops expired entries
//! - [`cache::CachedProvider`] wraps a [`client::ResourceProvider`] with all three
//!
//! # Example
//! ```ignore
//! let config = Config::load()?;
//! let store = Arc::new(CacheStore::new());
//! let _sweeper = ExpirySweeper::new(config.cache.sweep_interval())
//!     .watch(store.clone())
//!     .spawn();
//! let client = CachedProvider::new(
//!     sdk_client,
//!     store,
//!     KeyBuilder::new(config.identity()),
//!     config.cache.clone(),
//! );
//! let buckets = client.list_buckets().await?;
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;

pub use cache::{CacheStore, CachedProvider, ExpirySweeper, KeyBuilder, ResourceKind};
pub use config::Config;
pub use error::{Error, Result};
