//! Provider API interface
//!
//! The dashboard's view controllers talk to the remote provider through
//! `ResourceProvider`. Concrete SDK-backed clients live outside this crate;
//! `CachedProvider` wraps any implementation with the session cache.

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod mock;
pub mod models;

#[cfg(test)]
pub use mock::MockProvider;
pub use models::{Bucket, BucketObject, IamUser, Instance, InstanceState, Queue};

/// Remote provider API used by the resource views
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// List all buckets visible to the active profile
    async fn list_buckets(&self) -> Result<Vec<Bucket>>;

    /// Create a bucket
    async fn create_bucket(&self, name: &str) -> Result<Bucket>;

    /// Delete an (empty) bucket
    async fn delete_bucket(&self, name: &str) -> Result<()>;

    /// List the objects in a bucket
    async fn list_bucket_objects(&self, bucket: &str) -> Result<Vec<BucketObject>>;

    /// Get metadata for a single object
    async fn get_bucket_object(&self, bucket: &str, key: &str) -> Result<BucketObject>;

    /// Delete a single object
    async fn delete_bucket_object(&self, bucket: &str, key: &str) -> Result<()>;

    /// List compute instances in the active region
    async fn list_instances(&self) -> Result<Vec<Instance>>;

    /// List IAM users
    async fn list_users(&self) -> Result<Vec<IamUser>>;

    /// List message queues in the active region
    async fn list_queues(&self) -> Result<Vec<Queue>>;
}
