//! Mock provider for testing
//!
//! Serves canned resources and counts calls so tests can tell cache hits
//! from provider round-trips.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

use super::ResourceProvider;
use super::models::{Bucket, BucketObject, IamUser, Instance, Queue};
use crate::error::{ProviderError, Result};

/// Mock provider client.
///
/// Configure responses via builder methods, then use in tests.
#[derive(Default)]
pub struct MockProvider {
    buckets: Arc<Mutex<Vec<Bucket>>>,
    /// Objects by bucket name
    objects: Arc<Mutex<HashMap<String, Vec<BucketObject>>>>,
    instances: Arc<Mutex<Vec<Instance>>>,
    users: Arc<Mutex<Vec<IamUser>>>,
    queues: Arc<Mutex<Vec<Queue>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ProviderError>>>,
    /// Mutations wait for a notification here before completing
    mutation_gate: Arc<Mutex<Option<Arc<Notify>>>>,
    call_count: Arc<Mutex<CallCounts>>,
}

/// Tracks provider call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_buckets: usize,
    pub create_bucket: usize,
    pub delete_bucket: usize,
    pub list_bucket_objects: usize,
    pub get_bucket_object: usize,
    pub delete_bucket_object: usize,
    pub list_instances: usize,
    pub list_users: usize,
    pub list_queues: usize,
}

impl CallCounts {
    /// Get total number of provider calls made.
    pub fn total(&self) -> usize {
        self.list_buckets
            + self.create_bucket
            + self.delete_bucket
            + self.list_bucket_objects
            + self.get_bucket_object
            + self.delete_bucket_object
            + self.list_instances
            + self.list_users
            + self.list_queues
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_buckets(self, buckets: Vec<Bucket>) -> Self {
        *self.buckets.lock().await = buckets;
        self
    }

    pub async fn with_objects(self, bucket: &str, objects: Vec<BucketObject>) -> Self {
        self.objects
            .lock()
            .await
            .insert(bucket.to_string(), objects);
        self
    }

    pub async fn with_instances(self, instances: Vec<Instance>) -> Self {
        *self.instances.lock().await = instances;
        self
    }

    pub async fn with_users(self, users: Vec<IamUser>) -> Self {
        *self.users.lock().await = users;
        self
    }

    pub async fn with_queues(self, queues: Vec<Queue>) -> Self {
        *self.queues.lock().await = queues;
        self
    }

    /// Configure an error to return on the next provider call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ProviderError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Hold every mutation until `gate` is notified
    pub async fn with_mutation_gate(self, gate: Arc<Notify>) -> Self {
        *self.mutation_gate.lock().await = Some(gate);
        self
    }

    /// Queue an error on an already-built mock
    pub async fn fail_next(&self, error: ProviderError) {
        *self.error.lock().await = Some(error);
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    async fn wait_for_gate(&self) {
        let gate = self.mutation_gate.lock().await.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    async fn check_error(&self) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceProvider for MockProvider {
    async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        self.check_error().await?;
        self.call_count.lock().await.list_buckets += 1;
        Ok(self.buckets.lock().await.clone())
    }

    async fn create_bucket(&self, name: &str) -> Result<Bucket> {
        self.check_error().await?;
        self.call_count.lock().await.create_bucket += 1;
        self.wait_for_gate().await;

        let bucket = Bucket {
            name: name.to_string(),
            region: None,
            created_at: None,
        };
        self.buckets.lock().await.push(bucket.clone());
        Ok(bucket)
    }

    async fn delete_bucket(&self, name: &str) -> Result<()> {
        self.check_error().await?;
        self.call_count.lock().await.delete_bucket += 1;
        self.wait_for_gate().await;

        let mut buckets = self.buckets.lock().await;
        let before = buckets.len();
        buckets.retain(|b| b.name != name);
        if buckets.len() == before {
            return Err(ProviderError::NotFound(format!("bucket {}", name)).into());
        }
        self.objects.lock().await.remove(name);
        Ok(())
    }

    async fn list_bucket_objects(&self, bucket: &str) -> Result<Vec<BucketObject>> {
        self.check_error().await?;
        self.call_count.lock().await.list_bucket_objects += 1;

        Ok(self
            .objects
            .lock()
            .await
            .get(bucket)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_bucket_object(&self, bucket: &str, key: &str) -> Result<BucketObject> {
        self.check_error().await?;
        self.call_count.lock().await.get_bucket_object += 1;

        self.objects
            .lock()
            .await
            .get(bucket)
            .and_then(|objects| objects.iter().find(|o| o.key == key).cloned())
            .ok_or_else(|| ProviderError::NotFound(format!("object {}/{}", bucket, key)).into())
    }

    async fn delete_bucket_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.check_error().await?;
        self.call_count.lock().await.delete_bucket_object += 1;
        self.wait_for_gate().await;

        if let Some(objects) = self.objects.lock().await.get_mut(bucket) {
            objects.retain(|o| o.key != key);
        }
        Ok(())
    }

    async fn list_instances(&self) -> Result<Vec<Instance>> {
        self.check_error().await?;
        self.call_count.lock().await.list_instances += 1;
        Ok(self.instances.lock().await.clone())
    }

    async fn list_users(&self) -> Result<Vec<IamUser>> {
        self.check_error().await?;
        self.call_count.lock().await.list_users += 1;
        Ok(self.users.lock().await.clone())
    }

    async fn list_queues(&self) -> Result<Vec<Queue>> {
        self.check_error().await?;
        self.call_count.lock().await.list_queues += 1;
        Ok(self.queues.lock().await.clone())
    }
}
