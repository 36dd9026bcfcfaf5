//! Object storage models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Bucket name (globally unique)
    pub name: String,

    /// Region the bucket lives in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Object stored in a bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketObject {
    /// Object key, may contain `/`
    pub key: String,

    /// Size in bytes
    pub size: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}
