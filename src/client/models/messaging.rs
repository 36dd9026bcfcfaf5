//! Messaging models

use serde::{Deserialize, Serialize};

/// Message queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    /// Queue name
    pub name: String,

    /// Queue URL used for API calls
    pub url: String,

    /// Approximate number of visible messages
    #[serde(default)]
    pub approximate_messages: u64,
}
