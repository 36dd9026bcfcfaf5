//! Compute models

use serde::{Deserialize, Serialize};

/// Virtual machine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Instance ID
    pub id: String,

    /// Value of the `Name` tag, if set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Machine type (e.g. "t3.micro")
    pub instance_type: String,

    pub state: InstanceState,
}

/// Instance lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceState {
    Pending,
    Running,
    Stopping,
    Stopped,
    ShuttingDown,
    Terminated,
}
