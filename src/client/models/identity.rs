//! Identity models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// IAM user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IamUser {
    pub user_name: String,

    pub arn: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_last_used: Option<DateTime<Utc>>,
}
