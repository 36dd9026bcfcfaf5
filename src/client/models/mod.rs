//! Provider resource models
//!
//! Records returned by the provider API, organized by service family.

mod compute;
mod identity;
mod messaging;
mod storage;

pub use compute::{Instance, InstanceState};
pub use identity::IamUser;
pub use messaging::Queue;
pub use storage::{Bucket, BucketObject};
