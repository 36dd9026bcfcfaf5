//! Hierarchical cache keys scoped by profile identity
//!
//! Keys read `identity:service:resource[:parent/[name]]`. Every segment is
//! escaped so user-supplied names can never produce a separator, which keeps
//! identities isolated and parent keys strict prefixes of their children.

use std::fmt;
use std::time::Duration;

use super::CacheTtl;

/// Separator between hierarchy levels
const LEVEL_SEP: char = ':';
/// Separator between a parent resource and its children
const CHILD_SEP: char = '/';

/// Resource categories browsable in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    // Compute
    Instances,
    Volumes,
    Snapshots,
    Images,
    Functions,
    // Storage
    Buckets,
    BucketObjects,
    // Networking
    Vpcs,
    Subnets,
    SecurityGroups,
    LoadBalancers,
    HostedZones,
    RecordSets,
    // Messaging
    Queues,
    Topics,
    Subscriptions,
    // Identity
    Users,
    Roles,
    Policies,
    // Databases
    DbInstances,
    Tables,
    // Containers
    Clusters,
    Services,
    // Observability
    LogGroups,
    LogStreams,
    Alarms,
    // Secrets and configuration
    Secrets,
    Parameters,
    // Infrastructure as code
    Stacks,
    StackResources,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 30] = [
        ResourceKind::Instances,
        ResourceKind::Volumes,
        ResourceKind::Snapshots,
        ResourceKind::Images,
        ResourceKind::Functions,
        ResourceKind::Buckets,
        ResourceKind::BucketObjects,
        ResourceKind::Vpcs,
        ResourceKind::Subnets,
        ResourceKind::SecurityGroups,
        ResourceKind::LoadBalancers,
        ResourceKind::HostedZones,
        ResourceKind::RecordSets,
        ResourceKind::Queues,
        ResourceKind::Topics,
        ResourceKind::Subscriptions,
        ResourceKind::Users,
        ResourceKind::Roles,
        ResourceKind::Policies,
        ResourceKind::DbInstances,
        ResourceKind::Tables,
        ResourceKind::Clusters,
        ResourceKind::Services,
        ResourceKind::LogGroups,
        ResourceKind::LogStreams,
        ResourceKind::Alarms,
        ResourceKind::Secrets,
        ResourceKind::Parameters,
        ResourceKind::Stacks,
        ResourceKind::StackResources,
    ];

    /// Provider service segment of the key
    pub fn service(self) -> &'static str {
        match self {
            Self::Instances | Self::Volumes | Self::Snapshots | Self::Images => "ec2",
            Self::Vpcs | Self::Subnets | Self::SecurityGroups => "ec2",
            Self::Functions => "lambda",
            Self::Buckets | Self::BucketObjects => "s3",
            Self::LoadBalancers => "elb",
            Self::HostedZones | Self::RecordSets => "route53",
            Self::Queues => "sqs",
            Self::Topics | Self::Subscriptions => "sns",
            Self::Users | Self::Roles | Self::Policies => "iam",
            Self::DbInstances => "rds",
            Self::Tables => "dynamodb",
            Self::Clusters | Self::Services => "ecs",
            Self::LogGroups | Self::LogStreams | Self::Alarms => "cloudwatch",
            Self::Secrets => "secretsmanager",
            Self::Parameters => "ssm",
            Self::Stacks | Self::StackResources => "cloudformation",
        }
    }

    /// Resource segment of the key
    pub fn resource(self) -> &'static str {
        match self {
            Self::Instances => "instances",
            Self::Volumes => "volumes",
            Self::Snapshots => "snapshots",
            Self::Images => "images",
            Self::Functions => "functions",
            Self::Buckets => "buckets",
            Self::BucketObjects => "bucket-objects",
            Self::Vpcs => "vpcs",
            Self::Subnets => "subnets",
            Self::SecurityGroups => "security-groups",
            Self::LoadBalancers => "load-balancers",
            Self::HostedZones => "hosted-zones",
            Self::RecordSets => "record-sets",
            Self::Queues => "queues",
            Self::Topics => "topics",
            Self::Subscriptions => "subscriptions",
            Self::Users => "users",
            Self::Roles => "roles",
            Self::Policies => "policies",
            Self::DbInstances => "db-instances",
            Self::Tables => "tables",
            Self::Clusters => "clusters",
            Self::Services => "services",
            Self::LogGroups => "log-groups",
            Self::LogStreams => "log-streams",
            Self::Alarms => "alarms",
            Self::Secrets => "secrets",
            Self::Parameters => "parameters",
            Self::Stacks => "stacks",
            Self::StackResources => "stack-resources",
        }
    }

    /// `service:resource`, as used in config TTL overrides
    pub fn name(self) -> String {
        self.to_string()
    }

    /// Look up a kind by its `service:resource` name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Default freshness window for this kind
    pub fn default_ttl(self) -> Duration {
        match self {
            Self::Instances | Self::DbInstances | Self::Clusters | Self::Services => {
                CacheTtl::COMPUTE
            }
            Self::Volumes | Self::Snapshots | Self::Images | Self::Functions => CacheTtl::COMPUTE,
            Self::Buckets | Self::Tables => CacheTtl::STORAGE,
            Self::BucketObjects => CacheTtl::OBJECTS,
            Self::Vpcs | Self::Subnets | Self::SecurityGroups | Self::LoadBalancers => {
                CacheTtl::NETWORK
            }
            Self::HostedZones | Self::RecordSets => CacheTtl::NETWORK,
            Self::Queues | Self::Topics | Self::Subscriptions => CacheTtl::MESSAGING,
            Self::Users | Self::Roles | Self::Policies => CacheTtl::IDENTITY,
            Self::LogGroups | Self::Alarms => CacheTtl::OBSERVABILITY,
            Self::LogStreams => CacheTtl::LOG_STREAMS,
            Self::Secrets | Self::Parameters => CacheTtl::SECRETS,
            Self::Stacks | Self::StackResources => CacheTtl::STACKS,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{LEVEL_SEP}{}", self.service(), self.resource())
    }
}

/// Builds cache keys for one profile identity.
///
/// Immutable: switching profiles means building a new `KeyBuilder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBuilder {
    identity: String,
    /// Escaped identity followed by `:`
    root: String,
}

impl KeyBuilder {
    pub fn new(identity: impl Into<String>) -> Self {
        let identity = identity.into();
        let root = format!("{}{LEVEL_SEP}", escape_segment(&identity));
        Self { identity, root }
    }

    /// The unescaped identity this builder scopes keys to
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Key for the full listing of a kind, e.g. `prod:s3:buckets`
    pub fn list(&self, kind: ResourceKind) -> String {
        format!("{}{}{LEVEL_SEP}{}", self.root, kind.service(), kind.resource())
    }

    /// Key for a kind's listing under one parent resource.
    ///
    /// Ends with `/` so it is a strict prefix of every `item` key for the
    /// same parent, e.g. `prod:s3:bucket-objects:logs/`.
    pub fn scoped(&self, kind: ResourceKind, parent: &str) -> String {
        format!(
            "{}{LEVEL_SEP}{}{CHILD_SEP}",
            self.list(kind),
            escape_segment(parent)
        )
    }

    /// Key for a single resource under a parent, e.g.
    /// `prod:s3:bucket-objects:logs/2024%2F01.gz`
    pub fn item(&self, kind: ResourceKind, parent: &str, name: &str) -> String {
        format!("{}{}", self.scoped(kind, parent), escape_segment(name))
    }

    /// Prefix covering every key of this identity
    pub fn identity_prefix(&self) -> &str {
        &self.root
    }

    /// Prefix covering every key of one provider service
    pub fn service_prefix(&self, service: &str) -> String {
        format!("{}{}{LEVEL_SEP}", self.root, escape_segment(service))
    }

    /// Prefix covering every `scoped` and `item` key of a kind.
    ///
    /// Does not cover the `list` key itself; callers refreshing a whole kind
    /// delete that one separately.
    pub fn kind_prefix(&self, kind: ResourceKind) -> String {
        format!("{}{LEVEL_SEP}", self.list(kind))
    }
}

/// Percent-encode the characters that carry meaning in a key
fn escape_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '%' => out.push_str("%25"),
            ':' => out.push_str("%3A"),
            '/' => out.push_str("%2F"),
            _ => out.push(c),
        }
    }
    out
}
