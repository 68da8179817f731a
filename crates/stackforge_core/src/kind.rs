//! Resource kinds - the typed vocabulary of declarable infrastructure.

use serde::{Deserialize, Serialize};

/// Kind of a declared resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Virtual network (VPC)
    Network,
    /// Subnet within a network
    Subnet,
    /// Security rule (ingress/egress policy)
    SecurityRule,
    /// Load balancer
    LoadBalancer,
    /// Load balancer listener
    Listener,
    /// Target group behind a listener
    TargetGroup,
    /// Container cluster
    Cluster,
    /// Container task definition
    TaskDefinition,
    /// Container definition inside a task
    ContainerDefinition,
    /// Long-running container service
    Service,
    /// Identity role
    Role,
    /// Log group
    LogGroup,
    /// Container image repository
    Repository,
}

impl ResourceKind {
    /// Stable kebab-case name, matching the serialized form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Subnet => "subnet",
            Self::SecurityRule => "security-rule",
            Self::LoadBalancer => "load-balancer",
            Self::Listener => "listener",
            Self::TargetGroup => "target-group",
            Self::Cluster => "cluster",
            Self::TaskDefinition => "task-definition",
            Self::ContainerDefinition => "container-definition",
            Self::Service => "service",
            Self::Role => "role",
            Self::LogGroup => "log-group",
            Self::Repository => "repository",
        }
    }

    /// Whether this kind carries network topology (used for plan summaries)
    #[must_use]
    pub const fn is_network_layer(self) -> bool {
        matches!(self, Self::Network | Self::Subnet | Self::SecurityRule)
    }

    /// Whether this kind is part of the compute/runtime layer
    #[must_use]
    pub const fn is_compute_layer(self) -> bool {
        matches!(
            self,
            Self::Cluster | Self::TaskDefinition | Self::ContainerDefinition | Self::Service
        )
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display_matches_serde() {
        let json = serde_json::to_string(&ResourceKind::SecurityRule).unwrap();
        assert_eq!(json, "\"security-rule\"");
        assert_eq!(ResourceKind::SecurityRule.to_string(), "security-rule");
    }

    #[test]
    fn test_kind_roundtrip() {
        let kind: ResourceKind = serde_json::from_str("\"task-definition\"").unwrap();
        assert_eq!(kind, ResourceKind::TaskDefinition);
    }

    #[test]
    fn test_layer_predicates() {
        assert!(ResourceKind::Subnet.is_network_layer());
        assert!(ResourceKind::Service.is_compute_layer());
        assert!(!ResourceKind::Role.is_network_layer());
        assert!(!ResourceKind::Role.is_compute_layer());
    }
}
