//! Target-path families and their build-time configuration.
//!
//! Each family fixes a JSON-pointer destination, a value template, and the
//! conflict policy applied when merging into it.

use crate::policy::MergePolicy;

/// One of the two fixed destinations this engine manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFamily {
    /// General TCP host-port forwarding: `hostPort: namespace/service:containerPort`.
    Tcp,
    /// Node-level port allocation: `nodePort: containerPort`.
    NodePort,
}

impl PathFamily {
    /// The JSON-pointer path the family's patch targets.
    pub const fn path(self) -> &'static str {
        match self {
            PathFamily::Tcp => "/spec/values/tcp",
            PathFamily::NodePort => "/spec/values/controller/service/nodePorts/tcp",
        }
    }

    /// The conflict policy fixed for this family.
    ///
    /// Node ports are externally visible allocations; overwriting one
    /// silently could double-allocate it, so that family is exclusive.
    pub const fn policy(self) -> MergePolicy {
        match self {
            PathFamily::Tcp => MergePolicy::MergeUpdate,
            PathFamily::NodePort => MergePolicy::Exclusive,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PathFamily::Tcp => "tcp",
            PathFamily::NodePort => "nodeport",
        }
    }
}

/// Value template for the tcp family.
pub fn tcp_target(namespace: &str, service: &str, container_port: u32) -> String {
    format!("{namespace}/{service}:{container_port}")
}

/// Value template for the nodeport family.
pub fn nodeport_target(container_port: u32) -> String {
    container_port.to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_configuration() {
        assert_eq!(PathFamily::Tcp.path(), "/spec/values/tcp");
        assert_eq!(PathFamily::Tcp.policy(), MergePolicy::MergeUpdate);
        assert_eq!(
            PathFamily::NodePort.path(),
            "/spec/values/controller/service/nodePorts/tcp"
        );
        assert_eq!(PathFamily::NodePort.policy(), MergePolicy::Exclusive);
    }

    #[test]
    fn value_templates() {
        assert_eq!(tcp_target("prod", "svc", 31010), "prod/svc:31010");
        assert_eq!(nodeport_target(8080), "8080");
    }
}
