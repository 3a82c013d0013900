use std::fmt;

/// Resource kinds understood by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Pods,
    Services,
    Deployments,
    StatefulSets,
    Namespaces,
    Nodes,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Pods,
        ResourceKind::Services,
        ResourceKind::Deployments,
        ResourceKind::StatefulSets,
        ResourceKind::Namespaces,
        ResourceKind::Nodes,
    ];

    /// Canonical (plural) name, the value stored in `CommandParams::resource`.
    pub fn canonical(self) -> &'static str {
        match self {
            ResourceKind::Pods => "pods",
            ResourceKind::Services => "services",
            ResourceKind::Deployments => "deployments",
            ResourceKind::StatefulSets => "statefulsets",
            ResourceKind::Namespaces => "namespaces",
            ResourceKind::Nodes => "nodes",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::Pods => "pod",
            ResourceKind::Services => "service",
            ResourceKind::Deployments => "deployment",
            ResourceKind::StatefulSets => "statefulset",
            ResourceKind::Namespaces => "namespace",
            ResourceKind::Nodes => "node",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            ResourceKind::Pods => "po",
            ResourceKind::Services => "svc",
            ResourceKind::Deployments => "deploy",
            ResourceKind::StatefulSets => "sts",
            ResourceKind::Namespaces => "ns",
            ResourceKind::Nodes => "no",
        }
    }

    /// All synonyms accepted for this kind: short name, singular and plural.
    pub fn aliases(self) -> [&'static str; 3] {
        [self.short_name(), self.singular(), self.canonical()]
    }

    /// Checks if the given `target` is one of the synonyms of this kind.
    pub fn matches(self, target: &str) -> bool {
        self.aliases().contains(&target)
    }

    /// Look up the kind whose synonym table contains `target`.
    pub fn from_alias(target: &str) -> Option<ResourceKind> {
        Self::ALL.into_iter().find(|kind| kind.matches(target))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// Normalize a user supplied resource token to its canonical kind name.
///
/// Tokens outside the synonym table are returned unchanged; such resources
/// parse fine but find no handler later on.
pub fn resolve(token: &str) -> String {
    ResourceKind::from_alias(token)
        .map(|kind| kind.canonical().to_string())
        .unwrap_or_else(|| token.to_string())
}
