use serde::{Deserialize, Serialize};

/// Outcome of evaluating one query against a user's rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    Block,
    /// The rule store could not be consulted.
    Indeterminate,
}

/// How an [`PolicyDecision::Indeterminate`] decision is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreErrorPolicy {
    /// Serve the query unfiltered when the rule store fails.
    #[default]
    Allow,

    /// Sinkhole the query when the rule store fails.
    Block,
}

impl StoreErrorPolicy {
    /// Returns true when the query may be forwarded.
    pub fn permits(self, decision: PolicyDecision) -> bool {
        match decision {
            PolicyDecision::Allow => true,
            PolicyDecision::Block => false,
            PolicyDecision::Indeterminate => self == Self::Allow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Block => "block",
        }
    }
}
