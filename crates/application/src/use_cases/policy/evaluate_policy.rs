use sentinel_dns_domain::{DomainMatcher, PolicyDecision, UserId};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::ports::RuleRepository;

/// Decides whether a user may resolve a name.
///
/// Rules are read from the repository on every call so a rule change is
/// visible to the very next query.
pub struct EvaluatePolicyUseCase {
    rules: Arc<dyn RuleRepository>,
}

impl EvaluatePolicyUseCase {
    pub fn new(rules: Arc<dyn RuleRepository>) -> Self {
        Self { rules }
    }

    #[instrument(skip(self, user), fields(user = %user))]
    pub async fn execute(&self, user: &UserId, query_name: &str) -> PolicyDecision {
        let blocked_domains = match self.rules.list_blocked_domains(user).await {
            Ok(domains) => domains,
            Err(e) => {
                warn!(error = %e, "Failed to fetch rules, policy is indeterminate");
                return PolicyDecision::Indeterminate;
            }
        };

        let matcher = DomainMatcher::new(query_name);

        match matcher.first_match(blocked_domains.iter().map(String::as_str)) {
            Some(pattern) => {
                info!(
                    domain = %query_name,
                    blocked_by = %pattern,
                    "Query matches blocked domain"
                );
                PolicyDecision::Block
            }
            None => {
                debug!(domain = %query_name, rules = blocked_domains.len(), "Query allowed");
                PolicyDecision::Allow
            }
        }
    }
}
