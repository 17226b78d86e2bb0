use async_trait::async_trait;
use sentinel_dns_domain::{BlockedRule, DomainError, UserId};

/// Per-user blocklist storage.
///
/// Implementations must tolerate unbounded concurrent reads and serialize their
/// own writes. Errors are always reported, never folded into "no rules".
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Patterns of every rule the user currently owns.
    async fn list_blocked_domains(&self, user: &UserId) -> Result<Vec<String>, DomainError>;

    async fn list_rules(&self, user: &UserId) -> Result<Vec<BlockedRule>, DomainError>;

    /// Adding an existing (user, domain) pair is a no-op. Unknown users are created.
    async fn add_rule(&self, user: &UserId, domain: &str) -> Result<(), DomainError>;

    /// Removing an unknown id is a no-op.
    async fn remove_rule(&self, user: &UserId, rule_id: i64) -> Result<(), DomainError>;
}
