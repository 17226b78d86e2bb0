use sentinel_dns_domain::{BlockedRule, DomainError, UserId};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::RuleRepository;

pub struct GetRulesUseCase {
    repo: Arc<dyn RuleRepository>,
}

impl GetRulesUseCase {
    pub fn new(repo: Arc<dyn RuleRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, user_id: &str) -> Result<Vec<BlockedRule>, DomainError> {
        let user = UserId::parse(user_id)?;
        let rules = self.repo.list_rules(&user).await?;

        debug!(user = %user, count = rules.len(), "Rules retrieved");
        Ok(rules)
    }
}
