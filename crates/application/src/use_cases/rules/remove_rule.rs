use sentinel_dns_domain::{DomainError, UserId};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::RuleRepository;

pub struct RemoveRuleUseCase {
    repo: Arc<dyn RuleRepository>,
}

impl RemoveRuleUseCase {
    pub fn new(repo: Arc<dyn RuleRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, user_id: &str, rule_id: i64) -> Result<(), DomainError> {
        let user = UserId::parse(user_id)?;

        self.repo.remove_rule(&user, rule_id).await?;

        info!(user = %user, rule_id, "Rule removed");
        Ok(())
    }
}
