use sentinel_dns_domain::{BlockedRule, DomainError, UserId};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::RuleRepository;

pub struct AddRuleUseCase {
    repo: Arc<dyn RuleRepository>,
}

impl AddRuleUseCase {
    pub fn new(repo: Arc<dyn RuleRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, user_id: &str, domain: &str) -> Result<(), DomainError> {
        let user = UserId::parse(user_id)?;
        let domain = BlockedRule::normalize_domain(domain)?;

        self.repo.add_rule(&user, &domain).await?;

        info!(user = %user, domain = %domain, "Rule added");
        Ok(())
    }
}
