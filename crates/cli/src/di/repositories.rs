use sentinel_dns_application::ports::RuleRepository;
use sentinel_dns_infrastructure::repositories::SqliteRuleRepository;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub rules: Arc<dyn RuleRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            rules: Arc::new(SqliteRuleRepository::new(pool)),
        }
    }
}
