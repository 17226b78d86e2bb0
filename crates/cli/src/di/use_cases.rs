use super::Repositories;
use sentinel_dns_application::use_cases::{AddRuleUseCase, GetRulesUseCase, RemoveRuleUseCase};
use std::sync::Arc;

pub struct UseCases {
    pub add_rule: Arc<AddRuleUseCase>,
    pub remove_rule: Arc<RemoveRuleUseCase>,
    pub get_rules: Arc<GetRulesUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            add_rule: Arc::new(AddRuleUseCase::new(repos.rules.clone())),
            remove_rule: Arc::new(RemoveRuleUseCase::new(repos.rules.clone())),
            get_rules: Arc::new(GetRulesUseCase::new(repos.rules.clone())),
        }
    }
}
