use sentinel_dns_application::use_cases::{
    AddRuleUseCase, GetRulesUseCase, HandleDnsQueryUseCase, RemoveRuleUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub rules: RuleUseCases,
    pub dns: Arc<HandleDnsQueryUseCase>,
}

#[derive(Clone)]
pub struct RuleUseCases {
    pub add_rule: Arc<AddRuleUseCase>,
    pub remove_rule: Arc<RemoveRuleUseCase>,
    pub get_rules: Arc<GetRulesUseCase>,
}
