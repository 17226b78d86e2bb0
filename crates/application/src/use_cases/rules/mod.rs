mod add_rule;
mod get_rules;
mod remove_rule;

pub use add_rule::AddRuleUseCase;
pub use get_rules::GetRulesUseCase;
pub use remove_rule::RemoveRuleUseCase;
