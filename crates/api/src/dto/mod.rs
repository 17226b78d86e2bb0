pub mod rule;

pub use rule::{AddRuleRequest, RemoveRuleRequest, RuleResponse, StatusResponse};
