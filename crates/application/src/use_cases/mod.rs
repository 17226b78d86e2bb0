pub mod dns;
pub mod policy;
pub mod rules;

pub use dns::{HandleDnsQueryUseCase, PipelineSettings, QueryOutcome, ReplyBuffer};
pub use policy::EvaluatePolicyUseCase;
pub use rules::{AddRuleUseCase, GetRulesUseCase, RemoveRuleUseCase};
