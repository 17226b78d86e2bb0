mod evaluate_policy;

pub use evaluate_policy::EvaluatePolicyUseCase;
