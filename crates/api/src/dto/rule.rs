use sentinel_dns_domain::BlockedRule;
use serde::{Deserialize, Serialize};

/// Missing fields decode as empty so validation reports them.
#[derive(Debug, Clone, Deserialize)]
pub struct AddRuleRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub domain: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoveRuleRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub rule_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResponse {
    pub id: i64,
    pub domain: String,
}

impl RuleResponse {
    pub fn from_rule(rule: BlockedRule) -> Self {
        Self {
            id: rule.id,
            domain: rule.domain.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn rule_added() -> Self {
        Self {
            status: "rule added",
        }
    }

    pub fn rule_removed() -> Self {
        Self {
            status: "rule removed",
        }
    }
}
