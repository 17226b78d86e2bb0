use crate::StoreErrorPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// TTL forced onto every forwarded answer of an identified user.
    #[serde(default = "default_ttl")]
    pub answer_ttl: u32,

    #[serde(default = "default_ttl")]
    pub sinkhole_ttl: u32,

    #[serde(default = "default_sinkhole_ipv4")]
    pub sinkhole_ipv4: String,

    #[serde(default = "default_sinkhole_ipv6")]
    pub sinkhole_ipv6: String,

    #[serde(default)]
    pub on_store_error: StoreErrorPolicy,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            answer_ttl: default_ttl(),
            sinkhole_ttl: default_ttl(),
            sinkhole_ipv4: default_sinkhole_ipv4(),
            sinkhole_ipv6: default_sinkhole_ipv6(),
            on_store_error: StoreErrorPolicy::default(),
        }
    }
}

fn default_ttl() -> u32 {
    1
}

fn default_sinkhole_ipv4() -> String {
    "0.0.0.0".to_string()
}

fn default_sinkhole_ipv6() -> String {
    "::".to_string()
}
