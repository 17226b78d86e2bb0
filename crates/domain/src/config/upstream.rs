use serde::{Deserialize, Serialize};

/// Resolver the allowed queries are forwarded to.
///
/// Servers are tried in the listed order; the next one is used only when the
/// previous one failed at the transport level.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    #[serde(default)]
    pub protocol: UpstreamProtocol,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            protocol: UpstreamProtocol::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamProtocol {
    /// UDP first, retried over TCP when the answer is truncated.
    #[default]
    Udp,

    Tcp,
}

impl UpstreamProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tcp => "tcp",
        }
    }
}

fn default_servers() -> Vec<String> {
    vec!["1.1.1.1:53".to_string(), "8.8.8.8:53".to_string()]
}

fn default_timeout_ms() -> u64 {
    2000
}
