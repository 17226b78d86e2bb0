use super::Repositories;
use sentinel_dns_application::ports::NextHandler;
use sentinel_dns_application::use_cases::{
    EvaluatePolicyUseCase, HandleDnsQueryUseCase, PipelineSettings,
};
use sentinel_dns_domain::{Config, IdentityMatcher};
use sentinel_dns_infrastructure::dns::UpstreamForwarder;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub handle_query: Arc<HandleDnsQueryUseCase>,
    pub identities: Arc<IdentityMatcher>,
}

impl DnsServices {
    pub fn new(config: &Config, repos: &Repositories) -> anyhow::Result<Self> {
        let upstreams = config.upstream_addrs()?;
        info!(
            servers = ?upstreams,
            protocol = config.upstream.protocol.as_str(),
            timeout_ms = config.upstream.timeout_ms,
            "Configuring upstream forwarder"
        );

        let forwarder: Arc<dyn NextHandler> = Arc::new(UpstreamForwarder::new(
            upstreams,
            config.upstream.protocol,
            Duration::from_millis(config.upstream.timeout_ms),
        ));

        let settings = PipelineSettings {
            answer_ttl: config.policy.answer_ttl,
            sinkhole_ttl: config.policy.sinkhole_ttl,
            sinkhole_v4: config.sinkhole_ipv4()?,
            sinkhole_v6: config.sinkhole_ipv6()?,
            on_store_error: config.policy.on_store_error,
        };

        let policy = Arc::new(EvaluatePolicyUseCase::new(repos.rules.clone()));
        let handle_query = Arc::new(HandleDnsQueryUseCase::new(policy, forwarder, settings));

        let identities = Arc::new(IdentityMatcher::new(&config.identity.to_identities()?)?);
        info!(
            clients = config.identity.clients.len(),
            on_store_error = settings.on_store_error.as_str(),
            "DNS services initialized"
        );

        Ok(Self {
            handle_query,
            identities,
        })
    }
}
