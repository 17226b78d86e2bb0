use hickory_proto::op::Message;
use sentinel_dns_domain::{DomainError, StoreErrorPolicy, UserId};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use tracing::{debug, info};

use super::response::{rewrite_answer_ttls, sinkhole_response};
use crate::ports::{NextHandler, ResponseSink};
use crate::use_cases::EvaluatePolicyUseCase;

#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    pub answer_ttl: u32,
    pub sinkhole_ttl: u32,
    pub sinkhole_v4: Ipv4Addr,
    pub sinkhole_v6: Ipv6Addr,
    pub on_store_error: StoreErrorPolicy,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            answer_ttl: 1,
            sinkhole_ttl: 1,
            sinkhole_v4: Ipv4Addr::UNSPECIFIED,
            sinkhole_v6: Ipv6Addr::UNSPECIFIED,
            on_store_error: StoreErrorPolicy::Allow,
        }
    }
}

/// Which branch produced the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// No identity (or no question): the next handler's reply was sent unchanged.
    Passthrough,
    Sinkholed,
    /// Forwarded with every answer TTL forced to `answer_ttl`.
    Forwarded,
}

/// The per-user response pipeline.
pub struct HandleDnsQueryUseCase {
    policy: Arc<EvaluatePolicyUseCase>,
    next: Arc<dyn NextHandler>,
    settings: PipelineSettings,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        policy: Arc<EvaluatePolicyUseCase>,
        next: Arc<dyn NextHandler>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            policy,
            next,
            settings,
        }
    }

    /// Answers one query and writes exactly one reply to `sink`.
    ///
    /// Errors from the next handler or the sink are returned unchanged; the
    /// caller decides how they reach the client.
    pub async fn execute(
        &self,
        user: Option<&UserId>,
        request: &Message,
        sink: &mut dyn ResponseSink,
    ) -> Result<QueryOutcome, DomainError> {
        let Some(question) = request.queries().first() else {
            debug!(id = request.id(), "Query without question, passing through");
            return self.pass_through(request, sink).await;
        };

        let Some(user) = user else {
            debug!(domain = %question.name(), "No user identity, passing through");
            return self.pass_through(request, sink).await;
        };

        let domain = question.name().to_ascii();
        let decision = self.policy.execute(user, &domain).await;

        if !self.settings.on_store_error.permits(decision) {
            info!(
                user = %user,
                domain = %domain,
                record_type = ?question.query_type(),
                decision = ?decision,
                "Query blocked, answering with sinkhole"
            );
            let response = sinkhole_response(
                request,
                question,
                self.settings.sinkhole_v4,
                self.settings.sinkhole_v6,
                self.settings.sinkhole_ttl,
            );
            sink.write_message(&response).await?;
            return Ok(QueryOutcome::Sinkholed);
        }

        debug!(user = %user, domain = %domain, "Query allowed, forwarding");
        let mut response = self.next.forward(request).await?;
        rewrite_answer_ttls(&mut response, self.settings.answer_ttl);
        sink.write_message(&response).await?;

        Ok(QueryOutcome::Forwarded)
    }

    async fn pass_through(
        &self,
        request: &Message,
        sink: &mut dyn ResponseSink,
    ) -> Result<QueryOutcome, DomainError> {
        let response = self.next.forward(request).await?;
        sink.write_message(&response).await?;
        Ok(QueryOutcome::Passthrough)
    }
}
