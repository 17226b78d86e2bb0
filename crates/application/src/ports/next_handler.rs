use async_trait::async_trait;
use hickory_proto::op::Message;
use sentinel_dns_domain::DomainError;

/// The handler that answers queries the policy lets through.
#[async_trait]
pub trait NextHandler: Send + Sync {
    async fn forward(&self, request: &Message) -> Result<Message, DomainError>;
}
