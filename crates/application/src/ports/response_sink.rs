use async_trait::async_trait;
use hickory_proto::op::Message;
use sentinel_dns_domain::DomainError;

/// Destination of the single reply produced for a query.
#[async_trait]
pub trait ResponseSink: Send {
    async fn write_message(&mut self, message: &Message) -> Result<(), DomainError>;
}
