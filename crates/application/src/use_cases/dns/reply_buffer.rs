use async_trait::async_trait;
use hickory_proto::op::Message;
use sentinel_dns_domain::DomainError;

use crate::ports::ResponseSink;

/// Captures the single reply to one query so the transport can encode it.
///
/// A second write is rejected with [`DomainError::ResponseAlreadyWritten`].
#[derive(Debug, Default)]
pub struct ReplyBuffer {
    message: Option<Message>,
}

impl ReplyBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn into_message(self) -> Option<Message> {
        self.message
    }
}

#[async_trait]
impl ResponseSink for ReplyBuffer {
    async fn write_message(&mut self, message: &Message) -> Result<(), DomainError> {
        if self.message.is_some() {
            return Err(DomainError::ResponseAlreadyWritten);
        }
        self.message = Some(message.clone());
        Ok(())
    }
}
