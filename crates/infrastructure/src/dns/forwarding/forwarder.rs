use crate::dns::transport::{create_transport, tcp::TcpTransport, Transport};
use async_trait::async_trait;
use hickory_proto::op::Message;
use sentinel_dns_application::ports::NextHandler;
use sentinel_dns_domain::config::UpstreamProtocol;
use sentinel_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Forwards queries to the configured upstream resolvers.
///
/// Servers are tried in order and the first usable answer wins. A UDP answer
/// with TC set is re-asked over TCP on the same server.
pub struct UpstreamForwarder {
    servers: Vec<SocketAddr>,
    protocol: UpstreamProtocol,
    timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(servers: Vec<SocketAddr>, protocol: UpstreamProtocol, timeout: Duration) -> Self {
        Self {
            servers,
            protocol,
            timeout,
        }
    }

    async fn query_server(
        &self,
        server: SocketAddr,
        request_id: u16,
        request_bytes: &[u8],
    ) -> Result<(Message, &'static str), DomainError> {
        let transport = create_transport(self.protocol, server);
        let (response, protocol) =
            exchange(&transport, server, request_id, request_bytes, self.timeout).await?;

        if matches!(transport, Transport::Udp(_)) && response.truncated() {
            debug!(server = %server, "Truncated UDP answer, retrying over TCP");
            let tcp = Transport::Tcp(TcpTransport::new(server));
            return exchange(&tcp, server, request_id, request_bytes, self.timeout).await;
        }

        Ok((response, protocol))
    }
}

async fn exchange(
    transport: &Transport,
    server: SocketAddr,
    request_id: u16,
    request_bytes: &[u8],
    timeout: Duration,
) -> Result<(Message, &'static str), DomainError> {
    let response = transport.send(request_bytes, timeout).await?;

    let message = Message::from_vec(&response.bytes).map_err(|e| {
        DomainError::InvalidDnsMessage(format!("Unparsable answer from {}: {}", server, e))
    })?;

    if message.id() != request_id {
        return Err(DomainError::MismatchedResponseId {
            server: server.to_string(),
            expected: request_id,
            got: message.id(),
        });
    }

    Ok((message, response.protocol_used))
}

#[async_trait]
impl NextHandler for UpstreamForwarder {
    #[instrument(skip(self, request), fields(id = request.id()))]
    async fn forward(&self, request: &Message) -> Result<Message, DomainError> {
        if self.servers.is_empty() {
            return Err(DomainError::TransportAllServersUnreachable);
        }

        let request_bytes = request
            .to_vec()
            .map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))?;

        for (position, server) in self.servers.iter().enumerate() {
            let start = Instant::now();
            match self.query_server(*server, request.id(), &request_bytes).await {
                Ok((response, protocol)) => {
                    debug!(
                        server = %server,
                        protocol,
                        latency_ms = start.elapsed().as_millis() as u64,
                        position,
                        "Upstream responded"
                    );
                    return Ok(response);
                }
                Err(e) => {
                    warn!(server = %server, error = %e, position, "Failing over");
                }
            }
        }

        Err(DomainError::TransportAllServersUnreachable)
    }
}
