use hickory_proto::error::ProtoError;
use hickory_proto::op::{Header, Message, MessageType, ResponseCode};
use hickory_proto::serialize::binary::{BinDecodable, BinDecoder};
use sentinel_dns_application::use_cases::{HandleDnsQueryUseCase, ReplyBuffer};
use sentinel_dns_domain::IdentityMatcher;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

const DNS_HEADER_LEN: usize = 12;
const MIN_UDP_PAYLOAD: u16 = 512;

/// Transport a raw query arrived on; UDP answers are size-limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    Udp,
    Tcp,
}

/// Entry point for classic DNS traffic.
///
/// The client address is mapped to a user through the configured client
/// subnets; clients outside every subnet carry no identity.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
    identities: Arc<IdentityMatcher>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>, identities: Arc<IdentityMatcher>) -> Self {
        Self {
            use_case,
            identities,
        }
    }

    /// Answers one wire-format query. `None` means nothing should be sent back.
    pub async fn handle_raw(
        &self,
        query: &[u8],
        client_ip: IpAddr,
        listener: Listener,
    ) -> Option<Vec<u8>> {
        let request = match Message::from_vec(query) {
            Ok(message) => message,
            Err(e) => {
                warn!(client = %client_ip, error = %e, "Malformed DNS query");
                let response = format_error(query)?;
                return encode(&response);
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(client = %client_ip, id = request.id(), "Ignoring non-query message");
            return None;
        }

        let user = self.identities.find_user_for_ip(client_ip);
        let mut reply = ReplyBuffer::new();

        let response = match self.use_case.execute(user, &request, &mut reply).await {
            Ok(outcome) => {
                debug!(client = %client_ip, outcome = ?outcome, "DNS query answered");
                reply.into_message()?
            }
            Err(e) => {
                error!(client = %client_ip, error = %e, "Query resolution failed");
                server_failure(&request)
            }
        };

        match listener {
            Listener::Udp => encode_for_udp(&request, response),
            Listener::Tcp => encode(&response),
        }
    }
}

fn format_error(query: &[u8]) -> Option<Message> {
    if query.len() < DNS_HEADER_LEN {
        return None;
    }
    let header = Header::read(&mut BinDecoder::new(query)).ok()?;
    if header.message_type() != MessageType::Query {
        return None;
    }
    Some(Message::error_msg(
        header.id(),
        header.op_code(),
        ResponseCode::FormErr,
    ))
}

fn server_failure(request: &Message) -> Message {
    let mut response = Message::error_msg(request.id(), request.op_code(), ResponseCode::ServFail);
    response
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(true);
    response.add_queries(request.queries().to_vec());
    response
}

fn encode(response: &Message) -> Option<Vec<u8>> {
    match response.to_vec() {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            error!(error = %e, "Failed to encode DNS response");
            None
        }
    }
}

fn encode_for_udp(request: &Message, response: Message) -> Option<Vec<u8>> {
    let limit = request
        .extensions()
        .as_ref()
        .map(|edns| edns.max_payload().max(MIN_UDP_PAYLOAD))
        .unwrap_or(MIN_UDP_PAYLOAD) as usize;

    match truncate_to(response, limit) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            error!(error = %e, "Failed to encode DNS response");
            None
        }
    }
}

/// Encodes `response`, dropping every record section and setting TC when the
/// result would not fit in `limit` bytes.
fn truncate_to(mut response: Message, limit: usize) -> Result<Vec<u8>, ProtoError> {
    let bytes = response.to_vec()?;
    if bytes.len() <= limit {
        return Ok(bytes);
    }

    debug!(size = bytes.len(), limit, "Response exceeds UDP payload, truncating");
    response.take_answers();
    response.take_name_servers();
    response.take_additionals();
    response.set_truncated(true);
    response.to_vec()
}
