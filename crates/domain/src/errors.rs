use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    #[error("Invalid CIDR format: {0}")]
    InvalidCidr(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Response already written")]
    ResponseAlreadyWritten,

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    TransportError { server: String, reason: String },

    #[error("Upstream {server} answered with mismatched id {got} (expected {expected})")]
    MismatchedResponseId {
        server: String,
        expected: u16,
        got: u16,
    },

    #[error("All upstream servers are unreachable")]
    TransportAllServersUnreachable,
}
