use crate::{DomainError, UserId};
use std::net::IpAddr;

/// Static attribution of a client network to a user for plain DNS traffic.
#[derive(Debug, Clone)]
pub struct ClientIdentity {
    pub subnet: String,
    pub user_id: UserId,
}

impl ClientIdentity {
    pub fn new(subnet: impl Into<String>, user_id: UserId) -> Self {
        Self {
            subnet: subnet.into(),
            user_id,
        }
    }

    pub fn validate_subnet(cidr: &str) -> Result<(), String> {
        if cidr.is_empty() {
            return Err("CIDR cannot be empty".to_string());
        }

        if !cidr.contains('/') {
            return Err("CIDR must include prefix (e.g., 192.168.1.0/24)".to_string());
        }

        cidr.parse::<ipnetwork::IpNetwork>()
            .map(|_| ())
            .map_err(|e| format!("Invalid CIDR {}: {}", cidr, e))
    }
}

/// Finds the user for a client address; the most specific subnet wins.
#[derive(Debug, Default)]
pub struct IdentityMatcher {
    networks: Vec<(ipnetwork::IpNetwork, UserId)>,
}

impl IdentityMatcher {
    pub fn new(identities: &[ClientIdentity]) -> Result<Self, DomainError> {
        let mut networks = Vec::with_capacity(identities.len());

        for identity in identities {
            ClientIdentity::validate_subnet(&identity.subnet).map_err(DomainError::InvalidCidr)?;
            let network: ipnetwork::IpNetwork = identity
                .subnet
                .parse()
                .map_err(|e| DomainError::InvalidCidr(format!("{}: {}", identity.subnet, e)))?;
            networks.push((network, identity.user_id.clone()));
        }

        Ok(Self { networks })
    }

    pub fn find_user_for_ip(&self, ip: IpAddr) -> Option<&UserId> {
        let mut best_match: Option<(u8, &UserId)> = None;

        for (network, user_id) in &self.networks {
            if network.contains(ip) {
                let prefix = network.prefix();

                match best_match {
                    None => best_match = Some((prefix, user_id)),
                    Some((existing_prefix, _)) if prefix > existing_prefix => {
                        best_match = Some((prefix, user_id));
                    }
                    _ => {}
                }
            }
        }

        best_match.map(|(_, user_id)| user_id)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}
