use crate::{ClientIdentity, DomainError, UserId};
use serde::{Deserialize, Serialize};

/// Attribution of plain DNS clients to users.
///
/// DoH requests carry the user in their path and never consult this table.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub clients: Vec<ClientIdentityConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientIdentityConfig {
    pub subnet: String,
    pub user_id: String,
}

impl IdentityConfig {
    pub fn to_identities(&self) -> Result<Vec<ClientIdentity>, DomainError> {
        self.clients
            .iter()
            .map(|client| {
                Ok(ClientIdentity::new(
                    client.subnet.clone(),
                    UserId::parse(&client.user_id)?,
                ))
            })
            .collect()
    }
}
