use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque identity of the user a query is evaluated for.
///
/// The value is never interpreted; it only has to be non-empty and usable as a
/// single URL path segment, because DoH endpoints are mounted at `/<user id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Arc<str>);

impl UserId {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Self::validate(raw).map_err(DomainError::InvalidUserId)?;
        Ok(Self(Arc::from(raw)))
    }

    pub fn validate(raw: &str) -> Result<(), String> {
        if raw.is_empty() {
            return Err("User ID is required".to_string());
        }

        if raw.contains('/') {
            return Err(format!("User ID '{}' must not contain '/'", raw));
        }

        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(format!("User ID '{}' contains whitespace", raw));
        }

        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}
