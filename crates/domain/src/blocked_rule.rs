use crate::{DomainError, UserId};
use std::sync::Arc;

/// A blocked-domain rule owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedRule {
    pub id: i64,
    pub user_id: UserId,
    pub domain: Arc<str>,
}

impl BlockedRule {
    pub fn new(id: i64, user_id: UserId, domain: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            user_id,
            domain: domain.into(),
        }
    }

    /// Normalizes a user-supplied pattern into its stored form.
    ///
    /// Surrounding whitespace and one trailing `.` are removed. Wildcards, a
    /// leading `.`, empty labels and embedded whitespace are rejected.
    pub fn normalize_domain(raw: &str) -> Result<String, DomainError> {
        let trimmed = raw.trim();
        let domain = trimmed.strip_suffix('.').unwrap_or(trimmed);

        Self::validate_domain(domain).map_err(DomainError::InvalidDomainName)?;

        Ok(domain.to_string())
    }

    pub fn validate_domain(domain: &str) -> Result<(), String> {
        if domain.is_empty() {
            return Err("Domain cannot be empty".to_string());
        }

        if domain.len() > 253 {
            return Err(format!("Domain '{}' exceeds 253 characters", domain));
        }

        if domain.starts_with('.') {
            return Err(format!("Domain '{}' must not start with '.'", domain));
        }

        if domain.contains('*') {
            return Err(format!("Domain '{}' must not contain wildcards", domain));
        }

        if domain.chars().any(char::is_whitespace) {
            return Err(format!("Domain '{}' must not contain whitespace", domain));
        }

        for label in domain.split('.') {
            if label.is_empty() {
                return Err(format!("Domain '{}' contains an empty label", domain));
            }
            if label.len() > 63 {
                return Err(format!(
                    "Label '{}' in domain '{}' exceeds 63 characters",
                    label, domain
                ));
            }
        }

        Ok(())
    }
}
