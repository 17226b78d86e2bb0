//! Sentinel DNS Domain Layer
pub mod blocked_rule;
pub mod client_identity;
pub mod config;
pub mod domain_matcher;
pub mod errors;
pub mod policy;
pub mod user;

pub use blocked_rule::BlockedRule;
pub use client_identity::{ClientIdentity, IdentityMatcher};
pub use config::{CliOverrides, Config};
pub use domain_matcher::DomainMatcher;
pub use errors::DomainError;
pub use policy::{PolicyDecision, StoreErrorPolicy};
pub use user::UserId;
