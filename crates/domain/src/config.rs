pub mod database;
pub mod errors;
pub mod identity;
pub mod logging;
pub mod policy;
pub mod root;
pub mod server;
pub mod upstream;

pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use identity::{ClientIdentityConfig, IdentityConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use policy::PolicyConfig;
pub use root::{CliOverrides, Config};
pub use server::{ServerConfig, TlsConfig};
pub use upstream::{UpstreamConfig, UpstreamProtocol};
