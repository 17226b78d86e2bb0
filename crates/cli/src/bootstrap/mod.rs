mod config;
mod database;
mod logging;
mod tls;

pub use config::load_config;
pub use database::init_database;
pub use logging::init_logging;
pub use tls::load_tls_config;
