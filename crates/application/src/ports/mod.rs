mod next_handler;
mod response_sink;
mod rule_repository;

pub use next_handler::NextHandler;
pub use response_sink::ResponseSink;
pub use rule_repository::RuleRepository;
