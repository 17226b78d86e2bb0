mod handle_dns_query;
mod reply_buffer;
mod response;

pub use handle_dns_query::{HandleDnsQueryUseCase, PipelineSettings, QueryOutcome};
pub use reply_buffer::ReplyBuffer;
pub use response::{rewrite_answer_ttls, sinkhole_response};
