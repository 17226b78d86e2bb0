use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Builds the successful-looking answer returned for a blocked query.
///
/// The reply is NOERROR with a single record for the queried name and class.
/// AAAA questions get `sinkhole_v6`; every other type gets an A record for
/// `sinkhole_v4`.
pub fn sinkhole_response(
    request: &Message,
    question: &Query,
    sinkhole_v4: Ipv4Addr,
    sinkhole_v6: Ipv6Addr,
    ttl: u32,
) -> Message {
    let rdata = match question.query_type() {
        RecordType::AAAA => RData::AAAA(AAAA(sinkhole_v6)),
        _ => RData::A(A(sinkhole_v4)),
    };

    let mut record = Record::from_rdata(question.name().clone(), ttl, rdata);
    record.set_dns_class(question.query_class());

    let mut response = reply_to(request);
    response.set_response_code(ResponseCode::NoError);
    response.add_answer(record);
    response
}

/// Forces the TTL of every answer record.
pub fn rewrite_answer_ttls(message: &mut Message, ttl: u32) {
    let mut answers = message.take_answers();
    for record in &mut answers {
        record.set_ttl(ttl);
    }
    message.insert_answers(answers);
}

fn reply_to(request: &Message) -> Message {
    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(true)
        .set_checking_disabled(request.checking_disabled());
    response.add_queries(request.queries().to_vec());
    response
}
