//! DNS message construction and wire (de)serialization.

use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use hoopoe_domain::{DnsQuery, DomainError};
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Copy of `original` whose single question asks for `query` instead.
    ///
    /// Header flags, id, EDNS and the question class are kept so the
    /// upstream sees the client's request with only the name and type
    /// changed.
    pub fn build_upstream(original: &Message, query: &DnsQuery) -> Result<Message, DomainError> {
        let name = Name::from_str(&query.domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", query.domain, e))
        })?;
        let query_class = original
            .queries()
            .first()
            .map(|q| q.query_class())
            .unwrap_or(DNSClass::IN);

        let mut question = Query::new();
        question
            .set_name(name)
            .set_query_type(HickoryRecordType::from(query.record_type.to_u16()))
            .set_query_class(query_class);

        let mut message = original.clone();
        message.take_queries();
        message.add_query(question);
        Ok(message)
    }

    /// SERVFAIL answer to `request`, echoing its id and question.
    pub fn build_servfail(request: &Message) -> Message {
        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_recursion_available(true)
            .set_response_code(ResponseCode::ServFail)
            .add_queries(request.queries().iter().cloned());
        response
    }

    pub fn parse(bytes: &[u8]) -> Result<Message, DomainError> {
        Message::from_vec(bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS message: {}", e))
        })
    }

    /// Serialize a Message to wire format bytes
    pub fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsRequest(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
