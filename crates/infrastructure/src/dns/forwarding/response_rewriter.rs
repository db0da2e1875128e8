use hickory_proto::op::Message;
use hickory_proto::rr::Record;

/// Maps an upstream response back onto the client's request.
pub struct ResponseRewriter;

impl ResponseRewriter {
    /// Give `response` the id and question of `request`.
    ///
    /// When the upstream answered a rewritten name, answer records owned by
    /// that name are renamed to the name the client asked for. Records for
    /// other owners (CNAME targets, glue) are left alone.
    pub fn restore_identity(request: &Message, mut response: Message) -> Message {
        let asked = request.queries().first().map(|q| q.name().clone());
        let answered = response.queries().first().map(|q| q.name().clone());

        if let (Some(asked), Some(answered)) = (asked, answered) {
            if asked != answered {
                let answers: Vec<Record> = response
                    .take_answers()
                    .into_iter()
                    .map(|mut record| {
                        if *record.name() == answered {
                            record.set_name(asked.clone());
                        }
                        record
                    })
                    .collect();
                response.add_answers(answers);
            }
        }

        response.set_id(request.id());
        response.take_queries();
        response.add_queries(request.queries().iter().cloned());
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::{MessageType, Query};
    use hickory_proto::rr::rdata::{A, CNAME};
    use hickory_proto::rr::{Name, RData, RecordType};
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn message(id: u16, domain: &str, message_type: MessageType) -> Message {
        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(message_type)
            .add_query(Query::query(name(domain), RecordType::A));
        message
    }

    #[test]
    fn test_rewritten_answer_renamed_to_original() {
        let request = message(1, "api.ronco.", MessageType::Query);
        let mut response = message(99, "api.service.consul.", MessageType::Response);
        response.add_answer(Record::from_rdata(
            name("api.service.consul."),
            60,
            RData::A(A(Ipv4Addr::new(10, 0, 0, 7))),
        ));

        let restored = ResponseRewriter::restore_identity(&request, response);

        assert_eq!(restored.id(), 1);
        assert_eq!(restored.queries(), request.queries());
        assert_eq!(restored.answers().len(), 1);
        assert_eq!(restored.answers()[0].name().to_utf8(), "api.ronco.");
        assert_eq!(restored.message_type(), MessageType::Response);
    }

    #[test]
    fn test_other_owners_untouched() {
        let request = message(1, "api.ronco.", MessageType::Query);
        let mut response = message(1, "api.service.consul.", MessageType::Response);
        response.add_answer(Record::from_rdata(
            name("api.service.consul."),
            60,
            RData::CNAME(CNAME(name("node1.consul."))),
        ));
        response.add_answer(Record::from_rdata(
            name("node1.consul."),
            60,
            RData::A(A(Ipv4Addr::new(10, 0, 0, 8))),
        ));

        let restored = ResponseRewriter::restore_identity(&request, response);

        let owners: Vec<String> = restored.answers().iter().map(|r| r.name().to_utf8()).collect();
        assert_eq!(owners, vec!["api.ronco.", "node1.consul."]);
    }

    #[test]
    fn test_unrewritten_response_keeps_answers() {
        let request = message(5, "example.com.", MessageType::Query);
        let mut response = message(5, "example.com.", MessageType::Response);
        response.add_answer(Record::from_rdata(
            name("example.com."),
            30,
            RData::A(A(Ipv4Addr::new(93, 184, 216, 34))),
        ));

        let restored = ResponseRewriter::restore_identity(&request, response);

        assert_eq!(restored.answers()[0].name().to_utf8(), "example.com.");
        assert_eq!(restored.answers()[0].ttl(), 30);
    }
}
