#![allow(dead_code)]
use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use hoopoe_domain::DomainError;
use hoopoe_infrastructure::dns::DnsExchange;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;
use std::time::Duration;

/// How a scripted upstream reacts to a query.
#[derive(Debug, Clone)]
pub enum Script {
    Answer(Ipv4Addr),
    /// Answers only when the question name matches, otherwise responds empty.
    AnswerFor(String, Ipv4Addr),
    NoAnswer,
    Fail,
    /// Holds the request until the attempt times out.
    Hang,
}

/// In-memory upstreams keyed by address, recording every exchange.
pub struct ScriptedExchange {
    scripts: HashMap<String, Script>,
    default: Script,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedExchange {
    pub fn new(default: Script) -> Self {
        Self {
            scripts: HashMap::new(),
            default,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, server: &str, script: Script) -> Self {
        self.scripts.insert(server.to_string(), script);
        self
    }

    /// `(server, question name)` per exchange, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn servers_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|(server, _)| server).collect()
    }

    pub fn names_asked(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (_, name) in self.calls() {
            if names.last() != Some(&name) {
                names.push(name);
            }
        }
        names
    }

    fn response(request: &Message, answer: Option<Ipv4Addr>) -> Message {
        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .add_queries(request.queries().iter().cloned());

        if let (Some(ip), Some(question)) = (answer, request.queries().first()) {
            response.add_answer(Record::from_rdata(
                question.name().clone(),
                60,
                RData::A(A(ip)),
            ));
        }
        response
    }
}

#[async_trait]
impl DnsExchange for ScriptedExchange {
    async fn exchange(
        &self,
        request: &Message,
        server: &str,
        timeout: Duration,
    ) -> Result<Message, DomainError> {
        let name = request
            .queries()
            .first()
            .map(|q| q.name().to_utf8())
            .unwrap_or_default();
        self.calls
            .lock()
            .unwrap()
            .push((server.to_string(), name.clone()));

        let script = self.scripts.get(server).unwrap_or(&self.default).clone();
        match script {
            Script::Answer(ip) => Ok(Self::response(request, Some(ip))),
            Script::AnswerFor(expected, ip) if expected == name => {
                Ok(Self::response(request, Some(ip)))
            }
            Script::AnswerFor(..) | Script::NoAnswer => Ok(Self::response(request, None)),
            Script::Fail => Err(DomainError::TransportError {
                server: server.to_string(),
                message: "connection refused".to_string(),
            }),
            Script::Hang => {
                tokio::time::sleep(timeout).await;
                Err(DomainError::TransportTimeout {
                    server: server.to_string(),
                })
            }
        }
    }

    fn protocol_name(&self) -> &'static str {
        "SCRIPTED"
    }
}
