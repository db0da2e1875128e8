use crate::dns::forwarding::{MessageBuilder, ResponseRewriter};
use hickory_proto::op::{Message, MessageType, OpCode};
use hoopoe_application::use_cases::{HandleDnsQueryUseCase, QueryOutcome};
use hoopoe_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, error};

/// Turns client datagrams into upstream answers.
///
/// Returning `None` means nothing is sent back: the request was malformed,
/// denied by rules, or (without `servfail_on_failure`) left unanswered by
/// every upstream.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
    servfail_on_failure: bool,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self {
            use_case,
            servfail_on_failure: false,
        }
    }

    pub fn with_servfail_on_failure(mut self, enabled: bool) -> Self {
        self.servfail_on_failure = enabled;
        self
    }

    pub async fn handle_datagram(&self, bytes: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let request = match MessageBuilder::parse(bytes) {
            Ok(request) => request,
            Err(e) => {
                debug!(client = %client, error = %e, "Dropping malformed request");
                return None;
            }
        };

        let response = self.handle_message(&request, client.ip()).await?;

        match MessageBuilder::serialize(&response) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(client = %client, error = %e, "Failed to serialize response");
                None
            }
        }
    }

    pub async fn handle_message(&self, request: &Message, client_ip: IpAddr) -> Option<Message> {
        if request.message_type() != MessageType::Query || request.op_code() != OpCode::Query {
            debug!(
                client = %client_ip,
                message_type = ?request.message_type(),
                op_code = ?request.op_code(),
                "Dropping non-query message"
            );
            return None;
        }

        match self.use_case.execute(request, client_ip).await {
            Ok(QueryOutcome::Answered(answered)) => Some(ResponseRewriter::restore_identity(
                request,
                answered.message,
            )),
            Ok(QueryOutcome::Dropped) => None,
            Err(DomainError::InvalidDnsRequest(reason)) => {
                debug!(client = %client_ip, reason = %reason, "Dropping invalid request");
                None
            }
            Err(e) if self.servfail_on_failure => {
                debug!(client = %client_ip, error = %e, "Answering SERVFAIL");
                Some(MessageBuilder::build_servfail(request))
            }
            Err(_) => None,
        }
    }
}
