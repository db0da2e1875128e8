mod builders;
mod dns_server_mock;
mod scripted_exchange;

pub use builders::*;
pub use dns_server_mock::{MockBehavior, MockDnsServer};
pub use scripted_exchange::{Script, ScriptedExchange};
