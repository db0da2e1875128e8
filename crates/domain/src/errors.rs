use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS request: {0}")]
    InvalidDnsRequest(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Invalid proxy rule: {0}")]
    InvalidRule(String),

    #[error("Invalid upstream address: {0}")]
    InvalidUpstreamAddress(String),

    #[error("Cannot forward an empty engine query")]
    EmptyEngineQuery,

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error with {server}: {message}")]
    TransportError { server: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No upstream servers available")]
    NoUpstreamServers,

    #[error("Failed to get response from upstream servers")]
    UpstreamUnavailable,
}
