use crate::EngineQuery;
use async_trait::async_trait;
use hoopoe_domain::{DomainError, RequestMetadata};

#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Forward the candidates of an allowed query until one is answered.
    ///
    /// Returns the query carrying the winning upstream response, or
    /// `DomainError::UpstreamUnavailable` once every candidate has exhausted
    /// its timeout budget.
    async fn apply(
        &self,
        query: EngineQuery,
        metadata: &RequestMetadata,
    ) -> Result<EngineQuery, DomainError>;
}
