use crate::core::lookup::{FundSearchProvider, FundSearchResult};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Serves search results from the primary provider, reverting to the
/// fallback when the primary fails. Callers never observe the failure.
pub struct FallbackSearchProvider {
    primary: Arc<dyn FundSearchProvider>,
    fallback: Arc<dyn FundSearchProvider>,
}

impl FallbackSearchProvider {
    pub fn new(
        primary: Arc<dyn FundSearchProvider>,
        fallback: Arc<dyn FundSearchProvider>,
    ) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl FundSearchProvider for FallbackSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<FundSearchResult>> {
        match self.primary.search(query).await {
            Ok(results) => Ok(results),
            Err(e) => {
                warn!("Fund search failed, falling back to static table: {e}");
                self.fallback.search(query).await
            }
        }
    }
}
