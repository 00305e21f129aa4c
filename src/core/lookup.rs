//! Fund lookup abstractions and core types.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Queries shorter than this (after trimming) return an empty result set
/// from every provider, without touching the network.
pub const MIN_QUERY_LEN: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundSearchResult {
    pub id: String,
    pub name: String,
    pub nav: f64,
    pub category: String,
}

#[async_trait]
pub trait FundSearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<FundSearchResult>>;
}

/// Returns the trimmed query, or `None` when it is too short to search.
pub fn normalized_query(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    (trimmed.len() >= MIN_QUERY_LEN).then_some(trimmed)
}

/// Coarse category derived from scheme-name keywords.
pub fn categorize(scheme_name: &str) -> &'static str {
    let name = scheme_name.to_lowercase();
    let contains_any =
        |keywords: &[&str]| keywords.iter().any(|keyword| name.contains(keyword));

    if contains_any(&[
        "equity",
        "growth",
        "large cap",
        "mid cap",
        "small cap",
        "flexi cap",
    ]) {
        "Equity"
    } else if contains_any(&["debt", "liquid", "overnight", "ultra short", "credit risk"]) {
        "Debt"
    } else if contains_any(&["hybrid", "balanced"]) {
        "Hybrid"
    } else if contains_any(&["tax", "elss"]) {
        "ELSS"
    } else {
        "Other"
    }
}
