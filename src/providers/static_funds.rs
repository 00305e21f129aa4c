//! Built-in fund table used when the remote search API is unreachable.

use crate::core::lookup::{FundSearchProvider, FundSearchResult, normalized_query};
use anyhow::Result;
use async_trait::async_trait;

// Snapshot NAVs; this table exists for offline use, not accuracy.
const STATIC_FUNDS: &[(&str, &str, f64, &str)] = &[
    ("fund1", "HDFC Top 100 Direct Plan Growth", 1245.67, "Equity"),
    ("fund2", "SBI Blue Chip Fund Direct Growth", 65.89, "Equity"),
    ("fund3", "Axis Mid Cap Fund Direct Growth", 89.12, "Equity"),
    (
        "fund4",
        "ICICI Prudential Value Discovery Fund Direct Plan",
        245.67,
        "Equity",
    ),
    (
        "fund5",
        "Mirae Asset Large Cap Fund Direct Plan",
        95.67,
        "Equity",
    ),
    (
        "fund6",
        "Kotak Standard Multicap Fund Direct Plan",
        52.36,
        "Equity",
    ),
    (
        "fund7",
        "Aditya Birla Sun Life Tax Relief 96 Direct Growth",
        45.25,
        "ELSS",
    ),
    (
        "fund8",
        "HDFC Mid-Cap Opportunities Fund Direct Plan",
        105.45,
        "Equity",
    ),
    (
        "fund9",
        "DSP Small Cap Fund Direct Plan Growth",
        95.36,
        "Equity",
    ),
    (
        "fund10",
        "ICICI Prudential Liquid Fund Direct Plan",
        315.0,
        "Debt",
    ),
    ("fund11", "HDFC Liquid Fund Direct Plan", 4198.28, "Debt"),
    ("fund12", "Axis Liquid Fund Direct Growth", 2356.78, "Debt"),
    (
        "fund13",
        "ICICI Prudential Balanced Advantage Fund Direct Plan",
        52.46,
        "Hybrid",
    ),
    (
        "fund14",
        "Kotak Emerging Equity Scheme Direct Plan",
        70.25,
        "Equity",
    ),
    (
        "fund15",
        "SBI Magnum Multicap Fund Direct Growth",
        68.93,
        "Equity",
    ),
    (
        "fund16",
        "Franklin India Prima Fund Direct Growth",
        1567.45,
        "Equity",
    ),
    (
        "fund17",
        "Nippon India Small Cap Fund Direct Growth",
        115.67,
        "Equity",
    ),
    ("fund18", "UTI Mid Cap Fund Direct Growth", 187.25, "Equity"),
    (
        "fund19",
        "Mirae Asset Hybrid Equity Fund Direct Plan Growth",
        28.35,
        "Hybrid",
    ),
    (
        "fund20",
        "Axis Long Term Equity Fund Direct Growth",
        75.46,
        "ELSS",
    ),
    (
        "fund21",
        "Parag Parikh Long Term Equity Fund Direct Growth",
        58.93,
        "Equity",
    ),
    ("fund22", "Kotak Tax Saver Fund Direct Growth", 89.72, "ELSS"),
    (
        "fund23",
        "HDFC Corporate Bond Fund Direct Growth",
        27.56,
        "Debt",
    ),
    (
        "fund24",
        "ICICI Prudential Technology Fund Direct Plan",
        156.78,
        "Equity",
    ),
    (
        "fund25",
        "Mirae Asset Emerging Bluechip Fund Direct Plan",
        114.32,
        "Equity",
    ),
];

/// Deterministic, offline fund search over the static table.
pub struct StaticFundProvider;

#[async_trait]
impl FundSearchProvider for StaticFundProvider {
    async fn search(&self, query: &str) -> Result<Vec<FundSearchResult>> {
        let Some(query) = normalized_query(query) else {
            return Ok(Vec::new());
        };
        let query = query.to_lowercase();

        Ok(STATIC_FUNDS
            .iter()
            .filter(|(_, name, _, category)| {
                name.to_lowercase().contains(&query) || category.to_lowercase().contains(&query)
            })
            .map(|(id, name, nav, category)| FundSearchResult {
                id: id.to_string(),
                name: name.to_string(),
                nav: *nav,
                category: category.to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_matches_by_name() {
        let results = StaticFundProvider.search("liquid").await.unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.category == "Debt"));
    }

    #[tokio::test]
    async fn test_matches_by_category() {
        let results = StaticFundProvider.search("elss").await.unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_match_is_case_insensitive() {
        let lower = StaticFundProvider.search("hdfc").await.unwrap();
        let upper = StaticFundProvider.search("HDFC").await.unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 4);
    }

    #[tokio::test]
    async fn test_short_query_is_empty() {
        assert!(StaticFundProvider.search("hd").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_match_is_empty() {
        assert!(
            StaticFundProvider
                .search("does not exist")
                .await
                .unwrap()
                .is_empty()
        );
    }
}
