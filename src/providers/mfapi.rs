//! Provider for the mfapi.in mutual fund API.

use crate::core::lookup::{FundSearchProvider, FundSearchResult, categorize, normalized_query};
use crate::providers::util::{seconds_until, with_retry};
use crate::store::KeyValueCollection;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// At most this many schemes from a search response get their NAV fetched.
const MAX_SEARCH_RESULTS: usize = 15;

pub struct MfApiProvider {
    base_url: String,
    cache: Arc<dyn KeyValueCollection>,
}

#[derive(Debug, Deserialize)]
struct SchemeSummary {
    #[serde(rename = "schemeCode")]
    scheme_code: i64,
    #[serde(rename = "schemeName")]
    scheme_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SchemeMeta {
    scheme_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct NavPoint {
    date: String,
    nav: String,
}

/// Raw per-scheme response; `data` is sorted latest-first by the API.
#[derive(Debug, Serialize, Deserialize)]
struct SchemeNav {
    meta: SchemeMeta,
    data: Vec<NavPoint>,
}

/// Latest published NAV for one scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct NavQuote {
    pub scheme_code: String,
    pub scheme_name: String,
    pub nav: f64,
    pub date: String,
}

/// Change between the two most recent NAV publications.
#[derive(Debug, Clone, PartialEq)]
pub struct DayChange {
    pub current_nav: f64,
    pub previous_nav: f64,
    pub absolute_change: f64,
    pub percent_change: f64,
}

impl MfApiProvider {
    pub fn new(base_url: &str, cache: Arc<dyn KeyValueCollection>) -> Self {
        MfApiProvider {
            base_url: base_url.to_string(),
            cache,
        }
    }

    async fn fetch_scheme(&self, scheme_code: &str) -> Result<SchemeNav> {
        let cache_key = format!("mf/{scheme_code}");
        if let Some(cached) = self.cache.get(&cache_key).await {
            if let Ok(scheme) = serde_json::from_slice(&cached) {
                return Ok(scheme);
            }
            debug!("Discarding unreadable cache entry for {cache_key}");
        }

        let url = format!("{}/mf/{}", self.base_url, scheme_code);
        debug!("Requesting NAV data from {url}");

        let client = reqwest::Client::builder()
            .user_agent("famfolio/0.1")
            .build()?;
        let response = with_retry(|| async { client.get(&url).send().await }, 3, 500)
            .await
            .with_context(|| format!("Failed to send request for scheme: {scheme_code}"))?;

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for scheme: {scheme_code}"))?;

        if response_text.trim().is_empty() {
            return Err(anyhow!("Received empty response for scheme: {scheme_code}"));
        }

        let scheme: SchemeNav = serde_json::from_str(&response_text).with_context(|| {
            format!(
                "Failed to parse NAV response for scheme: {scheme_code}. Response: '{response_text}'",
            )
        })?;

        if scheme.data.is_empty() {
            return Err(anyhow!("No NAV data available for scheme: {scheme_code}"));
        }

        // Cache until the daily NAV refresh.
        let ttl_seconds = match seconds_until(19, 0) {
            Ok(ttl) => ttl,
            Err(e) => {
                warn!("Failed calculating 7PM UTC refresh TTL: {e}. Using fallback 1 day");
                24 * 60 * 60
            }
        };
        if let Ok(bytes) = serde_json::to_vec(&scheme) {
            self.cache
                .put(&cache_key, &bytes, Some(Duration::from_secs(ttl_seconds)))
                .await;
        }

        Ok(scheme)
    }

    /// Latest NAV for a scheme, with the publication date.
    pub async fn latest_nav(&self, scheme_code: &str) -> Result<NavQuote> {
        let scheme = self.fetch_scheme(scheme_code).await?;
        let latest = &scheme.data[0];
        let nav = parse_nav(&latest.nav, scheme_code)?;

        Ok(NavQuote {
            scheme_code: scheme_code.to_string(),
            scheme_name: scheme.meta.scheme_name,
            nav,
            date: latest.date.clone(),
        })
    }

    /// Mark-to-market change against the previous trading day. Needs at
    /// least two published NAV points.
    pub async fn day_change(&self, scheme_code: &str) -> Result<DayChange> {
        let scheme = self.fetch_scheme(scheme_code).await?;
        if scheme.data.len() < 2 {
            return Err(anyhow!(
                "Insufficient NAV data available for scheme: {scheme_code}"
            ));
        }

        let current_nav = parse_nav(&scheme.data[0].nav, scheme_code)?;
        let previous_nav = parse_nav(&scheme.data[1].nav, scheme_code)?;
        let absolute_change = current_nav - previous_nav;
        let percent_change = absolute_change / previous_nav * 100.0;

        Ok(DayChange {
            current_nav,
            previous_nav,
            absolute_change,
            percent_change,
        })
    }
}

fn parse_nav(raw: &str, scheme_code: &str) -> Result<f64> {
    raw.parse::<f64>()
        .with_context(|| format!("Invalid NAV '{raw}' for scheme: {scheme_code}"))
}

#[async_trait]
impl FundSearchProvider for MfApiProvider {
    async fn search(&self, query: &str) -> Result<Vec<FundSearchResult>> {
        let Some(query) = normalized_query(query) else {
            return Ok(Vec::new());
        };

        let url = format!("{}/mf/search", self.base_url);
        debug!("Searching funds via {url}");

        let client = reqwest::Client::builder()
            .user_agent("famfolio/0.1")
            .build()?;
        let response = with_retry(
            || async { client.get(&url).query(&[("q", query)]).send().await },
            3,
            500,
        )
        .await
        .with_context(|| format!("Failed to send search request for query: {query}"))?;

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get search response for query: {query}"))?;

        let schemes: Vec<SchemeSummary> =
            serde_json::from_str(&response_text).with_context(|| {
                format!(
                    "Failed to parse search response for query: {query}. Response: '{response_text}'",
                )
            })?;

        // Resolve NAVs concurrently; schemes whose NAV fetch fails are
        // dropped from the result set rather than failing the search.
        let nav_futures = schemes
            .iter()
            .take(MAX_SEARCH_RESULTS)
            .map(|scheme| async move {
                let code = scheme.scheme_code.to_string();
                let nav = self.latest_nav(&code).await;
                (scheme, nav)
            });

        let mut results = Vec::new();
        for (scheme, nav) in join_all(nav_futures).await {
            match nav {
                Ok(quote) => results.push(FundSearchResult {
                    id: scheme.scheme_code.to_string(),
                    name: scheme.scheme_name.clone(),
                    nav: quote.nav,
                    category: categorize(&scheme.scheme_name).to_string(),
                }),
                Err(e) => {
                    debug!("Skipping scheme {}: {e}", scheme.scheme_code);
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryCollection;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> MfApiProvider {
        MfApiProvider::new(base_url, Arc::new(MemoryCollection::new()))
    }

    async fn mount_scheme(server: &MockServer, code: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/mf/{code}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    const SCHEME_119551: &str = r#"{
        "meta": {"scheme_name": "HDFC Top 100 Fund - Direct Plan - Growth"},
        "data": [
            {"date": "28-08-2026", "nav": "1245.67000"},
            {"date": "27-08-2026", "nav": "1232.10000"}
        ]
    }"#;

    #[tokio::test]
    async fn test_short_query_returns_empty_without_network() {
        // Unroutable base URL proves no request is made.
        let provider = provider("http://127.0.0.1:1");
        assert!(provider.search("hd").await.unwrap().is_empty());
        assert!(provider.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_resolves_navs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mf/search"))
            .and(query_param("q", "hdfc top"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"schemeCode": 119551, "schemeName": "HDFC Top 100 Fund - Direct Plan - Growth"}]"#,
            ))
            .mount(&server)
            .await;
        mount_scheme(&server, "119551", SCHEME_119551).await;

        let provider = provider(&server.uri());
        let results = provider.search("hdfc top").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "119551");
        assert_eq!(results[0].nav, 1245.67);
        assert_eq!(results[0].category, "Equity");
    }

    #[tokio::test]
    async fn test_search_skips_schemes_with_failing_nav() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mf/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    {"schemeCode": 119551, "schemeName": "HDFC Top 100 Fund - Direct Plan - Growth"},
                    {"schemeCode": 999999, "schemeName": "Broken Fund"}
                ]"#,
            ))
            .mount(&server)
            .await;
        mount_scheme(&server, "119551", SCHEME_119551).await;
        Mock::given(method("GET"))
            .and(path("/mf/999999"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = provider(&server.uri());
        let results = provider.search("fund").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "119551");
    }

    #[tokio::test]
    async fn test_search_error_on_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mf/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let provider = provider(&server.uri());
        let err = provider.search("hdfc").await.unwrap_err().to_string();
        assert!(err.contains("Failed to parse search response"));
    }

    #[tokio::test]
    async fn test_latest_nav() {
        let server = MockServer::start().await;
        mount_scheme(&server, "119551", SCHEME_119551).await;

        let provider = provider(&server.uri());
        let quote = provider.latest_nav("119551").await.unwrap();
        assert_eq!(quote.nav, 1245.67);
        assert_eq!(quote.date, "28-08-2026");
        assert_eq!(
            quote.scheme_name,
            "HDFC Top 100 Fund - Direct Plan - Growth"
        );
    }

    #[tokio::test]
    async fn test_day_change() {
        let server = MockServer::start().await;
        mount_scheme(&server, "119551", SCHEME_119551).await;

        let provider = provider(&server.uri());
        let change = provider.day_change("119551").await.unwrap();
        assert!((change.absolute_change - 13.57).abs() < 1e-9);
        assert!((change.percent_change - (13.57 / 1232.10 * 100.0)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_day_change_needs_two_points() {
        let server = MockServer::start().await;
        mount_scheme(
            &server,
            "42",
            r#"{"meta": {"scheme_name": "Lonely Fund"},
                "data": [{"date": "28-08-2026", "nav": "10.0"}]}"#,
        )
        .await;

        let provider = provider(&server.uri());
        let err = provider.day_change("42").await.unwrap_err().to_string();
        assert!(err.contains("Insufficient NAV data"));
    }

    #[tokio::test]
    async fn test_scheme_responses_are_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mf/119551"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SCHEME_119551))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider(&server.uri());
        provider.latest_nav("119551").await.unwrap();
        provider.latest_nav("119551").await.unwrap();
    }
}
