// src/history.rs
// =============================================================================
// This module owns the downloads page: fetching a mod's download-count
// history from the site API and assembling the page data around it.
//
// The endpoint is GET {api base}/api/{uniqueName}/downloads and answers
// with a JSON array of samples:
//
//   [ { "timestamp": 1647561600000, "value": 1234 }, ... ]
//
// This is the loosely coupled side of the application: nothing in the
// README pipeline depends on it, and the downloads page must render even
// when this endpoint is down. fetch_download_history therefore reports
// failure honestly, and load_downloads_page applies the fallback: a failed
// series becomes an empty one, logged, and the page still gets built.
//
// Rust concepts:
// - Result + unwrap_or_else at the boundary: graceful degradation
// - serde on Vec<T>: a JSON array parses directly into a vector
// =============================================================================

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::catalog::{Mod, ModDatabase};
use crate::transport::Transport;

// One sample of the download-count series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// When the sample was taken (Unix epoch milliseconds)
    pub timestamp: i64,
    /// Lifetime download count at that moment
    pub value: u64,
}

// Builds the downloads endpoint URL for a mod.
//
// Example:
//   ("https://outerwildsmods.com", "Raicuparta.NomaiVR")
//   -> "https://outerwildsmods.com/api/Raicuparta.NomaiVR/downloads"
fn download_history_url(api_base: &str, unique_name: &str) -> String {
    format!(
        "{}/api/{}/downloads",
        api_base.trim_end_matches('/'),
        unique_name
    )
}

// Fetches the download history for one mod.
//
// Parameters:
//   transport: the HTTP boundary
//   api_base: base URL of the site API
//   unique_name: the mod's stable identifier (not the slug!)
//
// Returns: the parsed series, or an error when the endpoint answered with
// a non-success status or the body was not a history array. The caller
// owns the fallback: a chartless page beats no page at all.
pub async fn fetch_download_history<T: Transport>(
    transport: &T,
    api_base: &str,
    unique_name: &str,
) -> Result<Vec<HistoryPoint>> {
    let url = download_history_url(api_base, unique_name);
    let body = transport.fetch_text(&url).await?;
    let history: Vec<HistoryPoint> = serde_json::from_str(&body)?;
    Ok(history)
}

// The downloads page data: the mod and its download-count series.
//
// Serialized shape (camelCase keys, the shape the page consumes):
//   { "mod": { ... }, "modDownloadHistory": [ ... ] }
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadsPageData {
    /// The catalog entry the slug resolved to
    /// (the field is called mod_info because `mod` is a Rust keyword)
    #[serde(rename = "mod")]
    pub mod_info: Mod,
    /// The (possibly empty) download-count series
    pub mod_download_history: Vec<HistoryPoint>,
}

// Loads everything the downloads page needs for one mod.
//
// Parameters:
//   transport: the HTTP boundary
//   catalog: the loaded mod database (the caller already ensured it loaded)
//   api_base: base URL of the site API
//   slug: URL-safe mod identifier
//
// Returns: None when no mod projects onto the slug (the not-found
// outcome). Otherwise the page data always comes back: a failed or
// unparseable history fetch is logged and substituted with an empty
// series, never escalated into a page failure.
pub async fn load_downloads_page<T: Transport>(
    transport: &T,
    catalog: &ModDatabase,
    api_base: &str,
    slug: &str,
) -> Option<DownloadsPageData> {
    // No mod, no page: the caller surfaces this as the not-found outcome
    let mod_entry = catalog.find_by_slug(slug)?;

    // The page renders with or without a chart
    let history = fetch_download_history(transport, api_base, &mod_entry.unique_name)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Failed to get mod download history: {}", e);
            Vec::new()
        });

    Some(DownloadsPageData {
        mod_info: mod_entry.clone(),
        mod_download_history: history,
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why doesn't fetch_download_history return an empty Vec on failure?
//    - Callers that want the distinction ("down" vs "no data yet") keep it
//    - The degradation choice belongs to the page, so load_downloads_page
//      applies unwrap_or_else and the fetch stays an honest Result
//
// 2. Why unique_name and not the slug?
//    - The API routes history by the mod's stable identifier
//      (e.g., "Raicuparta.NomaiVR"), which never changes
//    - Slugs are projections of display names, which can be edited
//
// 3. What does Vec<HistoryPoint> deserialize from?
//    - A JSON array of objects: serde maps arrays onto Vec and objects
//      onto structs, so the derive on HistoryPoint is all we need
//
// 4. Why does load_downloads_page return Option?
//    - A missing mod means there is no page at all (the not-found outcome)
//    - Every other failure still produces a page, just without a chart
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fakes::FakeTransport;

    const API_BASE: &str = "https://outerwildsmods.com";
    const ENDPOINT: &str = "https://outerwildsmods.com/api/author.TestMod/downloads";

    #[test]
    fn test_url_joins_base_and_unique_name() {
        assert_eq!(download_history_url(API_BASE, "author.TestMod"), ENDPOINT);
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        assert_eq!(
            download_history_url("https://outerwildsmods.com/", "author.TestMod"),
            ENDPOINT
        );
    }

    #[tokio::test]
    async fn test_fetch_parses_points_in_order() {
        let body = r#"[
            { "timestamp": 1647561600000, "value": 100 },
            { "timestamp": 1647648000000, "value": 150 }
        ]"#;
        let transport = FakeTransport::new().with_page(ENDPOINT, body);

        let history = fetch_download_history(&transport, API_BASE, "author.TestMod")
            .await
            .unwrap();

        assert_eq!(
            history,
            vec![
                HistoryPoint {
                    timestamp: 1647561600000,
                    value: 100,
                },
                HistoryPoint {
                    timestamp: 1647648000000,
                    value: 150,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_series_is_valid() {
        let transport = FakeTransport::new().with_page(ENDPOINT, "[]");

        let history = fetch_download_history(&transport, API_BASE, "author.TestMod")
            .await
            .unwrap();

        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_an_error() {
        let transport = FakeTransport::new();

        let result = fetch_download_history(&transport, API_BASE, "author.TestMod").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unparseable_body_is_an_error() {
        let transport = FakeTransport::new().with_page(ENDPOINT, "<html>downtime</html>");

        let result = fetch_download_history(&transport, API_BASE, "author.TestMod").await;

        assert!(result.is_err());
    }

    fn sample_catalog() -> ModDatabase {
        ModDatabase {
            releases: vec![Mod {
                name: "Test Mod".to_string(),
                unique_name: "author.TestMod".to_string(),
                repo: "https://github.com/owner/test-mod".to_string(),
                download_count: 42,
            }],
        }
    }

    #[tokio::test]
    async fn test_page_loads_mod_and_series() {
        let catalog = sample_catalog();
        let body = r#"[{ "timestamp": 1647561600000, "value": 100 }]"#;
        let transport = FakeTransport::new().with_page(ENDPOINT, body);

        let page = load_downloads_page(&transport, &catalog, API_BASE, "test-mod")
            .await
            .unwrap();

        assert_eq!(page.mod_info.unique_name, "author.TestMod");
        assert_eq!(
            page.mod_download_history,
            vec![HistoryPoint {
                timestamp: 1647561600000,
                value: 100,
            }]
        );
    }

    #[tokio::test]
    async fn test_page_degrades_to_empty_series_when_endpoint_fails() {
        let catalog = sample_catalog();
        // No pages registered, so the history fetch fails outright
        let transport = FakeTransport::new();

        let page = load_downloads_page(&transport, &catalog, API_BASE, "test-mod")
            .await
            .unwrap();

        // The page still renders: the mod is there, the chart is just empty
        assert_eq!(page.mod_info.unique_name, "author.TestMod");
        assert!(page.mod_download_history.is_empty());
    }

    #[tokio::test]
    async fn test_page_degrades_when_body_is_unparseable() {
        let catalog = sample_catalog();
        let transport = FakeTransport::new().with_page(ENDPOINT, "<html>downtime</html>");

        let page = load_downloads_page(&transport, &catalog, API_BASE, "test-mod")
            .await
            .unwrap();

        assert_eq!(page.mod_info.unique_name, "author.TestMod");
        assert!(page.mod_download_history.is_empty());
    }

    #[tokio::test]
    async fn test_page_is_none_for_unknown_slug() {
        let catalog = sample_catalog();
        let transport = FakeTransport::new();

        let page = load_downloads_page(&transport, &catalog, API_BASE, "no-such-mod").await;

        assert!(page.is_none());
        // An unknown slug never triggers a history fetch
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_page_serializes_with_page_keys() {
        let catalog = sample_catalog();
        let body = r#"[{ "timestamp": 1647561600000, "value": 100 }]"#;
        let transport = FakeTransport::new().with_page(ENDPOINT, body);

        let page = load_downloads_page(&transport, &catalog, API_BASE, "test-mod")
            .await
            .unwrap();
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["mod"]["uniqueName"], "author.TestMod");
        assert_eq!(json["modDownloadHistory"][0]["value"], 100);
    }
}
