// src/transport.rs
// =============================================================================
// This module is the HTTP boundary of the application.
//
// Everything that touches the network goes through the Transport trait:
// - fetch_text: GET a URL and return the body as text (README candidates,
//   the mod database JSON, download history)
// - probe: HEAD a URL and report whether it answered with a success status
//   (used to confirm that images referenced by a README actually exist)
//
// Having a trait here means the rest of the code never holds a reqwest
// client directly, and tests can swap in an in-memory fake instead of
// hitting the network.
//
// Rust concepts:
// - Traits: Shared interfaces that multiple types can implement
// - async-trait: Lets trait methods be async (not native in traits yet)
// - Send + Sync bounds: Needed so implementations can be shared across tasks
// =============================================================================

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

// Every network operation must finish within this bound.
// A hung upstream host must never stall a whole resolution request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// The network boundary used by both pipelines.
//
// fetch_text succeeds only for 2xx responses; any other status and any
// transport failure is an error, because callers treat "bad status" and
// "unreachable" the same way.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches the text body at `url`. Ok only for success statuses.
    async fn fetch_text(&self, url: &str) -> Result<String>;

    /// Existence probe: true when `url` answers with a success status.
    async fn probe(&self, url: &str) -> bool;
}

// The real implementation, backed by a shared reqwest client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    // Builds the transport and its HTTP client.
    //
    // Client settings:
    // - 10 second timeout per request (slow hosts must not hang the pipeline)
    // - Follow up to 5 redirects (raw-content hosts and image CDNs redirect)
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to fetch {}: HTTP {}",
                url,
                response.status()
            ));
        }

        let content = response.text().await?;
        Ok(content)
    }

    async fn probe(&self, url: &str) -> bool {
        // HEAD is enough here: we only need the status, never the body
        match self.client.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is Transport a trait and not just a struct?
//    - The pipeline logic doesn't care HOW a URL is fetched
//    - A trait lets tests provide a fake that answers from memory
//    - Production code uses HttpTransport, tests use fakes::FakeTransport
//
// 2. What does #[async_trait] do?
//    - Rust traits can't have plain `async fn` methods yet
//    - The async-trait macro rewrites them into methods returning a boxed
//      Future, which is what actually compiles
//    - The syntax inside stays ordinary async/await
//
// 3. Why does probe return bool instead of Result?
//    - Callers only ever ask "is this image worth showing?"
//    - A DNS failure, a timeout and a 404 all mean the same thing here: no
//    - Collapsing them early keeps the verifier free of error plumbing
//
// 4. Why build the client once and reuse it?
//    - reqwest::Client keeps a connection pool internally
//    - Rebuilding it per request would redo TLS handshakes every time
// -----------------------------------------------------------------------------

#[cfg(test)]
pub mod fakes {
    // In-memory stand-in for HttpTransport, shared by tests across the crate.
    //
    // - `pages` maps URL -> body for fetch_text
    // - `reachable` is the set of URLs that probe reports as alive
    // - `requests` records every URL touched, so tests can assert that a
    //   code path made no network calls at all
    use super::Transport;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeTransport {
        pages: HashMap<String, String>,
        reachable: HashSet<String>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes `url` fetchable with the given body.
        pub fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        /// Makes `url` answer probes with success.
        pub fn with_reachable(mut self, url: &str) -> Self {
            self.reachable.insert(url.to_string());
            self
        }

        /// Every URL passed to fetch_text or probe, in call order.
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow!("Failed to fetch {}: HTTP 404", url))
        }

        async fn probe(&self, url: &str) -> bool {
            self.requests.lock().unwrap().push(url.to_string());
            self.reachable.contains(url)
        }
    }
}
